use std::fmt;
use std::str::FromStr;

use super::draft::RuleDraft;
use super::error::ParseKindError;
use super::product::ProductRef;

/// The three rule kinds. Determines which fields of a [`Rule`] are meaningful
/// and which priority tier the rule is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum RuleKind {
    /// Applies to every cart not matched by a higher tier.
    Global,
    /// Applies unless the cart holds one of the excluded products or collections.
    GlobalExcept,
    /// Applies only when the cart holds one of the trigger products or collections.
    Triggered,
}

impl RuleKind {
    /// Evaluation order of the priority tiers, highest priority first.
    pub const TIERS: [RuleKind; 3] = [
        RuleKind::Triggered,
        RuleKind::GlobalExcept,
        RuleKind::Global,
    ];

    /// Wire names accepted by [`FromStr`].
    pub const NAMES: [&'static str; 3] = ["GLOBAL", "GLOBAL_EXCEPT", "TRIGGERED"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Global => "GLOBAL",
            RuleKind::GlobalExcept => "GLOBAL_EXCEPT",
            RuleKind::Triggered => "TRIGGERED",
        }
    }

    /// Position in [`TIERS`](Self::TIERS); lower is evaluated first.
    #[must_use]
    pub fn tier(self) -> usize {
        match self {
            RuleKind::Triggered => 0,
            RuleKind::GlobalExcept => 1,
            RuleKind::Global => 2,
        }
    }

    /// The kind that may not be enabled alongside this one, if any.
    #[must_use]
    pub fn exclusive_with(self) -> Option<RuleKind> {
        match self {
            RuleKind::Global => Some(RuleKind::GlobalExcept),
            RuleKind::GlobalExcept => Some(RuleKind::Global),
            RuleKind::Triggered => None,
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GLOBAL" => Ok(RuleKind::Global),
            "GLOBAL_EXCEPT" => Ok(RuleKind::GlobalExcept),
            "TRIGGERED" => Ok(RuleKind::Triggered),
            other => Err(ParseKindError::Kind(other.to_owned())),
        }
    }
}

/// How the storefront scopes a rule's recommendations to trigger products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum DisplayScope {
    #[default]
    All,
    /// Exactly one trigger product; at most one such rule per rule set.
    Single,
    PerProduct,
}

impl DisplayScope {
    pub const NAMES: [&'static str; 3] = ["all", "single", "per_product"];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayScope::All => "all",
            DisplayScope::Single => "single",
            DisplayScope::PerProduct => "per_product",
        }
    }
}

impl fmt::Display for DisplayScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayScope {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DisplayScope::All),
            "single" => Ok(DisplayScope::Single),
            "per_product" => Ok(DisplayScope::PerProduct),
            other => Err(ParseKindError::Scope(other.to_owned())),
        }
    }
}

/// A validated, immutable upsell rule.
///
/// Produced by [`RuleDraft::build()`] after validation succeeds. To change a
/// rule, convert it back with [`Rule::to_draft()`], edit the draft and build
/// again, so an invalid rule is never observable.
///
/// Under the `serde` feature a rule is read and written in the stored
/// [`RuleDraft`] shape. Deserializing runs [`RuleDraft::build()`] with no
/// existing rules and the default policy, so malformed input is rejected with
/// the validation messages.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RuleDraft", into = "RuleDraft")
)]
pub struct Rule {
    pub(crate) id: String,
    pub(crate) enabled: bool,
    pub(crate) kind: RuleKind,
    pub(crate) display_scope: DisplayScope,
    pub(crate) trigger_products: Vec<ProductRef>,
    pub(crate) trigger_collections: Vec<String>,
    pub(crate) excluded_products: Vec<String>,
    pub(crate) excluded_collections: Vec<String>,
    pub(crate) upsell_products: Vec<ProductRef>,
    pub(crate) upsell_collections: Vec<String>,
    pub(crate) limit: u32,
    pub(crate) cart_value_threshold: Option<f64>,
}

impl Rule {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    #[must_use]
    pub fn display_scope(&self) -> DisplayScope {
        self.display_scope
    }

    #[must_use]
    pub fn trigger_products(&self) -> &[ProductRef] {
        &self.trigger_products
    }

    #[must_use]
    pub fn trigger_collections(&self) -> &[String] {
        &self.trigger_collections
    }

    #[must_use]
    pub fn excluded_products(&self) -> &[String] {
        &self.excluded_products
    }

    #[must_use]
    pub fn excluded_collections(&self) -> &[String] {
        &self.excluded_collections
    }

    #[must_use]
    pub fn upsell_products(&self) -> &[ProductRef] {
        &self.upsell_products
    }

    #[must_use]
    pub fn upsell_collections(&self) -> &[String] {
        &self.upsell_collections
    }

    /// Number of products the storefront displays for this rule.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn cart_value_threshold(&self) -> Option<f64> {
        self.cart_value_threshold
    }

    /// The upsell products the storefront renders: the first `limit` entries.
    pub fn displayed_upsells(&self) -> impl Iterator<Item = &ProductRef> {
        self.upsell_products.iter().take(self.limit as usize)
    }

    /// Start an edit of this rule. The result must go through
    /// [`RuleDraft::build()`] to become a `Rule` again.
    #[must_use]
    pub fn to_draft(&self) -> RuleDraft {
        RuleDraft::from(self)
    }

    /// Trigger product ids followed by trigger collection ids.
    pub(crate) fn trigger_ids(&self) -> impl Iterator<Item = &str> {
        self.trigger_products
            .iter()
            .map(|p| p.id.as_str())
            .chain(self.trigger_collections.iter().map(String::as_str))
    }

    pub(crate) fn exclusion_ids(&self) -> impl Iterator<Item = &str> {
        self.excluded_products
            .iter()
            .chain(self.excluded_collections.iter())
            .map(String::as_str)
    }

    pub(crate) fn has_upsells(&self) -> bool {
        !self.upsell_products.is_empty() || !self.upsell_collections.is_empty()
    }

    /// Whether `total` satisfies the optional cart value threshold.
    pub(crate) fn meets_threshold(&self, total: f64) -> bool {
        match self.cart_value_threshold {
            Some(threshold) => total >= threshold,
            None => true,
        }
    }

    /// A rule that is malformed for its kind can never be returned by evaluation.
    pub(crate) fn is_matchable(&self) -> bool {
        let kind_fields = match self.kind {
            RuleKind::Triggered => self.trigger_ids().next().is_some(),
            RuleKind::GlobalExcept => self.exclusion_ids().next().is_some(),
            RuleKind::Global => true,
        };
        let threshold_ok = self.cart_value_threshold.map_or(true, f64::is_finite);
        kind_fields && threshold_ok && self.has_upsells()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} upsell products, {} upsell collections",
            self.id,
            self.kind,
            self.upsell_products.len(),
            self.upsell_collections.len(),
        )?;
        if !self.enabled {
            f.write_str(", disabled")?;
        }
        f.write_str(")")
    }
}
