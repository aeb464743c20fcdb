use super::error::{ValidationError, ValidationErrors};
use super::policy::ValidationPolicy;
use super::product::ProductRef;
use super::rule::{DisplayScope, Rule, RuleKind};
use super::validation::ValidationResult;

/// Product count displayed when a draft does not set one.
pub const DEFAULT_LIMIT: u32 = 3;

/// An unvalidated rule as submitted by the admin UI.
///
/// `kind` and `display_scope` are kept as raw wire strings so an unknown value
/// is reported by validation rather than lost during parsing. A draft becomes
/// a [`Rule`] only through [`build()`](Self::build).
///
/// # Example
///
/// ```
/// use upsell_rules::{RuleDraft, RuleKind};
///
/// let rule = RuleDraft::new("rule-2", RuleKind::Triggered)
///     .trigger_products(["iphone-15"])
///     .upsell_products(["iphone-case", "screen-protector"])
///     .limit(2)
///     .build(&[])
///     .unwrap();
///
/// assert_eq!(rule.kind(), RuleKind::Triggered);
/// assert_eq!(rule.limit(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct RuleDraft {
    pub id: String,
    pub enabled: bool,
    #[cfg_attr(feature = "serde", serde(rename = "ruleType"))]
    pub kind: String,
    pub display_scope: Option<String>,
    pub trigger_products: Vec<ProductRef>,
    pub trigger_collections: Vec<String>,
    pub excluded_products: Vec<String>,
    pub excluded_collections: Vec<String>,
    pub upsell_products: Vec<ProductRef>,
    pub upsell_collections: Vec<String>,
    pub limit: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub cart_value_threshold: Option<f64>,
}

impl Default for RuleDraft {
    fn default() -> Self {
        Self {
            id: String::new(),
            enabled: true,
            kind: String::new(),
            display_scope: None,
            trigger_products: Vec::new(),
            trigger_collections: Vec::new(),
            excluded_products: Vec::new(),
            excluded_collections: Vec::new(),
            upsell_products: Vec::new(),
            upsell_collections: Vec::new(),
            limit: i64::from(DEFAULT_LIMIT),
            cart_value_threshold: None,
        }
    }
}

impl RuleDraft {
    /// Start an enabled draft of the given kind.
    #[must_use]
    pub fn new(id: &str, kind: RuleKind) -> Self {
        Self {
            id: id.to_owned(),
            kind: kind.as_str().to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn global(id: &str) -> Self {
        Self::new(id, RuleKind::Global)
    }

    #[must_use]
    pub fn global_except(id: &str) -> Self {
        Self::new(id, RuleKind::GlobalExcept)
    }

    #[must_use]
    pub fn triggered(id: &str) -> Self {
        Self::new(id, RuleKind::Triggered)
    }

    /// Set the kind from an arbitrary wire string, known or not.
    #[must_use]
    pub fn raw_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_owned();
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn display_scope(mut self, scope: DisplayScope) -> Self {
        self.display_scope = Some(scope.as_str().to_owned());
        self
    }

    /// Set the display scope from an arbitrary wire string, known or not.
    #[must_use]
    pub fn raw_display_scope(mut self, scope: &str) -> Self {
        self.display_scope = Some(scope.to_owned());
        self
    }

    #[must_use]
    pub fn trigger_products<P: Into<ProductRef>>(
        mut self,
        products: impl IntoIterator<Item = P>,
    ) -> Self {
        self.trigger_products = products.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn trigger_collections<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.trigger_collections = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn excluded_products<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.excluded_products = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn excluded_collections<S: Into<String>>(
        mut self,
        ids: impl IntoIterator<Item = S>,
    ) -> Self {
        self.excluded_collections = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn upsell_products<P: Into<ProductRef>>(
        mut self,
        products: impl IntoIterator<Item = P>,
    ) -> Self {
        self.upsell_products = products.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn upsell_collections<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.upsell_collections = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn cart_value_threshold(mut self, threshold: f64) -> Self {
        self.cart_value_threshold = Some(threshold);
        self
    }

    /// Validate this draft against the current rule set with the default
    /// [`ValidationPolicy`].
    pub fn validate(&self, existing: &[Rule]) -> ValidationResult {
        crate::validate::validate(self, existing)
    }

    /// Validate and, on success, produce the immutable [`Rule`].
    ///
    /// # Errors
    ///
    /// Returns every violation found by [`validate`](crate::validate()).
    pub fn build(&self, existing: &[Rule]) -> Result<Rule, ValidationErrors> {
        self.build_with(&ValidationPolicy::default(), existing)
    }

    /// Like [`build()`](Self::build) with an explicit policy.
    ///
    /// # Errors
    ///
    /// Returns every violation found by [`validate_with`](crate::validate_with()).
    pub fn build_with(
        &self,
        policy: &ValidationPolicy,
        existing: &[Rule],
    ) -> Result<Rule, ValidationErrors> {
        crate::validate::validate_with(policy, self, existing).into_result()?;

        let kind = self
            .kind
            .parse::<RuleKind>()
            .map_err(ValidationError::from)?;
        let display_scope = match self.display_scope.as_deref() {
            Some(raw) => raw
                .parse::<DisplayScope>()
                .map_err(ValidationError::from)?,
            None => DisplayScope::All,
        };
        let limit = u32::try_from(self.limit).map_err(|_| ValidationError::LimitOutOfRange {
            limit: self.limit,
            min: policy.limit_range().0,
            max: policy.limit_range().1,
        })?;

        Ok(Rule {
            id: self.id.clone(),
            enabled: self.enabled,
            kind,
            display_scope,
            trigger_products: self.trigger_products.clone(),
            trigger_collections: self.trigger_collections.clone(),
            excluded_products: self.excluded_products.clone(),
            excluded_collections: self.excluded_collections.clone(),
            upsell_products: self.upsell_products.clone(),
            upsell_collections: self.upsell_collections.clone(),
            limit,
            cart_value_threshold: self.cart_value_threshold,
        })
    }
}

impl From<&Rule> for RuleDraft {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.clone(),
            enabled: rule.enabled,
            kind: rule.kind.as_str().to_owned(),
            display_scope: Some(rule.display_scope.as_str().to_owned()),
            trigger_products: rule.trigger_products.clone(),
            trigger_collections: rule.trigger_collections.clone(),
            excluded_products: rule.excluded_products.clone(),
            excluded_collections: rule.excluded_collections.clone(),
            upsell_products: rule.upsell_products.clone(),
            upsell_collections: rule.upsell_collections.clone(),
            limit: i64::from(rule.limit),
            cart_value_threshold: rule.cart_value_threshold,
        }
    }
}

impl From<Rule> for RuleDraft {
    fn from(rule: Rule) -> Self {
        Self::from(&rule)
    }
}

impl TryFrom<RuleDraft> for Rule {
    type Error = ValidationErrors;

    fn try_from(draft: RuleDraft) -> Result<Self, Self::Error> {
        draft.build(&[])
    }
}
