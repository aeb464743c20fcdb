use std::fmt;

use thiserror::Error;

use super::rule::{DisplayScope, RuleKind};

/// Failure to parse a rule kind or display scope from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKindError {
    #[error("unknown rule kind '{0}'")]
    Kind(String),

    #[error("unknown display scope '{0}'")]
    Scope(String),
}

/// Which product list of a rule a per-product error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductList {
    Trigger,
    Upsell,
}

impl fmt::Display for ProductList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductList::Trigger => f.write_str("triggerProducts"),
            ProductList::Upsell => f.write_str("upsellProducts"),
        }
    }
}

/// Coarse classification of a [`ValidationError`], stable for machine use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Unknown kind or display scope, missing id, fields that do not belong to the kind.
    Shape,
    /// A list the rule kind depends on is empty, or a product entry lacks id/title.
    RequiredField,
    /// A numeric field is outside its accepted range.
    Range,
    /// Wrong number of trigger products, or too many `single` scope rules.
    Cardinality,
    Duplicate,
    Overlap,
    Conflict,
}

/// A single rule violation. The `Display` output is the human-readable message
/// shown to merchants; the variant itself is the machine-readable kind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("rule id is required")]
    MissingId,

    #[error("ruleType '{value}' is invalid, must be one of: {}", RuleKind::NAMES.join(", "))]
    UnknownKind { value: String },

    #[error("displayScope '{value}' is invalid, must be one of: {}", DisplayScope::NAMES.join(", "))]
    UnknownDisplayScope { value: String },

    #[error("{field} must be empty for {kind} rules")]
    UnusedField { kind: RuleKind, field: &'static str },

    #[error("displayScope '{scope}' only applies to {} rules", RuleKind::Triggered)]
    ScopeRequiresTrigger { scope: DisplayScope },

    #[error("triggered rule requires at least one trigger product or collection")]
    MissingTriggers,

    #[error("global-except rule requires at least one excluded product or collection")]
    MissingExclusions,

    #[error("at least one upsell product or collection must be selected")]
    MissingUpsells,

    #[error("{list}[{index}].id is required")]
    MissingProductId { list: ProductList, index: usize },

    #[error("{list}[{index}].title is required")]
    MissingProductTitle { list: ProductList, index: usize },

    #[error("{list}[{index}].price must be a non-negative number, got '{value}'")]
    InvalidPrice {
        list: ProductList,
        index: usize,
        value: String,
    },

    #[error("upsell limit must be between {min} and {max}, got {limit}")]
    LimitOutOfRange { limit: i64, min: u32, max: u32 },

    #[error("cartValueThreshold must be a positive number, got {value}")]
    InvalidThreshold { value: f64 },

    #[error("exactly 1 triggerProduct required when displayScope is 'single', found {found}")]
    SingleScopeTriggerCount { found: usize },

    #[error("only one rule with displayScope 'single' is allowed, found: {}", ids.join(", "))]
    MultipleSingleScope { ids: Vec<String> },

    #[error("duplicate upsell products found: {}", ids.join(", "))]
    DuplicateUpsellProducts { ids: Vec<String> },

    #[error("duplicate trigger products found: {}", ids.join(", "))]
    DuplicateTriggerProducts { ids: Vec<String> },

    #[error("duplicate rule ids: {}", ids.join(", "))]
    DuplicateRuleIds { ids: Vec<String> },

    #[error("trigger product(s) cannot also be in the upsell list: {}", products.join(", "))]
    TriggerUpsellOverlap { products: Vec<String> },

    #[error(
        "{kind} cannot be enabled: upsells apply either to all products (GLOBAL) or to all \
         products except selected ones (GLOBAL_EXCEPT), not both; rule '{existing_id}' \
         ({existing}) is already enabled"
    )]
    KindConflict {
        kind: RuleKind,
        existing: RuleKind,
        existing_id: String,
    },

    #[error("rule[{index}]: {error}")]
    InRule {
        index: usize,
        error: Box<ValidationError>,
    },
}

impl ValidationError {
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            ValidationError::MissingId
            | ValidationError::UnknownKind { .. }
            | ValidationError::UnknownDisplayScope { .. }
            | ValidationError::UnusedField { .. }
            | ValidationError::ScopeRequiresTrigger { .. } => ErrorCategory::Shape,
            ValidationError::MissingTriggers
            | ValidationError::MissingExclusions
            | ValidationError::MissingUpsells
            | ValidationError::MissingProductId { .. }
            | ValidationError::MissingProductTitle { .. } => ErrorCategory::RequiredField,
            ValidationError::InvalidPrice { .. }
            | ValidationError::LimitOutOfRange { .. }
            | ValidationError::InvalidThreshold { .. } => ErrorCategory::Range,
            ValidationError::SingleScopeTriggerCount { .. }
            | ValidationError::MultipleSingleScope { .. } => ErrorCategory::Cardinality,
            ValidationError::DuplicateUpsellProducts { .. }
            | ValidationError::DuplicateTriggerProducts { .. }
            | ValidationError::DuplicateRuleIds { .. } => ErrorCategory::Duplicate,
            ValidationError::TriggerUpsellOverlap { .. } => ErrorCategory::Overlap,
            ValidationError::KindConflict { .. } => ErrorCategory::Conflict,
            ValidationError::InRule { error, .. } => error.category(),
        }
    }
}

impl From<ParseKindError> for ValidationError {
    fn from(err: ParseKindError) -> Self {
        match err {
            ParseKindError::Kind(value) => ValidationError::UnknownKind { value },
            ParseKindError::Scope(value) => ValidationError::UnknownDisplayScope { value },
        }
    }
}

/// The non-empty, ordered list of violations for a rejected rule.
///
/// Returned as the error of [`RuleDraft::build()`](crate::RuleDraft::build) and
/// carried by [`ValidationResult::Invalid`](crate::ValidationResult::Invalid).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Returns `None` when `errors` is empty.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`: an empty list is never constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Human-readable messages, one per violation, in detection order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn has_category(&self, category: ErrorCategory) -> bool {
        self.errors.iter().any(|e| e.category() == category)
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self { errors: vec![err] }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
