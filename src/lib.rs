mod conflict;
mod engine;
mod error;
mod evaluate;
mod store;
mod types;
mod validate;

pub use conflict::can_enable;
pub use engine::UpsellEngine;
pub use error::EngineError;
pub use evaluate::{evaluate, evaluate_detailed};
pub use store::{MemoryRuleStore, RuleStore, StoreError};
pub use types::{
    Cart, DisplayScope, EnableCheck, ErrorCategory, EvaluationReport, ParseKindError, ProductList,
    ProductRef, Rule, RuleDraft, RuleKind, ValidationError, ValidationErrors, ValidationPolicy,
    ValidationResult, DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, DEFAULT_MIN_LIMIT,
};
pub use validate::{validate, validate_set, validate_set_with, validate_with};
