mod cart;
mod draft;
mod enable_check;
mod error;
mod evaluation_report;
mod policy;
mod product;
mod rule;
mod validation;

pub use cart::Cart;
pub use draft::{RuleDraft, DEFAULT_LIMIT};
pub use enable_check::EnableCheck;
pub use error::{ErrorCategory, ParseKindError, ProductList, ValidationError, ValidationErrors};
pub use evaluation_report::EvaluationReport;
pub use policy::{ValidationPolicy, DEFAULT_MAX_LIMIT, DEFAULT_MIN_LIMIT};
pub use product::ProductRef;
pub use rule::{DisplayScope, Rule, RuleKind};
pub use validation::ValidationResult;

#[cfg(test)]
pub(crate) use rule::tests::raw_rule;
