use std::fmt;

use super::error::{ErrorCategory, ValidationError, ValidationErrors};

/// Outcome of validating a rule or a rule set.
///
/// Violations are returned as data, never raised, so the admin UI can show all
/// of them at once.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationErrors),
}

impl ValidationResult {
    /// `Valid` when `errors` is empty, `Invalid` otherwise.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationErrors::new(errors) {
            Some(errors) => ValidationResult::Invalid(errors),
            None => ValidationResult::Valid,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// The violations, empty when valid.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(errors) => errors.as_slice(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }

    #[must_use]
    pub fn has_category(&self, category: ErrorCategory) -> bool {
        self.errors().iter().any(|e| e.category() == category)
    }

    /// Convert into a `Result` for use with `?`.
    ///
    /// # Errors
    ///
    /// Returns the collected [`ValidationErrors`] when invalid.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(errors) => Err(errors),
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::Valid => f.write_str("valid"),
            ValidationResult::Invalid(errors) => write!(f, "invalid: {errors}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_are_valid() {
        let result = ValidationResult::from_errors(vec![]);
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert_eq!(result.to_string(), "valid");
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn errors_are_invalid() {
        let result = ValidationResult::from_errors(vec![ValidationError::MissingTriggers]);
        assert!(!result.is_valid());
        assert!(result.has_category(ErrorCategory::RequiredField));
        assert_eq!(
            result.messages(),
            vec!["triggered rule requires at least one trigger product or collection"]
        );
        assert_eq!(
            result.to_string(),
            "invalid: triggered rule requires at least one trigger product or collection"
        );
        let err = result.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
    }
}
