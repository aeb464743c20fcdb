use thiserror::Error;

use crate::{StoreError, ValidationErrors};

/// Unified error type for the [`UpsellEngine`](crate::UpsellEngine) facade.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("rule rejected: {0}")]
    Invalid(#[from] ValidationErrors),
}

impl EngineError {
    /// The validation failures, when the error came from validation.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            EngineError::Invalid(errors) => Some(errors),
            EngineError::Store(_) => None,
        }
    }
}
