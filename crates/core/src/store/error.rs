use thiserror::Error;

use crate::document::TranslateError;
use crate::expression::EvalError;

/// Errors reported by a document store.
///
/// The display text is the store's own message, which is what the adapter
/// returns to callers as `{message}`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (dispatch failure, timeout).
    #[error("{0}")]
    Connection(String),
    /// The request was malformed or did not match the table schema.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    ConditionalCheckFailed(String),
    #[error("{0}")]
    ResourceNotFound(String),
    #[error("{0}")]
    ResourceInUse(String),
    #[error("{0}")]
    Throttled(String),
    #[error("{0}")]
    Service(String),
}

impl StoreError {
    pub fn conditional_check_failed() -> Self {
        StoreError::ConditionalCheckFailed("The conditional request failed".to_string())
    }

    pub fn table_not_found() -> Self {
        StoreError::ResourceNotFound("Cannot do operations on a non-existent table".to_string())
    }

    /// Stable kind name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::Connection(_) => "connection",
            StoreError::Validation(_) => "validation",
            StoreError::ConditionalCheckFailed(_) => "conditional_check_failed",
            StoreError::ResourceNotFound(_) => "resource_not_found",
            StoreError::ResourceInUse(_) => "resource_in_use",
            StoreError::Throttled(_) => "throttled",
            StoreError::Service(_) => "service",
        }
    }
}

impl From<TranslateError> for StoreError {
    fn from(error: TranslateError) -> Self {
        StoreError::Validation(error.to_string())
    }
}

impl From<EvalError> for StoreError {
    fn from(error: EvalError) -> Self {
        StoreError::Validation(error.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
