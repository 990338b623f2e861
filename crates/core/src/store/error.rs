//! Result store errors.

use thiserror::Error;

/// Errors raised by a [`ResultStore`](super::ResultStore) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Result store unavailable: {0}")]
    Unavailable(String),

    /// A write conflicted with a concurrent writer.
    #[error("Write conflict on {0}")]
    Conflict(String),
}

impl StoreError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "STORE_UNAVAILABLE",
            Self::Conflict(_) => "STORE_CONFLICT",
        }
    }
}

impl From<StoreError> for timeledger_shared::AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
