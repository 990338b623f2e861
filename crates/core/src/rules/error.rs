//! Calculation rule validation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a calculation rule is created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleValidationError {
    /// Factor must be strictly positive.
    #[error("Calculation rule factor must be greater than 0, got {0}")]
    NonPositiveFactor(Decimal),

    /// Value must not be negative.
    #[error("Calculation rule value must not be negative, got {0}")]
    NegativeValue(i32),
}

impl RuleValidationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveFactor(_) => "NON_POSITIVE_FACTOR",
            Self::NegativeValue(_) => "NEGATIVE_VALUE",
        }
    }
}

impl From<RuleValidationError> for timeledger_shared::AppError {
    fn from(err: RuleValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
