//! Vacation calculation errors.

use thiserror::Error;

/// Errors raised while computing a vacation entitlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VacationError {
    /// The year's period cannot be represented.
    #[error("Vacation year {0} is out of range")]
    YearOutOfRange(i32),
}

impl VacationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::YearOutOfRange(_) => "VACATION_YEAR_OUT_OF_RANGE",
        }
    }
}

impl From<VacationError> for timeledger_shared::AppError {
    fn from(err: VacationError) -> Self {
        Self::Validation(err.to_string())
    }
}
