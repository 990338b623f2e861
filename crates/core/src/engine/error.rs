//! Engine errors.

use thiserror::Error;
use timeledger_shared::AppError;
use timeledger_shared::types::EmployeeId;

use crate::store::StoreError;
use crate::vacation::VacationError;

/// Errors raised by the recalculation service.
///
/// Only conditions that make a result meaningless are errors; missing
/// configuration degrades to documented fallbacks instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The employee does not exist.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The month is closed and refuses recalculation.
    #[error("Month {year}-{month:02} is closed for employee {employee_id}")]
    MonthClosed {
        /// The employee.
        employee_id: EmployeeId,
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
    },

    /// The month has not been evaluated yet.
    #[error("Month {year}-{month:02} has not been evaluated for employee {employee_id}")]
    MonthNotEvaluated {
        /// The employee.
        employee_id: EmployeeId,
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
    },

    /// Year and month do not form a valid month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// Calendar year.
        year: i32,
        /// Calendar month.
        month: u32,
    },

    /// The result store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The vacation calculation failed.
    #[error(transparent)]
    Vacation(#[from] VacationError),

    /// The batch thread pool could not be built.
    #[error("Failed to build batch thread pool: {0}")]
    ThreadPool(String),
}

impl EngineError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
            Self::MonthClosed { .. } => "MONTH_CLOSED",
            Self::MonthNotEvaluated { .. } => "MONTH_NOT_EVALUATED",
            Self::InvalidMonth { .. } => "INVALID_MONTH",
            Self::Store(err) => err.error_code(),
            Self::Vacation(err) => err.error_code(),
            Self::ThreadPool(_) => "THREAD_POOL_ERROR",
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::EmployeeNotFound(_) | EngineError::MonthNotEvaluated { .. } => {
                Self::NotFound(err.to_string())
            }
            EngineError::MonthClosed { .. } => Self::BusinessRule(err.to_string()),
            EngineError::InvalidMonth { .. } => Self::Validation(err.to_string()),
            EngineError::Store(inner) => inner.into(),
            EngineError::Vacation(inner) => inner.into(),
            EngineError::ThreadPool(_) => Self::Configuration(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_mapping() {
        let employee_id = EmployeeId::new();

        let err = EngineError::EmployeeNotFound(employee_id);
        assert_eq!(err.error_code(), "EMPLOYEE_NOT_FOUND");
        assert_eq!(AppError::from(err).error_code(), "NOT_FOUND");

        let err = EngineError::MonthClosed {
            employee_id,
            year: 2026,
            month: 3,
        };
        assert!(err.to_string().contains("2026-03"));
        assert_eq!(AppError::from(err).error_code(), "BUSINESS_RULE_VIOLATION");

        let err = EngineError::from(StoreError::Unavailable("down".to_string()));
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
        let app = AppError::from(err);
        assert!(app.is_retryable());
    }
}
