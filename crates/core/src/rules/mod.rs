//! Absence calculation rules.

pub mod calculation_rule;
pub mod error;

pub use calculation_rule::CalculationRule;
pub use error::RuleValidationError;
