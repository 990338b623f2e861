//! Monthly evaluation: daily values to carried flextime balances.

pub mod credit;
pub mod evaluator;
pub mod types;

#[cfg(test)]
mod tests;

pub use credit::{CreditOutcome, apply_credit};
pub use evaluator::MonthlyEvaluator;
pub use types::{
    MonthStatus, MonthTotals, MonthlyInput, MonthlyValue, in_month, month_bounds, previous_month,
};
