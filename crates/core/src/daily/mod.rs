//! Daily calculation: from bookings and a resolved day to a daily value.

pub mod adjust;
pub mod breaks;
pub mod calculator;
pub mod types;


pub use adjust::{AdjustedIntervals, EffectiveInterval, adjust_intervals};
pub use breaks::{BreakDeduction, deduct_breaks};
pub use calculator::DailyCalculator;
pub use types::{DailyError, DailyInput, DailyOutcome, DailyValue, DailyWarning};
