//! Day plans, week plans, and day plan resolution.

pub mod resolver;
pub mod types;

pub use resolver::{DayAssignment, DayPlanResolver, OffReason, ResolvedDay};
pub use types::{BreakRule, DayPlan, Rounding, RoundingMode, TimeWindow, Tolerance, WeekPlan};
