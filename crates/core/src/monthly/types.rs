//! Monthly evaluation types.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use timeledger_shared::types::EmployeeId;

use crate::absence::{AbsenceDay, AbsenceTotals};
use crate::daily::DailyValue;
use crate::tariff::{CreditType, EvaluationRules};

/// Whether a month may still be recalculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthStatus {
    /// Recalculation allowed.
    #[default]
    Open,
    /// Locked until reopened.
    Closed,
}

/// Summed daily figures of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MonthTotals {
    /// Sum of gross minutes.
    pub gross_minutes: i32,
    /// Sum of net minutes.
    pub net_minutes: i32,
    /// Sum of target minutes.
    pub target_minutes: i32,
    /// Sum of overtime minutes.
    pub overtime_minutes: i32,
    /// Sum of undertime minutes.
    pub undertime_minutes: i32,
    /// Sum of break minutes.
    pub break_minutes: i32,
}

impl MonthTotals {
    /// Adds one day's figures.
    pub fn add(&mut self, value: &DailyValue) {
        self.gross_minutes += value.gross_minutes;
        self.net_minutes += value.net_minutes;
        self.target_minutes += value.target_minutes;
        self.overtime_minutes += value.overtime_minutes;
        self.undertime_minutes += value.undertime_minutes;
        self.break_minutes += value.break_minutes;
    }

    /// `overtime - undertime`.
    #[must_use]
    pub fn flextime_minutes(&self) -> i32 {
        self.overtime_minutes - self.undertime_minutes
    }
}

/// The evaluated month of one employee.
///
/// Unique per (employee, year, month). Months chain through their
/// carryover: the next month starts where this one ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyValue {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Lock state.
    pub status: MonthStatus,
    /// Policy that was applied.
    pub credit_type: CreditType,
    /// True when the tariff could not be resolved and no evaluation was
    /// applied in its place.
    pub fallback_evaluation: bool,
    /// Balance carried in from the previous month.
    pub carryover_start: i32,
    /// Balance carried into the next month.
    pub carryover_end: i32,
    /// `Σ(overtime - undertime)` of the month.
    pub flextime_delta: i32,
    /// Part of the delta added to the balance.
    pub credited_minutes: i32,
    /// Part of the delta lost to the monthly cap.
    pub forfeited_minutes: i32,
    /// Correction applied by the annual limits (negative when the upper
    /// limit cut the balance).
    pub annual_limit_adjustment: i32,
    /// Summed daily figures.
    pub totals: MonthTotals,
    /// Approved absence days by category.
    pub absences: AbsenceTotals,
    /// Days with credited presence.
    pub days_worked: u32,
    /// Days with a daily error.
    pub error_days: u32,
}

impl MonthlyValue {
    /// Returns true if the month refuses recalculation.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == MonthStatus::Closed
    }
}

/// Input for one monthly evaluation.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyInput<'a> {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-based.
    pub month: u32,
    /// Daily values; days outside the month are ignored.
    pub daily_values: &'a [DailyValue],
    /// Absence days in any status; only approved days of the month count.
    pub absences: &'a [AbsenceDay],
    /// Previous month's ending carryover.
    pub carryover_start: i32,
    /// Whether the employee's tariff could be resolved.
    pub tariff_resolved: bool,
    /// The tariff's evaluation rules; `None` means no evaluation.
    pub rules: Option<EvaluationRules>,
}

/// Returns true if `date` lies in the given month.
#[must_use]
pub fn in_month(date: NaiveDate, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// First and last day of a month; `None` for an invalid month.
#[must_use]
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    Some((first, last))
}

/// The month before `(year, month)`.
#[must_use]
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
