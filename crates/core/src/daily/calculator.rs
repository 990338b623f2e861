//! Daily time calculation.

use rust_decimal::Decimal;

use super::adjust::{AdjustedIntervals, adjust_intervals};
use super::breaks::deduct_breaks;
use super::types::{DailyError, DailyInput, DailyOutcome, DailyValue, DailyWarning};
use crate::absence::AbsenceDay;
use crate::accounts::AccountPoster;
use crate::booking::{BookingIssue, BookingNormalizer};
use crate::day_plan::{DayPlan, ResolvedDay};
use crate::minutes::round_to_minutes;

/// Computes one employee's daily value.
///
/// Pure: the same input always yields the same outcome. Malformed bookings
/// are reported on the value and never abort the calculation.
pub struct DailyCalculator;

impl DailyCalculator {
    /// Calculates the daily value and the plan's account postings.
    #[must_use]
    pub fn calculate(input: &DailyInput<'_>) -> DailyOutcome {
        let mut value = DailyValue::empty(input.employee_id, input.date);
        value.day_plan_id = input.day.plan().map(|plan| plan.id);
        value.booking_count = u32::try_from(input.bookings.len()).unwrap_or(u32::MAX);
        value.is_holiday = input.day.is_holiday();
        value.is_off_day = matches!(input.day, ResolvedDay::Off(_));

        let absence = input
            .absence
            .filter(|absence| absence.date == input.date && absence.is_approved());
        value.is_absence = absence.is_some();

        let ResolvedDay::Working(plan) = input.day else {
            return DailyOutcome {
                value,
                postings: Vec::new(),
            };
        };

        if input.bookings.is_empty() {
            if absence.is_none() && Self::planned_target(plan, input.fallback_target_minutes) > 0 {
                value.warnings.push(DailyWarning::NoBookings);
            }
            return DailyOutcome {
                value,
                postings: Vec::new(),
            };
        }

        let paired = BookingNormalizer::pair(input.bookings);
        for issue in &paired.issues {
            match *issue {
                BookingIssue::UnpairedIn { minute } => {
                    value.errors.push(DailyError::UnpairedIn { minute });
                }
                BookingIssue::UnpairedOut { minute } => {
                    value.errors.push(DailyError::UnpairedOut { minute });
                }
                BookingIssue::Duplicate { minute } => {
                    value.warnings.push(DailyWarning::DuplicateBooking { minute });
                }
            }
        }
        value.first_in = paired.intervals.first().map(|interval| interval.start);
        value.last_out = paired.intervals.last().map(|interval| interval.end);

        let adjusted = adjust_intervals(plan, &paired.intervals);
        value.warnings.extend(
            adjusted
                .overlaps
                .iter()
                .map(|&minute| DailyWarning::OverlappingIntervals { minute }),
        );

        let gross = adjusted.gross_minutes();
        let gaps = adjusted.gap_minutes();
        let deduction = deduct_breaks(&plan.breaks, &adjusted.intervals, gross, gaps).total();
        let uncapped = gross - deduction;

        value.gross_minutes = gross;
        value.break_minutes = gaps + deduction;
        value.uncapped_net_minutes = uncapped;
        value.capped_minutes = plan
            .max_net_minutes
            .map_or(0, |max| (uncapped - max).max(0));
        value.net_minutes = match plan.max_net_minutes {
            Some(max) if plan.cap_reported_net => uncapped.min(max),
            _ => uncapped,
        };

        value.target_minutes = Self::target_minutes(plan, input.fallback_target_minutes, absence);
        value.overtime_minutes = (value.net_minutes - value.target_minutes).max(0);
        value.undertime_minutes = (value.target_minutes - value.net_minutes).max(0);

        Self::check_core_time(plan, &adjusted, &mut value);
        if let Some(min) = plan.min_net_minutes
            && absence.is_none()
            && value.net_minutes < min
        {
            value.warnings.push(DailyWarning::BelowMinNetWorkTime);
        }

        value.has_error = !value.errors.is_empty();

        let postings = AccountPoster::plan_instructions(plan, &value);

        tracing::debug!(
            employee_id = %value.employee_id,
            date = %value.date,
            net = value.net_minutes,
            target = value.target_minutes,
            has_error = value.has_error,
            "Daily value calculated"
        );

        DailyOutcome { value, postings }
    }

    /// Target minutes of a working day before absences.
    ///
    /// The plan's regular minutes, else the tariff-derived fallback, else 0.
    #[must_use]
    pub fn planned_target(plan: &DayPlan, fallback_target_minutes: Option<i32>) -> i32 {
        plan.regular_minutes
            .or(fallback_target_minutes)
            .unwrap_or(0)
            .max(0)
    }

    /// Target minutes after an approved absence covered part of the day.
    fn target_minutes(
        plan: &DayPlan,
        fallback_target_minutes: Option<i32>,
        absence: Option<&AbsenceDay>,
    ) -> i32 {
        let planned = Self::planned_target(plan, fallback_target_minutes);
        match absence {
            Some(absence) => {
                let remaining = Decimal::ONE - absence.clamped_duration();
                round_to_minutes(Decimal::from(planned) * remaining)
            }
            None => planned,
        }
    }

    fn check_core_time(plan: &DayPlan, adjusted: &AdjustedIntervals, value: &mut DailyValue) {
        let Some(core) = plan.core_time else {
            return;
        };
        let (Some(first), Some(last)) = (adjusted.intervals.first(), adjusted.intervals.last())
        else {
            return;
        };
        if first.start > core.start.as_i32() {
            value.warnings.push(DailyWarning::MissedCoreTimeStart);
        }
        if last.end < core.end.as_i32() {
            value.warnings.push(DailyWarning::MissedCoreTimeEnd);
        }
    }
}
