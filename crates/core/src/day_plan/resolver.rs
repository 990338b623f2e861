//! Resolution of the day plan that applies to an employee on a date.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use timeledger_shared::types::DayPlanId;

use super::types::DayPlan;
use crate::employee::Employee;
use crate::tariff::Tariff;

/// Employee-specific assignment for a single date, overriding the week plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "plan_id", rename_all = "snake_case")]
pub enum DayAssignment {
    /// Use this plan.
    Plan(DayPlanId),
    /// Explicitly free.
    Off,
}

/// Why a day is not a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffReason {
    /// Saturday or Sunday with no plan.
    Weekend,
    /// Weekday with no plan, or a plan that could not be loaded.
    Unassigned,
    /// Explicitly assigned as free.
    Scheduled,
    /// Before entry or after exit.
    NotEmployed,
}

/// Outcome of day plan resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDay {
    /// A working day under `plan`.
    Working(DayPlan),
    /// A public holiday; `plan` is what would otherwise have applied.
    Holiday {
        /// Plan the day would have had.
        plan: Option<DayPlan>,
    },
    /// A day off.
    Off(OffReason),
}

impl ResolvedDay {
    /// The plan in effect, if any.
    #[must_use]
    pub fn plan(&self) -> Option<&DayPlan> {
        match self {
            Self::Working(plan) => Some(plan),
            Self::Holiday { plan } => plan.as_ref(),
            Self::Off(_) => None,
        }
    }

    /// Returns true for holidays.
    #[must_use]
    pub fn is_holiday(&self) -> bool {
        matches!(self, Self::Holiday { .. })
    }
}

/// Resolves the applicable day plan.
pub struct DayPlanResolver;

impl DayPlanResolver {
    /// Resolves the day for `employee` on `date`.
    ///
    /// Order of precedence:
    /// 1. Outside the employment -> `Off(NotEmployed)`
    /// 2. Holiday -> `Holiday` with the plan that would otherwise apply
    /// 3. Date assignment -> that plan or `Off(Scheduled)`
    /// 4. Tariff week plan slot -> that plan
    /// 5. Empty slot -> `Off(Weekend)` on Saturday/Sunday, else `Off(Unassigned)`
    ///
    /// A plan id that `load_plan` cannot resolve yields `Off(Unassigned)`.
    pub fn resolve<L>(
        employee: &Employee,
        tariff: Option<&Tariff>,
        date: NaiveDate,
        is_holiday: bool,
        assignment: Option<DayAssignment>,
        load_plan: L,
    ) -> ResolvedDay
    where
        L: Fn(DayPlanId) -> Option<DayPlan>,
    {
        if !employee.is_employed_on(date) {
            return ResolvedDay::Off(OffReason::NotEmployed);
        }

        let planned = match assignment {
            Some(DayAssignment::Off) => Err(OffReason::Scheduled),
            Some(DayAssignment::Plan(plan_id)) => Ok(plan_id),
            None => tariff
                .and_then(|t| t.week_plan)
                .and_then(|week| week.plan_for(date.weekday()))
                .ok_or_else(|| Self::empty_slot_reason(date.weekday())),
        };

        let plan = planned.and_then(|plan_id| {
            load_plan(plan_id).ok_or_else(|| {
                tracing::warn!(
                    employee_id = %employee.id,
                    %date,
                    day_plan_id = %plan_id,
                    "Day plan could not be loaded, treating day as unassigned"
                );
                OffReason::Unassigned
            })
        });

        match (is_holiday, plan) {
            (true, plan) => ResolvedDay::Holiday { plan: plan.ok() },
            (false, Ok(plan)) => ResolvedDay::Working(plan),
            (false, Err(reason)) => ResolvedDay::Off(reason),
        }
    }

    fn empty_slot_reason(weekday: Weekday) -> OffReason {
        match weekday {
            Weekday::Sat | Weekday::Sun => OffReason::Weekend,
            _ => OffReason::Unassigned,
        }
    }
}
