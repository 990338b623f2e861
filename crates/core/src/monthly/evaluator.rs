//! Monthly flextime evaluation.

use timeledger_shared::types::AbsenceTypeId;

use super::credit::{CreditOutcome, apply_credit, no_evaluation};
use super::types::{MonthStatus, MonthTotals, MonthlyInput, MonthlyValue, in_month};
use crate::absence::{AbsenceCategory, AbsenceTotals};
use crate::tariff::CreditType;

/// Evaluates months of daily values into carried flextime balances.
pub struct MonthlyEvaluator;

impl MonthlyEvaluator {
    /// Evaluates one month.
    ///
    /// `category_of` resolves an absence type to its category; unresolved
    /// types are counted as unresolved days. Without a resolvable tariff the
    /// month is passed through unchanged and flagged as a fallback.
    pub fn evaluate<F>(input: &MonthlyInput<'_>, category_of: F) -> MonthlyValue
    where
        F: Fn(AbsenceTypeId) -> Option<AbsenceCategory>,
    {
        let mut totals = MonthTotals::default();
        let mut days_worked = 0u32;
        let mut error_days = 0u32;
        let month_days = input.daily_values.iter().filter(|v| {
            v.employee_id == input.employee_id && in_month(v.date, input.year, input.month)
        });
        for value in month_days {
            totals.add(value);
            if value.has_worked() {
                days_worked += 1;
            }
            if value.has_error {
                error_days += 1;
            }
        }

        let mut absences = AbsenceTotals::default();
        for absence in input
            .absences
            .iter()
            .filter(|a| a.is_approved() && in_month(a.date, input.year, input.month))
        {
            absences.add(category_of(absence.absence_type_id), absence.clamped_duration());
        }

        let month_net = totals.flextime_minutes();
        let fallback_evaluation = !input.tariff_resolved;
        let (credit_type, outcome): (CreditType, CreditOutcome) = match input.rules {
            Some(rules) if input.tariff_resolved => (
                rules.credit_type,
                apply_credit(&rules, input.carryover_start, month_net),
            ),
            _ => {
                if fallback_evaluation {
                    tracing::warn!(
                        employee_id = %input.employee_id,
                        year = input.year,
                        month = input.month,
                        "Tariff could not be resolved, evaluating month without credit rules"
                    );
                }
                (
                    CreditType::NoEvaluation,
                    no_evaluation(input.carryover_start, month_net),
                )
            }
        };

        MonthlyValue {
            employee_id: input.employee_id,
            year: input.year,
            month: input.month,
            status: MonthStatus::Open,
            credit_type,
            fallback_evaluation,
            carryover_start: input.carryover_start,
            carryover_end: outcome.carryover_end,
            flextime_delta: month_net,
            credited_minutes: outcome.credited_minutes,
            forfeited_minutes: outcome.forfeited_minutes,
            annual_limit_adjustment: outcome.annual_limit_adjustment,
            totals,
            absences,
            days_worked,
            error_days,
        }
    }

    /// Evaluates consecutive months, feeding each month's ending carryover
    /// into the next month's start.
    ///
    /// The `carryover_start` of every input is replaced; the first month
    /// starts at `initial_carryover`.
    pub fn evaluate_chain<F>(
        initial_carryover: i32,
        months: &[MonthlyInput<'_>],
        category_of: F,
    ) -> Vec<MonthlyValue>
    where
        F: Fn(AbsenceTypeId) -> Option<AbsenceCategory>,
    {
        months
            .iter()
            .scan(initial_carryover, |carryover, month| {
                let input = MonthlyInput {
                    carryover_start: *carryover,
                    ..*month
                };
                let value = Self::evaluate(&input, &category_of);
                *carryover = value.carryover_end;
                Some(value)
            })
            .collect()
    }
}
