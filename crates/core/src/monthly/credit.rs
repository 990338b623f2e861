//! Flextime credit strategies, one per credit type.

use serde::{Deserialize, Serialize};

use crate::tariff::{CreditType, EvaluationRules};

/// How a month's flextime changed the carried balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreditOutcome {
    /// Part of the month's flextime added to the balance.
    pub credited_minutes: i32,
    /// Part of the month's flextime lost to the monthly cap.
    pub forfeited_minutes: i32,
    /// Correction applied by the annual limits.
    pub annual_limit_adjustment: i32,
    /// Balance carried into the next month.
    pub carryover_end: i32,
}

/// Applies `rules` to a month.
#[must_use]
pub fn apply_credit(
    rules: &EvaluationRules,
    carryover_start: i32,
    month_net: i32,
) -> CreditOutcome {
    match rules.credit_type {
        CreditType::NoEvaluation => no_evaluation(carryover_start, month_net),
        CreditType::CompleteCarryover => complete_carryover(rules, carryover_start, month_net),
        CreditType::AfterThreshold => after_threshold(rules, carryover_start, month_net),
        CreditType::NoCarryover => CreditOutcome {
            credited_minutes: month_net,
            ..CreditOutcome::default()
        },
    }
}

/// `end = start + month_net`.
#[must_use]
pub fn no_evaluation(carryover_start: i32, month_net: i32) -> CreditOutcome {
    CreditOutcome {
        credited_minutes: month_net,
        forfeited_minutes: 0,
        annual_limit_adjustment: 0,
        carryover_end: carryover_start.saturating_add(month_net),
    }
}

fn complete_carryover(
    rules: &EvaluationRules,
    carryover_start: i32,
    month_net: i32,
) -> CreditOutcome {
    let forfeited = rules
        .monthly_cap_minutes
        .map_or(0, |cap| (month_net - cap).max(0));
    let credited = month_net - forfeited;
    let unclamped = carryover_start.saturating_add(credited);

    let mut end = unclamped;
    if let Some(upper) = rules.annual_upper_limit_minutes {
        end = end.min(upper);
    }
    if let Some(lower) = rules.annual_lower_limit_minutes {
        end = end.max(lower);
    }

    CreditOutcome {
        credited_minutes: credited,
        forfeited_minutes: forfeited,
        annual_limit_adjustment: end - unclamped,
        carryover_end: end,
    }
}

fn after_threshold(
    rules: &EvaluationRules,
    carryover_start: i32,
    month_net: i32,
) -> CreditOutcome {
    let threshold = rules.threshold_minutes.unwrap_or(0).max(0);
    let credited = if month_net > threshold {
        month_net - threshold
    } else if month_net < -threshold {
        month_net + threshold
    } else {
        0
    };

    CreditOutcome {
        credited_minutes: credited,
        forfeited_minutes: 0,
        annual_limit_adjustment: 0,
        carryover_end: carryover_start.saturating_add(credited),
    }
}
