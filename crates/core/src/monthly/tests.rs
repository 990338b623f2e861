//! Property-based tests for monthly evaluation.

use proptest::prelude::*;
use timeledger_shared::types::EmployeeId;

use super::*;
use crate::tariff::{CreditType, EvaluationRules};

fn carryover() -> impl Strategy<Value = i32> {
    -20_000i32..=20_000
}

fn month_net() -> impl Strategy<Value = i32> {
    -10_000i32..=10_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// `complete_carryover` forfeits exactly the part above the cap and
    /// clamps the end into the annual limits.
    #[test]
    fn prop_complete_carryover_formula(
        start in carryover(),
        net in month_net(),
        cap in 0i32..=3_000,
        lower in -6_000i32..=0,
        upper in 0i32..=6_000,
    ) {
        let rules = EvaluationRules {
            monthly_cap_minutes: Some(cap),
            annual_lower_limit_minutes: Some(lower),
            annual_upper_limit_minutes: Some(upper),
            ..EvaluationRules::of(CreditType::CompleteCarryover)
        };

        let outcome = apply_credit(&rules, start, net);

        let forfeited = (net - cap).max(0);
        prop_assert_eq!(outcome.forfeited_minutes, forfeited);
        prop_assert_eq!(outcome.carryover_end, (start + net - forfeited).clamp(lower, upper));
        prop_assert!(outcome.carryover_end >= lower && outcome.carryover_end <= upper);
    }

    /// `no_carryover` always ends at zero.
    #[test]
    fn prop_no_carryover_ends_at_zero(start in carryover(), net in month_net()) {
        let outcome = apply_credit(&EvaluationRules::of(CreditType::NoCarryover), start, net);
        prop_assert_eq!(outcome.carryover_end, 0);
    }

    /// `after_threshold` never credits more than the month's flextime and
    /// keeps its sign.
    #[test]
    fn prop_after_threshold_bounded(
        start in carryover(),
        net in month_net(),
        threshold in 0i32..=2_000,
    ) {
        let rules = EvaluationRules {
            threshold_minutes: Some(threshold),
            ..EvaluationRules::of(CreditType::AfterThreshold)
        };

        let outcome = apply_credit(&rules, start, net);

        prop_assert!(outcome.credited_minutes.abs() <= net.abs());
        prop_assert!(outcome.credited_minutes == 0 || outcome.credited_minutes.signum() == net.signum());
        prop_assert_eq!(outcome.carryover_end, start + outcome.credited_minutes);
    }

    /// Chained months link: each start equals the previous end.
    #[test]
    fn prop_chain_links_months(
        initial in carryover(),
        count in 1usize..=12,
        credit_type in prop_oneof![
            Just(CreditType::NoEvaluation),
            Just(CreditType::CompleteCarryover),
            Just(CreditType::AfterThreshold),
            Just(CreditType::NoCarryover),
        ],
    ) {
        let employee_id = EmployeeId::new();
        let rules = EvaluationRules {
            monthly_cap_minutes: Some(600),
            threshold_minutes: Some(120),
            annual_upper_limit_minutes: Some(2_400),
            annual_lower_limit_minutes: Some(-2_400),
            credit_type,
        };
        let months: Vec<MonthlyInput<'_>> = (1..=count)
            .map(|month| MonthlyInput {
                employee_id,
                year: 2026,
                month: u32::try_from(month).unwrap(),
                daily_values: &[],
                absences: &[],
                carryover_start: 0,
                tariff_resolved: true,
                rules: Some(rules),
            })
            .collect();

        let values = MonthlyEvaluator::evaluate_chain(initial, &months, |_| None);

        prop_assert_eq!(values.len(), count);
        prop_assert_eq!(values[0].carryover_start, initial);
        for pair in values.windows(2) {
            prop_assert_eq!(pair[1].carryover_start, pair[0].carryover_end);
        }
    }
}

#[test]
fn test_month_bounds() {
    use chrono::NaiveDate;

    let (first, last) = month_bounds(2028, 2).unwrap();
    assert_eq!(first, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());

    let (_, december_end) = month_bounds(2026, 12).unwrap();
    assert_eq!(december_end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());

    assert!(month_bounds(2026, 13).is_none());
    assert_eq!(previous_month(2026, 1), (2025, 12));
    assert_eq!(previous_month(2026, 7), (2026, 6));
}
