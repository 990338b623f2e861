//! Annual vacation entitlement.

use rust_decimal::prelude::*;

use super::error::VacationError;
use super::period::{months_employed, vacation_period};
use super::types::{
    BonusLine, SpecialCalculationType, VacationBasis, VacationCalculationGroup,
    VacationEntitlement, VacationSpecialCalculation,
};
use crate::employee::Employee;

const MONTHS_PER_YEAR: u32 = 12;

/// Inputs of one entitlement calculation.
#[derive(Debug, Clone, Copy)]
pub struct VacationInput<'a> {
    /// The employee.
    pub employee: &'a Employee,
    /// Target year.
    pub year: i32,
    /// Full-year entitlement from the tariff, used when the employee has
    /// no individual value.
    pub tariff_days: Option<Decimal>,
    /// Full-time weekly hours the part-time factor is measured against.
    pub standard_weekly_hours: Option<Decimal>,
    /// The employee's calculation group; `None` means calendar years and
    /// no bonuses.
    pub group: Option<&'a VacationCalculationGroup>,
}

/// Computes vacation entitlements.
pub struct VacationEntitlementCalculator;

impl VacationEntitlementCalculator {
    /// Calculates the entitlement for one employee and year.
    ///
    /// Steps:
    /// 1. Period from the group's basis
    /// 2. Months employed within the period
    /// 3. Proration: `base * months / 12`
    /// 4. Part-time scaling
    /// 5. Age, tenure, and disability bonuses at the period start
    /// 6. Rounding to the nearest half day
    ///
    /// # Errors
    ///
    /// Returns `VacationError::YearOutOfRange` if the period cannot be
    /// represented.
    pub fn calculate(input: &VacationInput<'_>) -> Result<VacationEntitlement, VacationError> {
        let employee = input.employee;
        let basis = input.group.map_or(VacationBasis::CalendarYear, |g| g.basis);
        let period = vacation_period(basis, employee.entry_date, input.year)?;

        let base_days = employee
            .vacation_days_override
            .or(input.tariff_days)
            .unwrap_or(Decimal::ZERO);
        let months = months_employed(&period, employee);
        let prorated_days = base_days * Decimal::from(months) / Decimal::from(MONTHS_PER_YEAR);

        let part_time_factor = Self::part_time_factor(employee, input.standard_weekly_hours);
        let part_time_adjusted_days = prorated_days * part_time_factor;

        let bonuses: Vec<BonusLine> = if months == 0 {
            Vec::new()
        } else {
            input
                .group
                .map(|group| group.special_calculations.as_slice())
                .unwrap_or_default()
                .iter()
                .filter(|rule| Self::qualifies(rule, employee, period.start))
                .map(|rule| BonusLine {
                    kind: rule.kind,
                    threshold_years: rule.threshold_years,
                    bonus_days: rule.bonus_days,
                })
                .collect()
        };
        let bonus_days: Decimal = bonuses.iter().map(|line| line.bonus_days).sum();

        let total_days = round_to_half(part_time_adjusted_days + bonus_days);

        tracing::debug!(
            employee_id = %employee.id,
            year = input.year,
            months,
            total = %total_days,
            "Vacation entitlement calculated"
        );

        Ok(VacationEntitlement {
            employee_id: employee.id,
            year: input.year,
            basis,
            period,
            base_days,
            months_employed: months,
            prorated_days,
            part_time_factor,
            part_time_adjusted_days,
            bonus_days,
            bonuses,
            total_days,
        })
    }

    /// `weekly_hours / standard`, or 1 when either is unknown or the
    /// standard is not positive.
    #[must_use]
    pub fn part_time_factor(
        employee: &Employee,
        standard_weekly_hours: Option<Decimal>,
    ) -> Decimal {
        match (employee.weekly_hours, standard_weekly_hours) {
            (Some(hours), Some(standard)) if standard > Decimal::ZERO => hours / standard,
            _ => Decimal::ONE,
        }
    }

    fn qualifies(
        rule: &VacationSpecialCalculation,
        employee: &Employee,
        reference: chrono::NaiveDate,
    ) -> bool {
        match rule.kind {
            SpecialCalculationType::Age => employee
                .age_on(reference)
                .is_some_and(|age| age >= rule.threshold_years),
            SpecialCalculationType::Tenure => employee.tenure_on(reference) >= rule.threshold_years,
            SpecialCalculationType::Disability => employee.has_disability,
        }
    }
}

/// Rounds to the nearest multiple of 0.5, midpoint away from zero.
#[must_use]
pub fn round_to_half(days: Decimal) -> Decimal {
    let two = Decimal::TWO;
    (days * two).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero) / two
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input<'a>(
        employee: &'a Employee,
        group: Option<&'a VacationCalculationGroup>,
    ) -> VacationInput<'a> {
        VacationInput {
            employee,
            year: 2026,
            tariff_days: Some(dec!(30)),
            standard_weekly_hours: Some(dec!(40)),
            group,
        }
    }

    #[test]
    fn test_entry_in_march_prorates() {
        let employee = Employee::new(date(2026, 3, 1));

        let entitlement = VacationEntitlementCalculator::calculate(&input(&employee, None)).unwrap();

        assert_eq!(entitlement.months_employed, 10);
        assert_eq!(entitlement.prorated_days, dec!(25.0));
        assert_eq!(entitlement.total_days, dec!(25.0));
    }

    #[test]
    fn test_age_and_tenure_bonuses_stack() {
        let mut employee = Employee::new(date(2019, 1, 1));
        employee.birth_date = Some(date(1974, 1, 1));
        let mut group = VacationCalculationGroup::new("Staff", VacationBasis::CalendarYear);
        group.special_calculations = vec![
            VacationSpecialCalculation::age(50, dec!(2)),
            VacationSpecialCalculation::tenure(5, dec!(1)),
            VacationSpecialCalculation::tenure(10, dec!(2)),
        ];

        let entitlement =
            VacationEntitlementCalculator::calculate(&input(&employee, Some(&group))).unwrap();

        assert_eq!(entitlement.bonus_days, dec!(3));
        assert_eq!(entitlement.bonuses.len(), 2);
        assert_eq!(entitlement.total_days, dec!(33));
    }

    #[test]
    fn test_missing_birth_date_skips_age_rules() {
        let employee = Employee::new(date(2019, 1, 1));
        let mut group = VacationCalculationGroup::new("Staff", VacationBasis::CalendarYear);
        group.special_calculations = vec![VacationSpecialCalculation::age(18, dec!(2))];

        let entitlement =
            VacationEntitlementCalculator::calculate(&input(&employee, Some(&group))).unwrap();

        assert_eq!(entitlement.bonus_days, Decimal::ZERO);
    }

    #[test]
    fn test_disability_bonus() {
        let mut employee = Employee::new(date(2019, 1, 1));
        employee.has_disability = true;
        let mut group = VacationCalculationGroup::new("Staff", VacationBasis::CalendarYear);
        group.special_calculations = vec![VacationSpecialCalculation::disability(dec!(5))];

        let entitlement =
            VacationEntitlementCalculator::calculate(&input(&employee, Some(&group))).unwrap();

        assert_eq!(entitlement.total_days, dec!(35));
    }

    #[test]
    fn test_no_bonus_without_employment() {
        let mut employee = Employee::new(date(2027, 2, 1));
        employee.has_disability = true;
        let mut group = VacationCalculationGroup::new("Staff", VacationBasis::CalendarYear);
        group.special_calculations = vec![VacationSpecialCalculation::disability(dec!(5))];

        let entitlement =
            VacationEntitlementCalculator::calculate(&input(&employee, Some(&group))).unwrap();

        assert_eq!(entitlement.months_employed, 0);
        assert_eq!(entitlement.total_days, Decimal::ZERO);
    }

    #[test]
    fn test_part_time_and_override() {
        let mut employee = Employee::new(date(2019, 1, 1));
        employee.weekly_hours = Some(dec!(20));
        employee.vacation_days_override = Some(dec!(28));

        let entitlement = VacationEntitlementCalculator::calculate(&input(&employee, None)).unwrap();

        assert_eq!(entitlement.base_days, dec!(28));
        assert_eq!(entitlement.part_time_factor, dec!(0.5));
        assert_eq!(entitlement.total_days, dec!(14));
    }

    #[test]
    fn test_part_time_factor_defaults_to_one() {
        let mut employee = Employee::new(date(2019, 1, 1));
        employee.weekly_hours = Some(dec!(20));
        assert_eq!(
            VacationEntitlementCalculator::part_time_factor(&employee, None),
            Decimal::ONE
        );
        assert_eq!(
            VacationEntitlementCalculator::part_time_factor(&employee, Some(Decimal::ZERO)),
            Decimal::ONE
        );
    }

    #[test]
    fn test_entry_date_basis_reference_date() {
        // Tenure is measured at the anniversary, so the fifth anniversary
        // already qualifies.
        let employee = Employee::new(date(2021, 7, 1));
        let mut group = VacationCalculationGroup::new("Anniversary", VacationBasis::EntryDate);
        group.special_calculations = vec![VacationSpecialCalculation::tenure(5, dec!(1))];

        let entitlement =
            VacationEntitlementCalculator::calculate(&input(&employee, Some(&group))).unwrap();

        assert_eq!(entitlement.period.start, date(2026, 7, 1));
        assert_eq!(entitlement.months_employed, 12);
        assert_eq!(entitlement.total_days, dec!(31));
    }

    #[rstest]
    #[case(dec!(25.0), dec!(25.0))]
    #[case(dec!(25.24), dec!(25.0))]
    #[case(dec!(25.25), dec!(25.5))]
    #[case(dec!(25.74), dec!(25.5))]
    #[case(dec!(25.75), dec!(26.0))]
    #[case(dec!(17.5), dec!(17.5))]
    fn test_round_to_half(#[case] days: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_to_half(days), expected);
    }
}
