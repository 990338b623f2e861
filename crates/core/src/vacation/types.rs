//! Vacation entitlement types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{CalculationGroupId, EmployeeId};

/// What a vacation year is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationBasis {
    /// January 1 to December 31.
    #[default]
    CalendarYear,
    /// Entry anniversary to the day before the next anniversary.
    EntryDate,
}

/// Condition of a bonus rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialCalculationType {
    /// Full years of age.
    Age,
    /// Full years of service.
    Tenure,
    /// Recognised disability; the threshold is ignored.
    Disability,
}

/// A bonus rule granting extra vacation days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationSpecialCalculation {
    /// Condition kind.
    pub kind: SpecialCalculationType,
    /// Years required for age and tenure rules.
    pub threshold_years: u32,
    /// Days granted when the condition holds.
    pub bonus_days: Decimal,
}

impl VacationSpecialCalculation {
    /// An age rule.
    #[must_use]
    pub fn age(threshold_years: u32, bonus_days: Decimal) -> Self {
        Self {
            kind: SpecialCalculationType::Age,
            threshold_years,
            bonus_days,
        }
    }

    /// A tenure rule.
    #[must_use]
    pub fn tenure(threshold_years: u32, bonus_days: Decimal) -> Self {
        Self {
            kind: SpecialCalculationType::Tenure,
            threshold_years,
            bonus_days,
        }
    }

    /// A disability rule.
    #[must_use]
    pub fn disability(bonus_days: Decimal) -> Self {
        Self {
            kind: SpecialCalculationType::Disability,
            threshold_years: 0,
            bonus_days,
        }
    }
}

/// Vacation rules shared by an employment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationCalculationGroup {
    /// Unique identifier.
    pub id: CalculationGroupId,
    /// Display name.
    pub name: String,
    /// Vacation year basis.
    pub basis: VacationBasis,
    /// Bonus rules; all qualifying rules stack.
    pub special_calculations: Vec<VacationSpecialCalculation>,
}

impl VacationCalculationGroup {
    /// Creates a group without bonus rules.
    #[must_use]
    pub fn new(name: impl Into<String>, basis: VacationBasis) -> Self {
        Self {
            id: CalculationGroupId::new(),
            name: name.into(),
            basis,
            special_calculations: Vec::new(),
        }
    }
}

/// The dates a vacation year covers, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPeriod {
    /// First day.
    pub start: NaiveDate,
    /// Last day.
    pub end: NaiveDate,
}

impl VacationPeriod {
    /// Returns true if `date` lies in the period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// One applied bonus rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusLine {
    /// Condition kind.
    pub kind: SpecialCalculationType,
    /// Years required, 0 for disability.
    pub threshold_years: u32,
    /// Days granted.
    pub bonus_days: Decimal,
}

/// A vacation entitlement with every intermediate value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationEntitlement {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Target year.
    pub year: i32,
    /// Basis the period was derived from.
    pub basis: VacationBasis,
    /// The vacation year.
    pub period: VacationPeriod,
    /// Full-year entitlement before any adjustment.
    pub base_days: Decimal,
    /// Monthly slices of the period with at least one employed day.
    pub months_employed: u32,
    /// `base * months / 12`.
    pub prorated_days: Decimal,
    /// `weekly_hours / standard_weekly_hours`, or 1.
    pub part_time_factor: Decimal,
    /// `prorated * part_time_factor`.
    pub part_time_adjusted_days: Decimal,
    /// Sum of applied bonuses.
    pub bonus_days: Decimal,
    /// Applied bonus rules.
    pub bonuses: Vec<BonusLine>,
    /// Total rounded to the nearest half day.
    pub total_days: Decimal,
}
