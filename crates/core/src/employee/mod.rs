//! Employee attributes consumed by the engine.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{EmployeeId, EmploymentTypeId, TariffId};

/// Employee attributes read by the calculation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// First day of employment.
    pub entry_date: NaiveDate,
    /// Last day of employment, if terminated.
    pub exit_date: Option<NaiveDate>,
    /// Date of birth, used for age-based vacation bonuses.
    pub birth_date: Option<NaiveDate>,
    /// Whether the employee has a recognised disability.
    pub has_disability: bool,
    /// Contractual weekly hours; `None` means full time.
    pub weekly_hours: Option<Decimal>,
    /// Assigned tariff.
    pub tariff_id: Option<TariffId>,
    /// Employment type, which links to a vacation calculation group.
    pub employment_type_id: Option<EmploymentTypeId>,
    /// Individual annual vacation days replacing the tariff's value.
    pub vacation_days_override: Option<Decimal>,
}

impl Employee {
    /// Creates a full-time employee with no optional attributes.
    #[must_use]
    pub fn new(entry_date: NaiveDate) -> Self {
        Self {
            id: EmployeeId::new(),
            entry_date,
            exit_date: None,
            birth_date: None,
            has_disability: false,
            weekly_hours: None,
            tariff_id: None,
            employment_type_id: None,
            vacation_days_override: None,
        }
    }

    /// Returns true if `date` lies within the employment.
    #[must_use]
    pub fn is_employed_on(&self, date: NaiveDate) -> bool {
        date >= self.entry_date && self.exit_date.is_none_or(|exit| date <= exit)
    }

    /// Full years of age on `date`, if the birth date is known.
    #[must_use]
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        self.birth_date.map(|birth| full_years_between(birth, date))
    }

    /// Full years of service on `date`.
    #[must_use]
    pub fn tenure_on(&self, date: NaiveDate) -> u32 {
        full_years_between(self.entry_date, date)
    }
}

/// Number of completed years from `from` to `to`; zero if `to` is earlier.
#[must_use]
pub fn full_years_between(from: NaiveDate, to: NaiveDate) -> u32 {
    if to <= from {
        return 0;
    }
    let mut years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}
