//! Absence types and absence days.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{AbsenceTypeId, CalculationRuleId};

/// Reporting category of an absence type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsenceCategory {
    /// Paid vacation, deducted from the entitlement.
    Vacation,
    /// Sickness.
    Illness,
    /// Special leave (training, family events, ...).
    Special,
    /// Unpaid leave.
    Unpaid,
}

/// An absence type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceType {
    /// Unique identifier.
    pub id: AbsenceTypeId,
    /// Short code (e.g. "U" for vacation).
    pub code: String,
    /// Reporting category.
    pub category: AbsenceCategory,
    /// Rule crediting minutes to an account on absence days.
    pub calculation_rule_id: Option<CalculationRuleId>,
}

/// Approval status of an absence day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceStatus {
    /// Requested, not yet decided.
    Pending,
    /// Approved; the only status the engine evaluates.
    Approved,
    /// Rejected.
    Rejected,
    /// Withdrawn.
    Cancelled,
}

/// A single day (or half day) of absence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceDay {
    /// The date.
    pub date: NaiveDate,
    /// The absence type.
    pub absence_type_id: AbsenceTypeId,
    /// Fraction of the day, `1` for a full day and `0.5` for a half day.
    pub duration: Decimal,
    /// Approval status.
    pub status: AbsenceStatus,
}

impl AbsenceDay {
    /// An approved full-day absence.
    #[must_use]
    pub fn approved(date: NaiveDate, absence_type_id: AbsenceTypeId) -> Self {
        Self {
            date,
            absence_type_id,
            duration: Decimal::ONE,
            status: AbsenceStatus::Approved,
        }
    }

    /// Returns true if the absence counts.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == AbsenceStatus::Approved
    }

    /// Returns true if the absence covers the whole day.
    #[must_use]
    pub fn is_full_day(&self) -> bool {
        self.duration >= Decimal::ONE
    }

    /// Duration limited to `0..=1`.
    #[must_use]
    pub fn clamped_duration(&self) -> Decimal {
        self.duration.clamp(Decimal::ZERO, Decimal::ONE)
    }
}

/// Absence totals for a period, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbsenceTotals {
    /// Vacation days.
    pub vacation_days: Decimal,
    /// Illness days.
    pub illness_days: Decimal,
    /// Special leave days.
    pub special_days: Decimal,
    /// Unpaid leave days.
    pub unpaid_days: Decimal,
    /// Days whose absence type could not be resolved.
    pub unresolved_days: Decimal,
}

impl AbsenceTotals {
    /// Adds `days` to the bucket for `category`.
    pub fn add(&mut self, category: Option<AbsenceCategory>, days: Decimal) {
        let bucket = match category {
            Some(AbsenceCategory::Vacation) => &mut self.vacation_days,
            Some(AbsenceCategory::Illness) => &mut self.illness_days,
            Some(AbsenceCategory::Special) => &mut self.special_days,
            Some(AbsenceCategory::Unpaid) => &mut self.unpaid_days,
            None => &mut self.unresolved_days,
        };
        *bucket += days;
    }

    /// Sum over all buckets.
    #[must_use]
    pub fn total_days(&self) -> Decimal {
        self.vacation_days
            + self.illness_days
            + self.special_days
            + self.unpaid_days
            + self.unresolved_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_and_duration() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let mut day = AbsenceDay::approved(date, AbsenceTypeId::new());
        assert!(day.is_approved());
        assert!(day.is_full_day());

        day.duration = dec!(0.5);
        day.status = AbsenceStatus::Pending;
        assert!(!day.is_approved());
        assert!(!day.is_full_day());

        day.duration = dec!(1.5);
        assert_eq!(day.clamped_duration(), Decimal::ONE);
    }

    #[test]
    fn test_totals() {
        let mut totals = AbsenceTotals::default();
        totals.add(Some(AbsenceCategory::Vacation), dec!(1));
        totals.add(Some(AbsenceCategory::Vacation), dec!(0.5));
        totals.add(Some(AbsenceCategory::Illness), dec!(2));
        totals.add(None, dec!(1));

        assert_eq!(totals.vacation_days, dec!(1.5));
        assert_eq!(totals.illness_days, dec!(2));
        assert_eq!(totals.unresolved_days, dec!(1));
        assert_eq!(totals.total_days(), dec!(4.5));
    }
}
