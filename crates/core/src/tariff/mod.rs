//! Tariffs: weekly targets, week plans, and flextime evaluation policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::TariffId;

use crate::day_plan::WeekPlan;
use crate::minutes::round_to_minutes;

/// Policy for rolling a month's flextime into the next month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditType {
    /// Pass the month's flextime through unchanged.
    #[default]
    NoEvaluation,
    /// Credit the month, forfeit the part above the monthly cap, clamp to
    /// the annual limits.
    CompleteCarryover,
    /// Credit only the part beyond the threshold.
    AfterThreshold,
    /// Reset the balance to zero every month.
    NoCarryover,
}

/// Flextime evaluation rules attached to a tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationRules {
    /// Policy.
    pub credit_type: CreditType,
    /// Maximum flextime credited per month (`complete_carryover`).
    pub monthly_cap_minutes: Option<i32>,
    /// Minutes at or below which a month neither adds nor subtracts
    /// (`after_threshold`).
    pub threshold_minutes: Option<i32>,
    /// Highest balance that may be carried (`complete_carryover`).
    pub annual_upper_limit_minutes: Option<i32>,
    /// Lowest balance that may be carried, usually negative
    /// (`complete_carryover`).
    pub annual_lower_limit_minutes: Option<i32>,
}

impl EvaluationRules {
    /// Rules for a given credit type with no limits.
    #[must_use]
    pub const fn of(credit_type: CreditType) -> Self {
        Self {
            credit_type,
            monthly_cap_minutes: None,
            threshold_minutes: None,
            annual_upper_limit_minutes: None,
            annual_lower_limit_minutes: None,
        }
    }
}

/// A tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tariff {
    /// Unique identifier.
    pub id: TariffId,
    /// Display name.
    pub name: String,
    /// Contractual full-time weekly hours.
    pub weekly_target_hours: Option<Decimal>,
    /// Work days per week; falls back to the engine default.
    pub work_days_per_week: Option<u8>,
    /// Full-year vacation entitlement in days.
    pub annual_vacation_days: Option<Decimal>,
    /// Day plans by weekday.
    pub week_plan: Option<WeekPlan>,
    /// Flextime evaluation rules; `None` means no evaluation.
    pub evaluation: Option<EvaluationRules>,
}

impl Tariff {
    /// Creates a tariff with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: TariffId::new(),
            name: name.into(),
            weekly_target_hours: None,
            work_days_per_week: None,
            annual_vacation_days: None,
            week_plan: None,
            evaluation: None,
        }
    }

    /// Daily target derived from the weekly hours.
    ///
    /// `weekly_target_hours * 60 / work_days`, rounded to whole minutes.
    /// `None` when the tariff has no weekly hours.
    #[must_use]
    pub fn daily_target_minutes(&self, default_work_days: u8) -> Option<i32> {
        let hours = self.weekly_target_hours?;
        let days = self.work_days_per_week.unwrap_or(default_work_days);
        if days == 0 {
            return None;
        }
        Some(round_to_minutes(
            hours * Decimal::from(60) / Decimal::from(days),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_daily_target_from_weekly_hours() {
        let mut tariff = Tariff::new("Standard");
        tariff.weekly_target_hours = Some(dec!(40));
        assert_eq!(tariff.daily_target_minutes(5), Some(480));

        tariff.weekly_target_hours = Some(dec!(38.5));
        assert_eq!(tariff.daily_target_minutes(5), Some(462));
    }

    #[test]
    fn test_tariff_work_days_override_default() {
        let mut tariff = Tariff::new("Six day");
        tariff.weekly_target_hours = Some(dec!(36));
        tariff.work_days_per_week = Some(6);
        assert_eq!(tariff.daily_target_minutes(5), Some(360));
    }

    #[test]
    fn test_no_weekly_hours() {
        let tariff = Tariff::new("Empty");
        assert_eq!(tariff.daily_target_minutes(5), None);
    }

    #[test]
    fn test_credit_type_serde() {
        let json = serde_json::to_string(&CreditType::CompleteCarryover).unwrap();
        assert_eq!(json, "\"complete_carryover\"");
        let parsed: CreditType = serde_json::from_str("\"after_threshold\"").unwrap();
        assert_eq!(parsed, CreditType::AfterThreshold);
    }
}
