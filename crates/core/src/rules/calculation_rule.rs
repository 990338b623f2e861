//! Calculation rules crediting minutes for absence days.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{AccountId, CalculationRuleId};

use super::error::RuleValidationError;
use crate::minutes::round_to_minutes;

/// A rule computing the minutes credited to an account for an absence day.
///
/// `value == 0` means "use the day's target time". Rules are validated when
/// they are created or edited; evaluation trusts the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRule {
    /// Unique identifier.
    pub id: CalculationRuleId,
    /// Display name.
    pub name: String,
    /// Fixed minutes, or 0 to use the daily target.
    pub value_minutes: i32,
    /// Multiplier applied to the base minutes.
    pub factor: Decimal,
    /// Account receiving the credited minutes.
    pub account_id: Option<AccountId>,
}

impl CalculationRule {
    /// Creates a validated rule.
    ///
    /// # Errors
    ///
    /// Returns `RuleValidationError` if the factor is not positive or the
    /// value is negative.
    pub fn new(
        name: impl Into<String>,
        value_minutes: i32,
        factor: Decimal,
        account_id: Option<AccountId>,
    ) -> Result<Self, RuleValidationError> {
        Self::validate(value_minutes, factor)?;
        Ok(Self {
            id: CalculationRuleId::new(),
            name: name.into(),
            value_minutes,
            factor,
            account_id,
        })
    }

    /// Validates rule parameters.
    ///
    /// # Errors
    ///
    /// Returns `RuleValidationError` if the factor is not positive or the
    /// value is negative.
    pub fn validate(value_minutes: i32, factor: Decimal) -> Result<(), RuleValidationError> {
        if factor <= Decimal::ZERO {
            return Err(RuleValidationError::NonPositiveFactor(factor));
        }
        if value_minutes < 0 {
            return Err(RuleValidationError::NegativeValue(value_minutes));
        }
        Ok(())
    }

    /// Minutes credited for one full absence day.
    ///
    /// `(value > 0 ? value : daily_target) * factor`, rounded to whole minutes.
    #[must_use]
    pub fn account_value(&self, daily_target_minutes: i32) -> i32 {
        round_to_minutes(self.base_minutes(daily_target_minutes) * self.factor)
    }

    /// Minutes credited for an absence covering `duration` of a day.
    #[must_use]
    pub fn account_value_for(&self, daily_target_minutes: i32, duration: Decimal) -> i32 {
        round_to_minutes(self.base_minutes(daily_target_minutes) * self.factor * duration)
    }

    fn base_minutes(&self, daily_target_minutes: i32) -> Decimal {
        if self.value_minutes > 0 {
            Decimal::from(self.value_minutes)
        } else {
            Decimal::from(daily_target_minutes)
        }
    }
}
