//! Remaining vacation days.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::AbsenceTypeId;

use super::types::{VacationEntitlement, VacationPeriod};
use crate::absence::{AbsenceCategory, AbsenceDay};

/// Entitlement, carryover, and taken days of one vacation year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    /// Entitlement of the year.
    pub entitlement_days: Decimal,
    /// Days carried over from the previous year.
    pub carryover_days: Decimal,
    /// Days already taken.
    pub taken_days: Decimal,
    /// `entitlement + carryover - taken`; negative when overdrawn.
    pub remaining_days: Decimal,
}

impl VacationBalance {
    /// Builds the balance for an entitlement.
    #[must_use]
    pub fn new(
        entitlement: &VacationEntitlement,
        carryover_days: Decimal,
        taken_days: Decimal,
    ) -> Self {
        Self {
            entitlement_days: entitlement.total_days,
            carryover_days,
            taken_days,
            remaining_days: entitlement.total_days + carryover_days - taken_days,
        }
    }

    /// Sums approved vacation days within `period`.
    pub fn taken_in<F>(period: &VacationPeriod, absences: &[AbsenceDay], category_of: F) -> Decimal
    where
        F: Fn(AbsenceTypeId) -> Option<AbsenceCategory>,
    {
        absences
            .iter()
            .filter(|absence| absence.is_approved() && period.contains(absence.date))
            .filter(|absence| {
                category_of(absence.absence_type_id) == Some(AbsenceCategory::Vacation)
            })
            .map(AbsenceDay::clamped_duration)
            .sum()
    }
}
