//! Persistence seam for computed results.
//!
//! Every write is an upsert on the value's natural key, so recomputing the
//! same unit never produces duplicates.

pub mod error;
pub mod memory;

use chrono::NaiveDate;
use timeledger_shared::types::EmployeeId;

pub use error::StoreError;
pub use memory::InMemoryResultStore;

use crate::accounts::{AccountValueKey, DailyAccountValue};
use crate::daily::DailyValue;
use crate::monthly::MonthlyValue;

/// Storage for daily values, account postings, and monthly values.
///
/// Implemented by the persistence layer of the host application.
pub trait ResultStore: Send + Sync {
    /// Inserts or replaces the value for (employee, date).
    fn upsert_daily_value(&self, value: DailyValue) -> Result<(), StoreError>;

    /// Returns the value for (employee, date).
    fn daily_value(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<DailyValue>, StoreError>;

    /// Returns the employee's values for `from..=to`, ordered by date.
    fn daily_values_between(
        &self,
        employee_id: EmployeeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyValue>, StoreError>;

    /// Inserts or replaces the value for (employee, date, account, source).
    fn upsert_account_value(&self, value: DailyAccountValue) -> Result<(), StoreError>;

    /// Returns all postings for (employee, date).
    fn account_values_for_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<DailyAccountValue>, StoreError>;

    /// Deletes one posting. Returns true if a row was removed.
    fn delete_account_value(&self, key: &AccountValueKey) -> Result<bool, StoreError>;

    /// Inserts or replaces the value for (employee, year, month).
    fn upsert_monthly_value(&self, value: MonthlyValue) -> Result<(), StoreError>;

    /// Returns the value for (employee, year, month).
    fn monthly_value(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyValue>, StoreError>;
}
