//! In-memory result store.

use chrono::NaiveDate;
use dashmap::DashMap;
use timeledger_shared::types::EmployeeId;

use super::{ResultStore, StoreError};
use crate::accounts::{AccountValueKey, DailyAccountValue};
use crate::daily::DailyValue;
use crate::monthly::MonthlyValue;

type MonthKey = (EmployeeId, i32, u32);

/// A [`ResultStore`] backed by concurrent hash maps.
///
/// Used by tests and by hosts that do not persist results. Safe to share
/// across the threads of a parallel batch.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    daily: DashMap<(EmployeeId, NaiveDate), DailyValue>,
    accounts: DashMap<AccountValueKey, DailyAccountValue>,
    monthly: DashMap<MonthKey, MonthlyValue>,
}

impl InMemoryResultStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored daily values.
    #[must_use]
    pub fn daily_count(&self) -> usize {
        self.daily.len()
    }

    /// Number of stored account postings.
    #[must_use]
    pub fn account_value_count(&self) -> usize {
        self.accounts.len()
    }
}

impl ResultStore for InMemoryResultStore {
    fn upsert_daily_value(&self, value: DailyValue) -> Result<(), StoreError> {
        self.daily.insert((value.employee_id, value.date), value);
        Ok(())
    }

    fn daily_value(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Option<DailyValue>, StoreError> {
        Ok(self
            .daily
            .get(&(employee_id, date))
            .map(|entry| entry.value().clone()))
    }

    fn daily_values_between(
        &self,
        employee_id: EmployeeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyValue>, StoreError> {
        let mut values: Vec<DailyValue> = self
            .daily
            .iter()
            .filter(|entry| {
                let (employee, date) = *entry.key();
                employee == employee_id && date >= from && date <= to
            })
            .map(|entry| entry.value().clone())
            .collect();
        values.sort_by_key(|v| v.date);
        Ok(values)
    }

    fn upsert_account_value(&self, value: DailyAccountValue) -> Result<(), StoreError> {
        self.accounts.insert(value.key(), value);
        Ok(())
    }

    fn account_values_for_day(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> Result<Vec<DailyAccountValue>, StoreError> {
        let mut values: Vec<DailyAccountValue> = self
            .accounts
            .iter()
            .filter(|entry| entry.key().employee_id == employee_id && entry.key().date == date)
            .map(|entry| *entry.value())
            .collect();
        values.sort_by_key(DailyAccountValue::key);
        Ok(values)
    }

    fn delete_account_value(&self, key: &AccountValueKey) -> Result<bool, StoreError> {
        Ok(self.accounts.remove(key).is_some())
    }

    fn upsert_monthly_value(&self, value: MonthlyValue) -> Result<(), StoreError> {
        self.monthly
            .insert((value.employee_id, value.year, value.month), value);
        Ok(())
    }

    fn monthly_value(
        &self,
        employee_id: EmployeeId,
        year: i32,
        month: u32,
    ) -> Result<Option<MonthlyValue>, StoreError> {
        Ok(self
            .monthly
            .get(&(employee_id, year, month))
            .map(|entry| entry.value().clone()))
    }
}
