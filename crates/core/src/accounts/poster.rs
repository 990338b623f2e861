//! Derivation and persistence of daily account postings.

use chrono::NaiveDate;
use timeledger_shared::types::EmployeeId;

use super::types::{DailyAccountValue, PostingInstruction, PostingSource};
use crate::absence::AbsenceDay;
use crate::daily::DailyValue;
use crate::day_plan::DayPlan;
use crate::rules::CalculationRule;
use crate::store::{ResultStore, StoreError};

/// Counts of rows touched by [`AccountPoster::post_day`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostingSummary {
    /// Rows inserted or overwritten.
    pub upserted: usize,
    /// Stale rows removed.
    pub removed: usize,
}

/// Turns daily results into account postings.
pub struct AccountPoster;

impl AccountPoster {
    /// Postings produced by the day plan's accounts.
    ///
    /// - Net account: the reported net minutes.
    /// - Cap account (only with a maximum): minutes above the maximum,
    ///   including 0 when the maximum was not exceeded.
    ///
    /// Days without worked or capped minutes produce nothing.
    #[must_use]
    pub fn plan_instructions(plan: &DayPlan, value: &DailyValue) -> Vec<PostingInstruction> {
        if value.is_off_day || value.is_holiday || value.booking_count == 0 {
            return Vec::new();
        }

        let mut instructions = Vec::with_capacity(2);
        if let Some(account_id) = plan.net_account_id {
            instructions.push(PostingInstruction {
                account_id,
                source: PostingSource::NetTime,
                value_minutes: value.net_minutes,
            });
        }
        if let (Some(account_id), Some(_)) = (plan.cap_account_id, plan.max_net_minutes) {
            instructions.push(PostingInstruction {
                account_id,
                source: PostingSource::CappedTime,
                value_minutes: value.capped_minutes,
            });
        }
        instructions
    }

    /// Posting produced by an approved absence whose rule names an account.
    ///
    /// The rule's value is scaled by the absence duration.
    #[must_use]
    pub fn absence_instruction(
        absence: &AbsenceDay,
        rule: &CalculationRule,
        daily_target_minutes: i32,
    ) -> Option<PostingInstruction> {
        if !absence.is_approved() {
            return None;
        }
        let account_id = rule.account_id?;
        Some(PostingInstruction {
            account_id,
            source: PostingSource::AbsenceRule,
            value_minutes: rule.account_value_for(daily_target_minutes, absence.clamped_duration()),
        })
    }

    /// Replaces the postings of one employee and date with `instructions`.
    ///
    /// Each instruction is upserted on its natural key. Existing rows for the
    /// same employee and date that are not produced again are removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store rejects a read or write.
    pub fn post_day<S>(
        store: &S,
        employee_id: EmployeeId,
        date: NaiveDate,
        instructions: &[PostingInstruction],
    ) -> Result<PostingSummary, StoreError>
    where
        S: ResultStore + ?Sized,
    {
        let values: Vec<DailyAccountValue> = instructions
            .iter()
            .map(|instruction| DailyAccountValue {
                employee_id,
                date,
                account_id: instruction.account_id,
                source: instruction.source,
                value_minutes: instruction.value_minutes,
            })
            .collect();

        let mut summary = PostingSummary::default();
        for existing in store.account_values_for_day(employee_id, date)? {
            let key = existing.key();
            if !values.iter().any(|v| v.key() == key) && store.delete_account_value(&key)? {
                summary.removed += 1;
            }
        }

        for value in values {
            store.upsert_account_value(value)?;
            summary.upserted += 1;
        }

        if summary.removed > 0 {
            tracing::debug!(
                employee_id = %employee_id,
                %date,
                removed = summary.removed,
                "Removed stale account postings"
            );
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryResultStore;
    use rust_decimal_macros::dec;
    use timeledger_shared::types::AccountId;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn worked_value(employee_id: EmployeeId, net: i32, capped: i32) -> DailyValue {
        let mut value = DailyValue::empty(employee_id, date());
        value.booking_count = 2;
        value.gross_minutes = net;
        value.net_minutes = net;
        value.capped_minutes = capped;
        value
    }

    #[test]
    fn test_plan_instructions_net_and_cap() {
        let net_account = AccountId::new();
        let cap_account = AccountId::new();
        let mut plan = DayPlan::with_target("FLEX", 480);
        plan.net_account_id = Some(net_account);
        plan.cap_account_id = Some(cap_account);
        plan.max_net_minutes = Some(540);

        let value = worked_value(EmployeeId::new(), 600, 60);
        let instructions = AccountPoster::plan_instructions(&plan, &value);

        assert_eq!(
            instructions,
            vec![
                PostingInstruction {
                    account_id: net_account,
                    source: PostingSource::NetTime,
                    value_minutes: 600,
                },
                PostingInstruction {
                    account_id: cap_account,
                    source: PostingSource::CappedTime,
                    value_minutes: 60,
                },
            ]
        );
    }

    #[test]
    fn test_cap_account_without_maximum_posts_nothing() {
        let mut plan = DayPlan::with_target("FLEX", 480);
        plan.cap_account_id = Some(AccountId::new());

        let value = worked_value(EmployeeId::new(), 480, 0);
        assert!(AccountPoster::plan_instructions(&plan, &value).is_empty());
    }

    #[test]
    fn test_cap_not_exceeded_posts_zero() {
        let mut plan = DayPlan::with_target("FLEX", 480);
        plan.cap_account_id = Some(AccountId::new());
        plan.max_net_minutes = Some(600);

        let value = worked_value(EmployeeId::new(), 480, 0);
        let instructions = AccountPoster::plan_instructions(&plan, &value);
        assert_eq!(instructions.len(), 1);
        assert_eq!(instructions[0].value_minutes, 0);
    }

    #[test]
    fn test_off_day_posts_nothing() {
        let mut plan = DayPlan::with_target("FLEX", 480);
        plan.net_account_id = Some(AccountId::new());

        let mut value = DailyValue::empty(EmployeeId::new(), date());
        value.is_off_day = true;
        assert!(AccountPoster::plan_instructions(&plan, &value).is_empty());
    }

    #[test]
    fn test_absence_instruction() {
        let account_id = AccountId::new();
        let rule = CalculationRule::new("vacation", 0, dec!(1), Some(account_id)).unwrap();
        let mut absence = AbsenceDay::approved(date(), timeledger_shared::types::AbsenceTypeId::new());

        let full = AccountPoster::absence_instruction(&absence, &rule, 480).unwrap();
        assert_eq!(full.value_minutes, 480);
        assert_eq!(full.source, PostingSource::AbsenceRule);

        absence.duration = dec!(0.5);
        let half = AccountPoster::absence_instruction(&absence, &rule, 480).unwrap();
        assert_eq!(half.value_minutes, 240);

        absence.status = crate::absence::AbsenceStatus::Pending;
        assert!(AccountPoster::absence_instruction(&absence, &rule, 480).is_none());

        let no_account = CalculationRule::new("unpaid", 0, dec!(1), None).unwrap();
        absence.status = crate::absence::AbsenceStatus::Approved;
        assert!(AccountPoster::absence_instruction(&absence, &no_account, 480).is_none());
    }

    #[test]
    fn test_post_day_upserts_and_removes_stale() {
        let store = InMemoryResultStore::new();
        let employee_id = EmployeeId::new();
        let net_account = AccountId::new();
        let cap_account = AccountId::new();

        let first = [
            PostingInstruction {
                account_id: net_account,
                source: PostingSource::NetTime,
                value_minutes: 600,
            },
            PostingInstruction {
                account_id: cap_account,
                source: PostingSource::CappedTime,
                value_minutes: 60,
            },
        ];
        let summary = AccountPoster::post_day(&store, employee_id, date(), &first).unwrap();
        assert_eq!(summary, PostingSummary { upserted: 2, removed: 0 });

        // Same input again: no duplicates.
        AccountPoster::post_day(&store, employee_id, date(), &first).unwrap();
        assert_eq!(store.account_values_for_day(employee_id, date()).unwrap().len(), 2);

        // Cap account removed from the plan.
        let second = [PostingInstruction {
            account_id: net_account,
            source: PostingSource::NetTime,
            value_minutes: 540,
        }];
        let summary = AccountPoster::post_day(&store, employee_id, date(), &second).unwrap();
        assert_eq!(summary, PostingSummary { upserted: 1, removed: 1 });

        let remaining = store.account_values_for_day(employee_id, date()).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].value_minutes, 540);
    }
}
