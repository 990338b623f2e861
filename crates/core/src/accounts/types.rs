//! Account posting types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{AccountId, EmployeeId};

/// What produced a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingSource {
    /// The day plan's net account received the day's net minutes.
    NetTime,
    /// The day plan's cap account received the minutes above the cap.
    CappedTime,
    /// An absence calculation rule credited the absence day.
    AbsenceRule,
}

impl PostingSource {
    /// Returns the stored discriminator.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NetTime => "net_time",
            Self::CappedTime => "capped_time",
            Self::AbsenceRule => "absence_rule",
        }
    }
}

/// A posting the engine wants to record for the day being calculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingInstruction {
    /// Destination account.
    pub account_id: AccountId,
    /// What produced the value.
    pub source: PostingSource,
    /// Minutes to record.
    pub value_minutes: i32,
}

/// Natural key of a daily account value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountValueKey {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date.
    pub date: NaiveDate,
    /// The account.
    pub account_id: AccountId,
    /// The source.
    pub source: PostingSource,
}

/// Minutes recorded on one account for one employee and date.
///
/// Unique per (employee, date, account, source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAccountValue {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date.
    pub date: NaiveDate,
    /// The account.
    pub account_id: AccountId,
    /// What produced the value.
    pub source: PostingSource,
    /// Posted minutes.
    pub value_minutes: i32,
}

impl DailyAccountValue {
    /// Natural key of this value.
    #[must_use]
    pub fn key(&self) -> AccountValueKey {
        AccountValueKey {
            employee_id: self.employee_id,
            date: self.date,
            account_id: self.account_id,
            source: self.source,
        }
    }
}
