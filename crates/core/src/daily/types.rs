//! Daily calculation types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use timeledger_shared::types::{DayPlanId, EmployeeId, MinuteOfDay};

use crate::absence::AbsenceDay;
use crate::accounts::PostingInstruction;
use crate::booking::Booking;
use crate::day_plan::ResolvedDay;

/// A condition that makes the day's figures unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DailyError {
    /// Clock-in without clock-out.
    UnpairedIn {
        /// Minute of the booking.
        minute: MinuteOfDay,
    },
    /// Clock-out without clock-in.
    UnpairedOut {
        /// Minute of the booking.
        minute: MinuteOfDay,
    },
}

/// A noteworthy condition that does not invalidate the figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DailyWarning {
    /// A duplicate booking was ignored.
    DuplicateBooking {
        /// Minute of the booking.
        minute: MinuteOfDay,
    },
    /// Presence started after the core time began.
    MissedCoreTimeStart,
    /// Presence ended before the core time ended.
    MissedCoreTimeEnd,
    /// Net time is below the plan's minimum.
    BelowMinNetWorkTime,
    /// Working day with a target but no bookings and no absence.
    NoBookings,
    /// Rounding or tolerance moved an interval's start before the previous
    /// end; the start was moved to that end.
    OverlappingIntervals {
        /// Adjusted start minute before it was moved.
        minute: MinuteOfDay,
    },
}

/// The engine's result for one employee and date.
///
/// Unique per (employee, date); recalculation replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyValue {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date.
    pub date: NaiveDate,
    /// Plan the day was evaluated with.
    pub day_plan_id: Option<DayPlanId>,
    /// Sum of effective interval lengths.
    pub gross_minutes: i32,
    /// Net minutes used for reporting and flextime.
    pub net_minutes: i32,
    /// Net minutes before the plan's cap.
    pub uncapped_net_minutes: i32,
    /// Net minutes above the plan's cap.
    pub capped_minutes: i32,
    /// Target minutes.
    pub target_minutes: i32,
    /// `max(0, net - target)`.
    pub overtime_minutes: i32,
    /// `max(0, target - net)`.
    pub undertime_minutes: i32,
    /// Recorded gaps plus deducted breaks.
    pub break_minutes: i32,
    /// First recorded clock-in.
    pub first_in: Option<MinuteOfDay>,
    /// Last recorded clock-out.
    pub last_out: Option<MinuteOfDay>,
    /// Number of bookings received.
    pub booking_count: u32,
    /// Public holiday.
    pub is_holiday: bool,
    /// Day without a working plan.
    pub is_off_day: bool,
    /// Approved absence on this day.
    pub is_absence: bool,
    /// Any entry in `errors`.
    pub has_error: bool,
    /// Error conditions.
    pub errors: Vec<DailyError>,
    /// Warning conditions.
    pub warnings: Vec<DailyWarning>,
}

impl DailyValue {
    /// A value with all figures zero and no flags.
    #[must_use]
    pub fn empty(employee_id: EmployeeId, date: NaiveDate) -> Self {
        Self {
            employee_id,
            date,
            day_plan_id: None,
            gross_minutes: 0,
            net_minutes: 0,
            uncapped_net_minutes: 0,
            capped_minutes: 0,
            target_minutes: 0,
            overtime_minutes: 0,
            undertime_minutes: 0,
            break_minutes: 0,
            first_in: None,
            last_out: None,
            booking_count: 0,
            is_holiday: false,
            is_off_day: false,
            is_absence: false,
            has_error: false,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// The day's contribution to the flextime balance.
    #[must_use]
    pub fn flextime_minutes(&self) -> i32 {
        self.overtime_minutes - self.undertime_minutes
    }

    /// Returns true if any presence was credited.
    #[must_use]
    pub fn has_worked(&self) -> bool {
        self.gross_minutes > 0
    }
}

/// Input for one daily calculation.
#[derive(Debug, Clone, Copy)]
pub struct DailyInput<'a> {
    /// The employee.
    pub employee_id: EmployeeId,
    /// The date.
    pub date: NaiveDate,
    /// All bookings for the date, in any order.
    pub bookings: &'a [Booking],
    /// Resolved plan or off-day reason; carries the holiday flag.
    pub day: &'a ResolvedDay,
    /// Absence recorded for the date, in any status.
    pub absence: Option<&'a AbsenceDay>,
    /// Target used when the plan has no regular minutes.
    pub fallback_target_minutes: Option<i32>,
}

/// Result of a daily calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyOutcome {
    /// The daily value.
    pub value: DailyValue,
    /// Postings derived from the day plan's accounts.
    pub postings: Vec<PostingInstruction>,
}
