//! Minute-of-day values.
//!
//! Bookings and plan windows are expressed as minutes since midnight.
//! `1440` is a valid value and means "end of day" (24:00).

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error returned when a minute-of-day is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Minute of day out of range: {0} (allowed 0..=1440)")]
pub struct MinuteOutOfRange(pub u16);

/// A minute of the day in the range `0..=1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: Self = Self(0);
    /// 24:00, the end of the day.
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Creates a minute of day, validating the range.
    pub const fn new(minute: u16) -> Result<Self, MinuteOutOfRange> {
        if minute > MINUTES_PER_DAY {
            Err(MinuteOutOfRange(minute))
        } else {
            Ok(Self(minute))
        }
    }

    /// Creates a minute of day from hours and minutes.
    ///
    /// Values too large for `u16` report `u16::MAX` as the offending minute.
    pub const fn from_hm(hours: u16, minutes: u16) -> Result<Self, MinuteOutOfRange> {
        match hours.checked_mul(60) {
            Some(hour_minutes) => match hour_minutes.checked_add(minutes) {
                Some(total) => Self::new(total),
                None => Err(MinuteOutOfRange(u16::MAX)),
            },
            None => Err(MinuteOutOfRange(u16::MAX)),
        }
    }

    /// Creates a minute of day, clamping to `0..=1440`.
    #[must_use]
    pub fn saturating(minute: i32) -> Self {
        let clamped = minute.clamp(0, i32::from(MINUTES_PER_DAY));
        // Clamped into range above.
        Self(u16::try_from(clamped).unwrap_or(MINUTES_PER_DAY))
    }

    /// Returns the raw minute count.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Returns the minute count as a signed value for arithmetic.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        i32::from(self.0)
    }
}

impl From<NaiveTime> for MinuteOfDay {
    fn from(time: NaiveTime) -> Self {
        let minutes = time.hour() * 60 + time.minute();
        Self::saturating(i32::try_from(minutes).unwrap_or(0))
    }
}

impl TryFrom<u16> for MinuteOfDay {
    type Error = MinuteOutOfRange;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MinuteOfDay> for u16 {
    fn from(value: MinuteOfDay) -> Self {
        value.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "00:00")]
    #[case(480, "08:00")]
    #[case(1005, "16:45")]
    #[case(1440, "24:00")]
    fn test_display(#[case] minute: u16, #[case] expected: &str) {
        assert_eq!(MinuteOfDay::new(minute).unwrap().to_string(), expected);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(MinuteOfDay::new(1441), Err(MinuteOutOfRange(1441)));
        assert!(MinuteOfDay::from_hm(24, 1).is_err());
    }

    #[rstest]
    #[case(2000, 0)]
    #[case(1093, 0)]
    #[case(0, u16::MAX)]
    #[case(1000, 6000)]
    fn test_from_hm_overflow_is_error(#[case] hours: u16, #[case] minutes: u16) {
        assert_eq!(
            MinuteOfDay::from_hm(hours, minutes),
            Err(MinuteOutOfRange(u16::MAX))
        );
    }

    #[test]
    fn test_saturating() {
        assert_eq!(MinuteOfDay::saturating(-15), MinuteOfDay::MIDNIGHT);
        assert_eq!(MinuteOfDay::saturating(2000), MinuteOfDay::END_OF_DAY);
        assert_eq!(MinuteOfDay::saturating(615).get(), 615);
    }

    #[test]
    fn test_from_naive_time() {
        let time = NaiveTime::from_hms_opt(7, 45, 30).unwrap();
        assert_eq!(MinuteOfDay::from(time).get(), 465);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<MinuteOfDay>("1500").is_err());
        let minute: MinuteOfDay = serde_json::from_str("540").unwrap();
        assert_eq!(minute, MinuteOfDay::from_hm(9, 0).unwrap());
    }
}
