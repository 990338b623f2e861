//! Ordering and pairing of raw bookings.
//!
//! Pairing never fails: malformed sequences are reported as issues and the
//! remaining bookings are paired on a best-effort basis.

use serde::{Deserialize, Serialize};
use timeledger_shared::types::MinuteOfDay;

use super::types::{Booking, BookingDirection};

/// A closed in/out interval as recorded, before any plan rule is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInterval {
    /// Clock-in minute.
    pub start: MinuteOfDay,
    /// Clock-out minute.
    pub end: MinuteOfDay,
}

impl RawInterval {
    /// Recorded length in minutes.
    #[must_use]
    pub fn length(&self) -> i32 {
        self.end.as_i32() - self.start.as_i32()
    }
}

/// A problem found while pairing bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookingIssue {
    /// A clock-in without a matching clock-out.
    UnpairedIn {
        /// Minute of the orphaned clock-in.
        minute: MinuteOfDay,
    },
    /// A clock-out without a preceding clock-in.
    UnpairedOut {
        /// Minute of the orphaned clock-out.
        minute: MinuteOfDay,
    },
    /// The same direction was booked twice at the same minute.
    Duplicate {
        /// Minute of the duplicate.
        minute: MinuteOfDay,
    },
}

impl BookingIssue {
    /// Returns true if the issue makes the day's figures unreliable.
    ///
    /// Duplicates are dropped without losing information.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Duplicate { .. })
    }
}

/// Result of pairing one day's bookings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairedBookings {
    /// Intervals in chronological order.
    pub intervals: Vec<RawInterval>,
    /// Issues found while pairing.
    pub issues: Vec<BookingIssue>,
}

impl PairedBookings {
    /// Returns true if any issue is an error.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.issues.iter().any(BookingIssue::is_error)
    }

    /// Minutes between consecutive recorded intervals.
    #[must_use]
    pub fn gap_minutes(&self) -> i32 {
        self.intervals
            .windows(2)
            .map(|pair| (pair[1].start.as_i32() - pair[0].end.as_i32()).max(0))
            .sum()
    }
}

/// Orders and pairs bookings for a single employee and date.
pub struct BookingNormalizer;

impl BookingNormalizer {
    /// Sorts bookings chronologically.
    ///
    /// At the same minute a clock-out sorts before a clock-in, so
    /// `12:00 out, 12:00 in` closes one interval and opens the next.
    /// [`pair`](Self::pair) reverses that tie when no interval is open.
    #[must_use]
    pub fn order(bookings: &[Booking]) -> Vec<Booking> {
        let mut ordered = bookings.to_vec();
        ordered.sort_by_key(|b| {
            let direction_rank = match b.direction {
                BookingDirection::Out => 0u8,
                BookingDirection::In => 1u8,
            };
            (b.minute, direction_rank)
        });
        ordered
    }

    /// Pairs bookings into in/out intervals.
    ///
    /// - Exact duplicates (same direction, same minute) are dropped.
    /// - An `in` while an interval is open orphans the earlier `in`.
    /// - An `out` with no open interval pairs with an `in` at the same
    ///   minute into a zero-length interval, otherwise it is skipped.
    /// - An `in` still open at the end of the day is orphaned.
    #[must_use]
    pub fn pair(bookings: &[Booking]) -> PairedBookings {
        let ordered = Self::order(bookings);
        let mut result = PairedBookings::default();
        let mut open: Option<MinuteOfDay> = None;
        let mut previous: Option<(BookingDirection, MinuteOfDay)> = None;
        let mut remaining = ordered.iter().peekable();

        while let Some(booking) = remaining.next() {
            if previous == Some((booking.direction, booking.minute)) {
                result.issues.push(BookingIssue::Duplicate {
                    minute: booking.minute,
                });
                continue;
            }
            previous = Some((booking.direction, booking.minute));

            match (booking.direction, open) {
                (BookingDirection::In, None) => open = Some(booking.minute),
                (BookingDirection::In, Some(orphan)) => {
                    result
                        .issues
                        .push(BookingIssue::UnpairedIn { minute: orphan });
                    open = Some(booking.minute);
                }
                (BookingDirection::Out, Some(start)) => {
                    result.intervals.push(RawInterval {
                        start,
                        end: booking.minute,
                    });
                    open = None;
                }
                (BookingDirection::Out, None) => {
                    let same_minute_in = remaining.next_if(|next| {
                        next.direction == BookingDirection::In && next.minute == booking.minute
                    });
                    if let Some(clock_in) = same_minute_in {
                        previous = Some((clock_in.direction, clock_in.minute));
                        result.intervals.push(RawInterval {
                            start: clock_in.minute,
                            end: booking.minute,
                        });
                    } else {
                        result.issues.push(BookingIssue::UnpairedOut {
                            minute: booking.minute,
                        });
                    }
                }
            }
        }

        if let Some(orphan) = open {
            result
                .issues
                .push(BookingIssue::UnpairedIn { minute: orphan });
        }

        result
    }
}
