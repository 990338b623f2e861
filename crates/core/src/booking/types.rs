//! Booking input types.

use serde::{Deserialize, Serialize};
use timeledger_shared::types::{BookingId, MinuteOfDay};

/// Direction of a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingDirection {
    /// Clock in (start of presence).
    In,
    /// Clock out (end of presence).
    Out,
}

/// Where a booking came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingSource {
    /// Hardware time terminal.
    Terminal,
    /// Self-service web clock.
    Web,
    /// Manual correction by an administrator.
    Correction,
    /// Bulk import from an external system.
    Import,
}

/// A single clock event for one employee on one date.
///
/// Bookings are immutable input owned by the booking subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Identifier assigned by the booking subsystem, if persisted.
    pub id: Option<BookingId>,
    /// In or out.
    pub direction: BookingDirection,
    /// Minute of day the event was recorded at.
    pub minute: MinuteOfDay,
    /// Origin of the booking.
    pub source: BookingSource,
}

impl Booking {
    /// Creates a terminal booking without an id.
    #[must_use]
    pub const fn new(direction: BookingDirection, minute: MinuteOfDay) -> Self {
        Self {
            id: None,
            direction,
            minute,
            source: BookingSource::Terminal,
        }
    }

    /// Shorthand for a clock-in at `minute`.
    #[must_use]
    pub const fn clock_in(minute: MinuteOfDay) -> Self {
        Self::new(BookingDirection::In, minute)
    }

    /// Shorthand for a clock-out at `minute`.
    #[must_use]
    pub const fn clock_out(minute: MinuteOfDay) -> Self {
        Self::new(BookingDirection::Out, minute)
    }

    /// Sets the booking source.
    #[must_use]
    pub const fn with_source(mut self, source: BookingSource) -> Self {
        self.source = source;
        self
    }
}
