//! Clock bookings and their normalization into work intervals.

pub mod normalizer;
pub mod types;

pub use normalizer::{BookingIssue, BookingNormalizer, PairedBookings, RawInterval};
pub use types::{Booking, BookingDirection, BookingSource};
