//! Common types used across the application.

pub mod id;
pub mod minute;

pub use id::*;
pub use minute::{MINUTES_PER_DAY, MinuteOfDay, MinuteOutOfRange};
