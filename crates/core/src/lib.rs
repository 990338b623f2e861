//! Core calculation engine for Timeledger.
//!
//! This crate contains pure time-accounting logic with ZERO web or database
//! dependencies. Configuration is read through [`engine::ConfigSource`] and
//! results are written through [`store::ResultStore`].
//!
//! # Modules
//!
//! - `booking` - Ordering and pairing of clock bookings
//! - `day_plan` - Shift templates and day plan resolution
//! - `daily` - Daily gross/net/target calculation
//! - `accounts` - Account postings derived from daily results
//! - `monthly` - Monthly flextime evaluation and carryover
//! - `vacation` - Vacation entitlement and balance
//! - `rules` - Absence calculation rules
//! - `engine` - Recalculation service tying the calculators together

pub mod absence;
pub mod accounts;
pub mod booking;
pub mod daily;
pub mod day_plan;
pub mod employee;
pub mod engine;
pub mod minutes;
pub mod monthly;
pub mod rules;
pub mod store;
pub mod tariff;
pub mod vacation;
