//! Shared types, errors, and configuration for Timeledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Minute-of-day values for clock bookings and plan windows
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, EngineConfig};
pub use error::{AppError, AppResult};
