//! Recalculation service and its configuration seam.

pub mod error;
pub mod service;
pub mod source;

pub use error::EngineError;
pub use service::{DayUnit, RecalculationService};
pub use source::{ConfigSource, InMemoryConfigSource};
