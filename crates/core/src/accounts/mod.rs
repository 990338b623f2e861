//! Daily account postings.

pub mod poster;
pub mod types;

pub use poster::{AccountPoster, PostingSummary};
pub use types::{AccountValueKey, DailyAccountValue, PostingInstruction, PostingSource};
