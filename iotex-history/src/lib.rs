//! IoTeX transaction-history domain types and source contracts.
//!
//! Defines the raw action records exchanged with the two remote indexing
//! sources, the traits those sources are consumed through, and the error
//! type shared across the fetch pipeline.

pub mod error;
pub mod source;
pub mod types;

pub use error::HistoryError;
pub use types::{RawAction, StakeAction};
