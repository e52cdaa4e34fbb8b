//! IoTeX wallet transaction-history fetcher library.
//!
//! Retrieves one wallet's complete on-chain history from two independent,
//! eventually-consistent paginated sources, merges and deduplicates the
//! results into a single ordered raw-action list, and reports progress as
//! it proceeds.

pub mod client;
pub mod config;
pub mod estimate;
pub mod fetcher;
pub mod pager;
pub mod progress;
pub mod replay;
