//! Thin HTTP clients for the two remote sources.
//!
//! These implement the source contracts and nothing more: no retries, no
//! backoff, no caching. Transport and response-shape failures are both
//! reported as [`iotex_history::HistoryError::RemoteUnavailable`].

mod graphql;
mod scan;

pub use graphql::{DEFAULT_GRAPHQL_URL, GraphQlClient};
pub use scan::{DEFAULT_SCAN_URL, ScanClient};
