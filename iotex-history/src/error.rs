//! Error type shared across the fetch pipeline.

use thiserror::Error;

/// Errors surfaced by the retrieval pipeline.
///
/// Every variant aborts the run; there is no partial-success result.
/// Retries and backoff, if any, belong to the transport behind the source
/// traits, never to this layer.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// A count or page query against a remote source failed (network,
    /// remote-side error, or a response that could not be decoded).
    #[error("remote source unavailable: {0}")]
    RemoteUnavailable(String),

    /// A returned item lacks a field the pipeline must read.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The replay cache file could not be read or written.
    #[error("replay cache error: {0}")]
    Cache(String),
}
