//! Collaborator contracts consumed by the fetch pipeline.
//!
//! The two remote sources paginate differently: the primary source by item
//! offset, the secondary source by page number. Both signal end-of-data
//! with a short page (fewer items than requested).

use async_trait::async_trait;

use crate::error::HistoryError;
use crate::types::{RawAction, StakeAction};

/// Primary source: the analyser endpoint holding full action records.
///
/// Offset-paginated; a page shorter than the requested count means the
/// source has no further data.
///
/// # Errors
///
/// Every method fails with [`HistoryError::RemoteUnavailable`] when the
/// query cannot be completed; implementations do not retry.
#[async_trait]
pub trait ActionSource: Send + Sync {
    /// Number of actions recorded for `wallet`, without fetching payloads.
    async fn num_actions(&self, wallet: &str) -> Result<usize, HistoryError>;

    /// Up to `count` actions for `wallet`, starting at item offset `start`.
    async fn get_actions_by_address(
        &self,
        wallet: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<RawAction>, HistoryError>;

    /// Full action records for the given hashes, in request order.
    async fn get_actions_by_hashes(
        &self,
        hashes: &[String],
    ) -> Result<Vec<RawAction>, HistoryError>;

    /// Whether the wallet is known to the source at all.
    async fn account_exists(&self, wallet: &str) -> Result<bool, HistoryError>;
}

/// Secondary source: the explorer's stake-action index.
///
/// Paginated by page number rather than offset. Its deposit-stake records
/// are incomplete for conversion purposes, so callers resolve full records
/// by hash through [`ActionSource::get_actions_by_hashes`].
///
/// # Errors
///
/// Both methods fail with [`HistoryError::RemoteUnavailable`] when the
/// query cannot be completed; implementations do not retry.
#[async_trait]
pub trait StakeSource: Send + Sync {
    /// Number of stake actions recorded for `wallet`.
    async fn num_stake_actions(&self, wallet: &str) -> Result<usize, HistoryError>;

    /// Up to `count` stake actions for `wallet` from page `page`.
    async fn get_stake_actions(
        &self,
        wallet: &str,
        page: usize,
        count: usize,
    ) -> Result<Vec<StakeAction>, HistoryError>;
}

/// Observational progress collaborator.
///
/// Receives one total-item estimate per run and any number of free-text
/// milestone messages; nothing it does feeds back into the pipeline.
pub trait ProgressSink: Send {
    /// Record the expected total number of transactions for this run.
    fn set_estimate(&mut self, num_txs: usize);

    /// Emit a human-readable milestone message.
    fn report_message(&mut self, message: &str);
}
