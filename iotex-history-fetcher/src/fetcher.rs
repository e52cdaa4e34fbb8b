//! Three-pass fetch orchestration and the live/replay strategy seam.
//!
//! For one wallet the live pipeline:
//! 1. Fetches transfer actions by offset from the primary source and drops
//!    non-transfer actions.
//! 2. Fetches stake actions by page number from the secondary source,
//!    collecting deduplicated deposit-stake identifiers only.
//! 3. Resolves full records for those identifiers in batches from the
//!    primary source and appends them after the transfers.
//!
//! Any page failure aborts the whole run; there is no partial result.

use std::collections::HashSet;

use async_trait::async_trait;

use iotex_history::HistoryError;
use iotex_history::source::{ActionSource, ProgressSink, StakeSource};
use iotex_history::types::{ACT_TYPE_DEPOSIT_STAKE, API_PAGE_LIMIT, RawAction};

use crate::estimate;
use crate::pager::fetch_pages;
use crate::replay::ReplayCache;

/// Strategy for obtaining a wallet's merged action history.
///
/// Selected once, at construction time: [`LiveFetch`] runs the real
/// pipeline, [`CachedReplay`] substitutes a previously captured file and
/// touches no network.
#[async_trait]
pub trait HistorySource: Send {
    /// Produce the full merged raw-action list for `wallet`.
    ///
    /// # Errors
    ///
    /// Fails without a partial result: [`HistoryError::RemoteUnavailable`]
    /// on any count or page failure, [`HistoryError::MalformedRecord`] on
    /// an item missing its hash or type, [`HistoryError::Cache`] on a
    /// replay-file failure.
    async fn fetch_history(&mut self, wallet: &str) -> Result<Vec<RawAction>, HistoryError>;
}

/// Live three-pass fetch against both remote sources.
pub struct LiveFetch<A, S, P> {
    actions: A,
    stakes: S,
    progress: P,
    limit: usize,
    capture: Option<ReplayCache>,
}

impl<A, S, P> LiveFetch<A, S, P> {
    /// New live pipeline bounded by `limit` transactions.
    pub fn new(actions: A, stakes: S, progress: P, limit: usize) -> Self {
        Self {
            actions,
            stakes,
            progress,
            limit,
            capture: None,
        }
    }

    /// Persist the merged output to `cache` after a successful run.
    ///
    /// Nothing is written when the run fails, so a failed run never
    /// replaces a prior valid capture.
    #[must_use]
    pub fn with_capture(mut self, cache: ReplayCache) -> Self {
        self.capture = Some(cache);
        self
    }
}

impl<A: std::fmt::Debug, S: std::fmt::Debug, P> std::fmt::Debug for LiveFetch<A, S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveFetch")
            .field("actions", &self.actions)
            .field("stakes", &self.stakes)
            .field("limit", &self.limit)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<A, S, P> HistorySource for LiveFetch<A, S, P>
where
    A: ActionSource,
    S: StakeSource,
    P: ProgressSink,
{
    async fn fetch_history(&mut self, wallet: &str) -> Result<Vec<RawAction>, HistoryError> {
        let est = estimate::estimate(&self.actions, &self.stakes, wallet).await?;
        self.progress.set_estimate(est.num_txs);

        // Every pass is bounded by the same query budget, derived from the
        // configured transaction limit rather than the source's own counts.
        let max_queries = self.limit.div_ceil(API_PAGE_LIMIT);
        tracing::info!(
            wallet,
            num_actions = est.num_actions,
            num_stake_actions = est.num_stake_actions,
            max_queries,
            "starting history fetch"
        );

        let mut out =
            fetch_transfers(&self.actions, wallet, est.num_actions, max_queries).await?;
        self.progress
            .report_message(&format!("Retrieved {} txids...", out.len()));

        let ids =
            fetch_stake_ids(&self.stakes, wallet, est.num_stake_actions, max_queries).await?;
        out.extend(resolve_stake_actions(&self.actions, &ids, max_queries).await?);
        self.progress
            .report_message(&format!("Retrieved total {} txids...", out.len()));

        if let Some(cache) = &self.capture {
            cache.save(&out)?;
        }
        Ok(out)
    }
}

/// Pass 1: transfer actions by offset from the primary source.
///
/// Pages are fetched whole and post-filtered so the short-page check sees
/// the source's real page length, not the filtered one.
async fn fetch_transfers<A>(
    actions: &A,
    wallet: &str,
    num_actions: usize,
    max_queries: usize,
) -> Result<Vec<RawAction>, HistoryError>
where
    A: ActionSource + ?Sized,
{
    let count = num_actions.min(API_PAGE_LIMIT);
    let pages = fetch_pages(API_PAGE_LIMIT, max_queries, |page| {
        actions.get_actions_by_address(wallet, page * count, count)
    })
    .await?;

    Ok(pages.into_iter().filter(RawAction::is_transfer).collect())
}

/// Pass 2: deduplicated deposit-stake identifiers from the secondary source.
///
/// The secondary source's deposit-stake records are incomplete for
/// conversion purposes, so only their hashes are collected; full records
/// come from pass 3. Overlapping pages (possible under concurrent chain
/// growth) contribute each hash once, in first-seen order.
async fn fetch_stake_ids<S>(
    stakes: &S,
    wallet: &str,
    num_stake_actions: usize,
    max_queries: usize,
) -> Result<Vec<String>, HistoryError>
where
    S: StakeSource + ?Sized,
{
    let count = num_stake_actions.min(API_PAGE_LIMIT);
    let records = fetch_pages(API_PAGE_LIMIT, max_queries, |page| {
        stakes.get_stake_actions(wallet, page, count)
    })
    .await?;

    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    for record in records {
        let hash = record.action_hash.ok_or_else(|| {
            HistoryError::MalformedRecord("stake action missing action_hash".into())
        })?;
        let act_type = record.act_type.ok_or_else(|| {
            HistoryError::MalformedRecord(format!("stake action {hash} missing act_type"))
        })?;
        if act_type.eq_ignore_ascii_case(ACT_TYPE_DEPOSIT_STAKE) && seen.insert(hash.clone()) {
            ids.push(hash);
        }
    }
    Ok(ids)
}

/// Pass 3: full records for the collected identifiers, in hash batches.
async fn resolve_stake_actions<A>(
    actions: &A,
    ids: &[String],
    max_queries: usize,
) -> Result<Vec<RawAction>, HistoryError>
where
    A: ActionSource + ?Sized,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let count = ids.len().min(API_PAGE_LIMIT);
    fetch_pages(API_PAGE_LIMIT, max_queries, |page| {
        let start = (page * count).min(ids.len());
        let end = (start + count).min(ids.len());
        actions.get_actions_by_hashes(ids.get(start..end).unwrap_or(&[]))
    })
    .await
}

/// Replays a previously captured run verbatim; no network is touched.
#[derive(Debug, Clone)]
pub struct CachedReplay {
    cache: ReplayCache,
}

impl CachedReplay {
    /// Replay from the given capture file.
    #[must_use]
    pub fn new(cache: ReplayCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl HistorySource for CachedReplay {
    async fn fetch_history(&mut self, _wallet: &str) -> Result<Vec<RawAction>, HistoryError> {
        // The wallet is already encoded in the capture's path.
        self.cache.load()
    }
}
