//! Secondary-source client: the explorer's stake-action REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use iotex_history::HistoryError;
use iotex_history::source::StakeSource;
use iotex_history::types::StakeAction;

/// Default explorer API endpoint.
pub const DEFAULT_SCAN_URL: &str = "https://iotexscan.io/api";

/// Per-request timeout for REST calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response envelope for the stake-actions listing.
#[derive(Debug, Deserialize)]
struct StakeActionsPage {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    stake_actions: Vec<StakeAction>,
}

/// Thin REST client for stake-action queries.
#[derive(Debug, Clone)]
pub struct ScanClient {
    http: reqwest::Client,
    base: String,
}

impl ScanClient {
    /// Client against the given explorer API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::RemoteUnavailable`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base: impl Into<String>) -> Result<Self, HistoryError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HistoryError::RemoteUnavailable(format!("building http client: {e}")))?;
        Ok(Self {
            http,
            base: base.into(),
        })
    }

    async fn page(
        &self,
        wallet: &str,
        page: usize,
        size: usize,
    ) -> Result<StakeActionsPage, HistoryError> {
        self.http
            .get(format!("{}/stake_actions", self.base))
            .query(&[
                ("address", wallet),
                ("page", &page.to_string()),
                ("size", &size.to_string()),
            ])
            .send()
            .await
            .map_err(|e| HistoryError::RemoteUnavailable(format!("scan request: {e}")))?
            .error_for_status()
            .map_err(|e| HistoryError::RemoteUnavailable(format!("scan status: {e}")))?
            .json()
            .await
            .map_err(|e| HistoryError::RemoteUnavailable(format!("scan body: {e}")))
    }
}

#[async_trait]
impl StakeSource for ScanClient {
    async fn num_stake_actions(&self, wallet: &str) -> Result<usize, HistoryError> {
        Ok(self.page(wallet, 0, 1).await?.total)
    }

    async fn get_stake_actions(
        &self,
        wallet: &str,
        page: usize,
        count: usize,
    ) -> Result<Vec<StakeAction>, HistoryError> {
        Ok(self.page(wallet, page, count).await?.stake_actions)
    }
}
