//! Primary-source client: the analyser GraphQL endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use iotex_history::HistoryError;
use iotex_history::source::ActionSource;
use iotex_history::types::RawAction;

/// Default analyser GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://analyser-api.iotex.io/graphql";

/// Per-request timeout for GraphQL calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ACCOUNT_QUERY: &str = "\
query ($address: String!) {
  account(address: $address) {
    exist
    num_actions
  }
}";

const ACTIONS_BY_ADDRESS_QUERY: &str = "\
query ($address: String!, $start: Int!, $count: Int!) {
  actions_by_address(address: $address, start: $start, count: $count) {
    action_hash
    timestamp
    gas_price
    action {
      core {
        nonce
        transfer { amount recipient payload }
      }
    }
  }
}";

const ACTIONS_BY_HASHES_QUERY: &str = "\
query ($hashes: [String!]!) {
  actions_by_hashes(hashes: $hashes) {
    action_hash
    timestamp
    gas_price
    action {
      core {
        nonce
        transfer { amount recipient payload }
        stakeAddDeposit { bucketIndex amount }
      }
    }
  }
}";

/// Thin GraphQL client for action queries.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    url: String,
}

impl GraphQlClient {
    /// Client against the given GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::RemoteUnavailable`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(url: impl Into<String>) -> Result<Self, HistoryError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| HistoryError::RemoteUnavailable(format!("building http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Issue one GraphQL query and return its `data` object.
    async fn query(&self, query: &str, variables: Value) -> Result<Value, HistoryError> {
        let response = self
            .http
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| HistoryError::RemoteUnavailable(format!("graphql request: {e}")))?
            .error_for_status()
            .map_err(|e| HistoryError::RemoteUnavailable(format!("graphql status: {e}")))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| HistoryError::RemoteUnavailable(format!("graphql body: {e}")))?;

        if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
            return Err(HistoryError::RemoteUnavailable(format!(
                "graphql errors: {errors}"
            )));
        }
        body.get("data")
            .cloned()
            .ok_or_else(|| HistoryError::RemoteUnavailable("graphql response missing data".into()))
    }

    /// Decode a list of raw actions from a `data` sub-field.
    fn actions_at(data: &Value, pointer: &str) -> Result<Vec<RawAction>, HistoryError> {
        let list = data.pointer(pointer).cloned().unwrap_or(Value::Null);
        if list.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(list)
            .map_err(|e| HistoryError::RemoteUnavailable(format!("decoding actions: {e}")))
    }
}

#[async_trait]
impl ActionSource for GraphQlClient {
    async fn num_actions(&self, wallet: &str) -> Result<usize, HistoryError> {
        let data = self
            .query(ACCOUNT_QUERY, json!({ "address": wallet }))
            .await?;
        data.pointer("/account/num_actions")
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                HistoryError::RemoteUnavailable("account response missing num_actions".into())
            })
    }

    async fn get_actions_by_address(
        &self,
        wallet: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<RawAction>, HistoryError> {
        let data = self
            .query(
                ACTIONS_BY_ADDRESS_QUERY,
                json!({ "address": wallet, "start": start, "count": count }),
            )
            .await?;
        Self::actions_at(&data, "/actions_by_address")
    }

    async fn get_actions_by_hashes(
        &self,
        hashes: &[String],
    ) -> Result<Vec<RawAction>, HistoryError> {
        let data = self
            .query(ACTIONS_BY_HASHES_QUERY, json!({ "hashes": hashes }))
            .await?;
        Self::actions_at(&data, "/actions_by_hashes")
    }

    async fn account_exists(&self, wallet: &str) -> Result<bool, HistoryError> {
        let data = self
            .query(ACCOUNT_QUERY, json!({ "address": wallet }))
            .await?;
        Ok(data
            .pointer("/account/exist")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }
}
