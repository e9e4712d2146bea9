/// HTTP ledger gateway client
///
/// Talks to the gateway service that fronts the WeColor contract. The
/// gateway owns transaction signing and ABI encoding; this client only
/// carries the (day, color, contributors) tuple over JSON.
use crate::{
    error::{ApiError, ApiResult},
    ledger::{DailySnapshot, Ledger},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gateway client configuration
#[derive(Debug, Clone)]
pub struct HttpLedgerConfig {
    pub base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    /// Budget for snapshot writes. The gateway holds the request open
    /// until the transaction confirms, so writes outlive the per-request
    /// timeout and get the confirmation budget instead.
    pub write_timeout: Duration,
}

/// Ledger implementation over the HTTP gateway
pub struct HttpLedger {
    client: reqwest::Client,
    base_url: String,
    api_token: Option<String>,
    write_timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordSnapshotRequest<'a> {
    day: u64,
    color_hex: &'a str,
    contributors: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordSnapshotResponse {
    tx_hash: String,
}

impl HttpLedger {
    pub fn new(config: HttpLedgerConfig) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wecolor-backend/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token,
            write_timeout: config.write_timeout,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl Ledger for HttpLedger {
    async fn record_snapshot(
        &self,
        day: u64,
        color_hex: &str,
        contributors: &[String],
    ) -> ApiResult<String> {
        let url = format!("{}/daily-colors", self.base_url);
        let body = RecordSnapshotRequest {
            day,
            color_hex,
            contributors,
        };

        let response = self
            .authorize(self.client.post(&url))
            .timeout(self.write_timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Ledger(format!("Snapshot submission failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::Ledger(format!(
                "Snapshot submission rejected with status {}",
                response.status()
            )));
        }

        let confirmed: RecordSnapshotResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Ledger(format!("Invalid gateway response: {}", e)))?;

        Ok(confirmed.tx_hash)
    }

    async fn daily_snapshot(&self, day: u64) -> ApiResult<Option<DailySnapshot>> {
        let url = format!("{}/daily-colors/{}", self.base_url, day);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Ledger(format!("Snapshot query failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(ApiError::Ledger(format!(
                "Snapshot query failed with status {}",
                response.status()
            )));
        }

        let snapshot: DailySnapshot = response
            .json()
            .await
            .map_err(|e| ApiError::Ledger(format!("Invalid gateway response: {}", e)))?;

        Ok(Some(snapshot))
    }
}
