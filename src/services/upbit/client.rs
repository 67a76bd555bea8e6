//! Upbit public REST client.
//!
//! Read-only GET endpoints; no authentication headers beyond
//! `accept: application/json`. Uses reqwest's default client settings.

use crate::error::{DashboardError, Result};
use crate::models::Granularity;
use reqwest::header::{HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::messages::{CandleRecord, MarketRecord, TickerRecord};

pub struct UpbitRestClient {
    base_url: String,
    client: reqwest::Client,
}

impl UpbitRestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    /// `GET /v1/market/all`
    pub async fn market_all(&self) -> Result<Vec<MarketRecord>> {
        let url = self.endpoint("/v1/market/all", &[])?;
        self.get_json(url).await
    }

    /// `GET /v1/ticker?markets=<code>`
    pub async fn ticker(&self, code: &str) -> Result<Vec<TickerRecord>> {
        let url = self.endpoint("/v1/ticker", &[("markets", code)])?;
        self.get_json(url).await
    }

    /// `GET /v1/candles/{days|months}?market=<code>&count=<count>`
    pub async fn candles(
        &self,
        code: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<CandleRecord>> {
        let path = format!("/v1/candles/{}", granularity.endpoint());
        let count = count.to_string();
        let url = self.endpoint(&path, &[("market", code), ("count", &count)])?;
        self.get_json(url).await
    }

    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(url = %url, "Upbit GET");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!(url = %url, status = status.as_u16(), "Upbit returned error status");
            return Err(DashboardError::Status {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            DashboardError::Parse(format!("{} response from {}: {}", e, url.path(), body))
        })
    }
}
