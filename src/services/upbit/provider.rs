//! Upbit market data provider implementation

use crate::error::Result;
use crate::metrics::Metrics;
use crate::models::{Candle, Granularity};
use crate::services::market_data::{MarketDataProvider, MarketListing, Ticker};
use std::sync::Arc;
use tracing::debug;

use super::client::UpbitRestClient;

pub struct UpbitMarketDataProvider {
    client: Arc<UpbitRestClient>,
    metrics: Option<Arc<Metrics>>,
}

impl UpbitMarketDataProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Arc::new(UpbitRestClient::new(base_url)))
    }

    pub fn with_client(client: Arc<UpbitRestClient>) -> Self {
        Self {
            client,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn record<T>(&self, endpoint: &str, result: &Result<T>) {
        if let Some(metrics) = &self.metrics {
            metrics.record_exchange_request(endpoint, result.is_ok());
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for UpbitMarketDataProvider {
    async fn list_markets(&self) -> Result<Vec<MarketListing>> {
        let result = self.client.market_all().await;
        self.record("market_all", &result);

        let listings: Vec<MarketListing> = result?.into_iter().map(Into::into).collect();
        debug!(count = listings.len(), "Fetched market listing");
        Ok(listings)
    }

    async fn get_tickers(&self, code: &str) -> Result<Vec<Ticker>> {
        let result = self.client.ticker(code).await;
        self.record("ticker", &result);

        Ok(result?.into_iter().map(Into::into).collect())
    }

    async fn get_candles(
        &self,
        code: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Candle>> {
        let result = self.client.candles(code, granularity, count).await;
        let endpoint = match granularity {
            Granularity::Daily => "candles_days",
            Granularity::Monthly => "candles_months",
        };
        self.record(endpoint, &result);

        let candles: Vec<Candle> = result?.into_iter().map(Into::into).collect();
        debug!(
            code = code,
            granularity = %granularity,
            count = candles.len(),
            "Fetched candles"
        );
        Ok(candles)
    }
}
