//! Market data provider interface.
//!
//! The pipeline only talks to the exchange through this trait, so tests can
//! swap in canned data without an HTTP server.

use crate::error::Result;
use crate::models::{Candle, Granularity};
use serde::{Deserialize, Serialize};

/// One entry of the exchange's market listing, before filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketListing {
    pub code: String,
    pub korean_name: String,
    pub english_name: String,
}

/// Ticker snapshot for one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub code: String,
    pub trade_price: f64,
}

#[async_trait::async_trait]
pub trait MarketDataProvider {
    /// Every market the exchange lists
    async fn list_markets(&self) -> Result<Vec<MarketListing>>;

    /// Ticker snapshots for a single market code, exactly as returned
    async fn get_tickers(&self, code: &str) -> Result<Vec<Ticker>>;

    /// Most recent `count` candles, newest first
    async fn get_candles(
        &self,
        code: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Candle>>;
}
