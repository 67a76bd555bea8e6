//! Fixed-window candle retrieval.

use crate::models::{Candle, Granularity};
use crate::services::market_data::MarketDataProvider;
use tracing::warn;

/// Fetch the granularity's fixed window (8 daily / 13 monthly candles),
/// newest first as the exchange returns it.
///
/// Failures and empty windows are `None`: the chart is skipped, the rest of
/// the page is not affected. No caching, every call re-fetches.
pub async fn fetch_candles(
    provider: &(dyn MarketDataProvider + Send + Sync),
    code: &str,
    granularity: Granularity,
) -> Option<Vec<Candle>> {
    match provider
        .get_candles(code, granularity, granularity.window_len())
        .await
    {
        Ok(candles) if candles.is_empty() => {
            warn!(code = code, granularity = %granularity, "Exchange returned no candles");
            None
        }
        Ok(candles) => Some(candles),
        Err(e) => {
            warn!(code = code, granularity = %granularity, error = %e, "Candle request failed");
            None
        }
    }
}
