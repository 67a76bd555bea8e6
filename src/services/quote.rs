//! Latest traded price for one market.

use crate::error::{DashboardError, Result};
use crate::services::market_data::MarketDataProvider;
use tracing::warn;

/// Fetch the instantaneous traded price of `code`.
///
/// The ticker endpoint answers with an array; for a single requested code
/// it must hold exactly one entry for that code. Anything else is
/// `QuoteUnavailable`, never a stale or zero price.
pub async fn fetch_quote(
    provider: &(dyn MarketDataProvider + Send + Sync),
    code: &str,
) -> Result<f64> {
    if code.is_empty() || code.contains(',') {
        return Err(unavailable(code, "exactly one market code is required"));
    }

    let tickers = provider.get_tickers(code).await.map_err(|e| {
        warn!(code = code, error = %e, "Ticker request failed");
        unavailable(code, &e.to_string())
    })?;

    let ticker = match tickers.as_slice() {
        [ticker] => ticker,
        other => {
            warn!(code = code, entries = other.len(), "Ticker response is not a singleton");
            return Err(unavailable(
                code,
                &format!("expected 1 ticker entry, got {}", other.len()),
            ));
        }
    };

    if ticker.code != code {
        return Err(unavailable(
            code,
            &format!("ticker entry is for {}", ticker.code),
        ));
    }

    if !ticker.trade_price.is_finite() {
        return Err(unavailable(code, "trade price is not a number"));
    }

    Ok(ticker.trade_price)
}

fn unavailable(code: &str, reason: &str) -> DashboardError {
    DashboardError::QuoteUnavailable {
        code: code.to_string(),
        reason: reason.to_string(),
    }
}
