//! Per-interaction pipeline: quote → candles → series → chart → alerts.
//!
//! Every call re-fetches from the exchange; only the catalog is shared, and
//! it is read-only. A missing quote or candle window degrades the affected
//! part of the report instead of failing it.

use crate::charts::{render_price_chart, ChartSpec, SvgBackend, SvgFigure};
use crate::error::{DashboardError, Result};
use crate::format::currency;
use crate::models::{Catalog, Granularity, Market, Position, PriceSeries};
use crate::services::{fetch_candles, fetch_quote, MarketDataProvider};
use crate::signals::{
    evaluate_change, evaluate_position, ChangeOutcome, PositionOutcome, UnavailableReason,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const PRICE_UNAVAILABLE: &str = "price unavailable";

#[derive(Clone)]
pub struct Dashboard {
    provider: Arc<dyn MarketDataProvider + Send + Sync>,
    catalog: Arc<Catalog>,
    currency_suffix: String,
}

/// Everything one screen shows for a selected market.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub market: Market,
    pub granularity: Granularity,
    pub price: Option<f64>,
    pub price_text: String,
    pub change: ChangeOutcome,
    pub change_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
    /// `None` when the price is unavailable
    pub position: Option<PositionOutcome>,
    pub position_text: Option<String>,
    /// Series for the selected granularity, `None` when no chart is available
    pub series: Option<PriceSeries>,
    #[serde(skip)]
    pub chart: Option<SvgFigure>,
}

impl Dashboard {
    pub fn new(
        provider: Arc<dyn MarketDataProvider + Send + Sync>,
        catalog: Arc<Catalog>,
        currency_suffix: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            catalog,
            currency_suffix: currency_suffix.into(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn currency_suffix(&self) -> &str {
        &self.currency_suffix
    }

    /// Look a market up by display name or code
    pub fn resolve(&self, name_or_code: &str) -> Result<&Market> {
        self.catalog
            .resolve(name_or_code)
            .ok_or_else(|| DashboardError::UnknownMarket(name_or_code.to_string()))
    }

    pub async fn quote(&self, code: &str) -> Result<f64> {
        fetch_quote(self.provider.as_ref(), code).await
    }

    /// Normalized series for one window, `None` when the candles are unavailable
    pub async fn series(&self, code: &str, granularity: Granularity) -> Option<PriceSeries> {
        let candles = fetch_candles(self.provider.as_ref(), code, granularity).await?;
        let series = PriceSeries::from_candles(&candles);
        if series.len() != granularity.window_len() {
            info!(
                code = code,
                granularity = %granularity,
                expected = granularity.window_len(),
                actual = series.len(),
                "Short candle window"
            );
        }
        Some(series)
    }

    pub fn render(&self, granularity: Granularity, series: &PriceSeries) -> Option<SvgFigure> {
        let spec = ChartSpec::for_granularity(granularity, &self.currency_suffix);
        render_price_chart(SvgBackend::new(), &spec, series)
    }

    pub async fn chart(&self, code: &str, granularity: Granularity) -> Option<SvgFigure> {
        let series = self.series(code, granularity).await?;
        self.render(granularity, &series)
    }

    /// Daily change alert; missing candles count as insufficient data
    pub async fn change(&self, code: &str) -> ChangeOutcome {
        match self.series(code, Granularity::Daily).await {
            Some(series) => evaluate_change(&series),
            None => ChangeOutcome::Unavailable {
                reason: UnavailableReason::InsufficientData,
            },
        }
    }

    pub async fn report(
        &self,
        name_or_code: &str,
        granularity: Granularity,
        position: Option<Position>,
    ) -> Result<MarketReport> {
        let market = self.resolve(name_or_code)?.clone();
        let code = market.code.as_str();

        let price = match self.quote(code).await {
            Ok(price) => Some(price),
            Err(e) => {
                warn!(code = code, error = %e, "Showing price as unavailable");
                None
            }
        };

        let daily = self.series(code, Granularity::Daily).await;
        let change = match &daily {
            Some(series) => evaluate_change(series),
            None => ChangeOutcome::Unavailable {
                reason: UnavailableReason::InsufficientData,
            },
        };

        let series = match granularity {
            Granularity::Daily => daily,
            Granularity::Monthly => self.series(code, Granularity::Monthly).await,
        };
        let chart = series
            .as_ref()
            .and_then(|series| self.render(granularity, series));

        let position = price.map(|price| evaluate_position(&position.unwrap_or_default(), price));

        Ok(MarketReport {
            price_text: match price {
                Some(price) => currency(price, &self.currency_suffix),
                None => PRICE_UNAVAILABLE.to_string(),
            },
            change_text: change.message(),
            caution: change.caution_notice(),
            position_text: position.map(|p| p.message(&self.currency_suffix)),
            market,
            granularity,
            price,
            change,
            position,
            series,
            chart,
        })
    }
}
