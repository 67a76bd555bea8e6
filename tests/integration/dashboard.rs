//! Report pipeline over an in-process provider with canned data.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use coinboard::config::CatalogLocale;
use coinboard::core::{
    write_catalog, write_report, Dashboard, MarketReport, PRICE_UNAVAILABLE,
};
use coinboard::error::{DashboardError, Result};
use coinboard::models::{Candle, Granularity, Position};
use coinboard::services::{build_catalog, MarketDataProvider, MarketListing, Ticker};
use coinboard::signals::{ChangeOutcome, PositionOutcome, UnavailableReason};

fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, d)
        .and_then(|date| date.and_hms_opt(9, 0, 0))
        .expect("valid date")
}

fn candle(d: u32, close: f64) -> Candle {
    Candle::new(close, close, close, close, 1.0, day(d))
}

/// Canned exchange: one market with a fixed price and daily window.
struct CannedProvider {
    price: Option<f64>,
    /// Newest first
    daily: Vec<Candle>,
    candle_calls: AtomicUsize,
}

impl CannedProvider {
    fn new(price: Option<f64>, ascending_closes: &[f64]) -> Self {
        let daily = ascending_closes
            .iter()
            .enumerate()
            .rev()
            .map(|(i, close)| candle(i as u32 + 1, *close))
            .collect();
        Self {
            price,
            daily,
            candle_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CannedProvider {
    async fn list_markets(&self) -> Result<Vec<MarketListing>> {
        Ok(vec![MarketListing {
            code: "KRW-SOL".to_string(),
            korean_name: "솔라나".to_string(),
            english_name: "Solana".to_string(),
        }])
    }

    async fn get_tickers(&self, code: &str) -> Result<Vec<Ticker>> {
        match self.price {
            Some(trade_price) => Ok(vec![Ticker {
                code: code.to_string(),
                trade_price,
            }]),
            None => Err(DashboardError::Status {
                endpoint: "ticker".to_string(),
                status: 500,
                body: String::new(),
            }),
        }
    }

    async fn get_candles(
        &self,
        _code: &str,
        granularity: Granularity,
        count: usize,
    ) -> Result<Vec<Candle>> {
        self.candle_calls.fetch_add(1, Ordering::SeqCst);
        match granularity {
            Granularity::Daily => Ok(self.daily.iter().take(count).cloned().collect()),
            Granularity::Monthly => Ok(Vec::new()),
        }
    }
}

async fn dashboard_with(provider: Arc<CannedProvider>) -> Dashboard {
    let listings = provider.list_markets().await.expect("listing");
    let catalog = build_catalog(listings, "KRW", CatalogLocale::Korean);
    Dashboard::new(provider, Arc::new(catalog), "KRW")
}

#[tokio::test]
async fn report_resolves_display_name_and_code() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 105.0]));
    let dashboard = dashboard_with(provider).await;

    let by_name = dashboard
        .report("솔라나", Granularity::Daily, None)
        .await
        .expect("report by name");
    let by_code = dashboard
        .report("KRW-SOL", Granularity::Daily, None)
        .await
        .expect("report by code");

    assert_eq!(by_name.market, by_code.market);
    assert_eq!(by_name.market.code, "KRW-SOL");
}

#[tokio::test]
async fn report_for_unknown_market_is_an_error() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 105.0]));
    let dashboard = dashboard_with(provider).await;

    let result = dashboard.report("도지코인", Granularity::Daily, None).await;
    assert!(matches!(result, Err(DashboardError::UnknownMarket(ref name)) if name == "도지코인"));
}

#[tokio::test]
async fn report_at_threshold_is_not_flagged() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 105.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("KRW-SOL", Granularity::Daily, None)
        .await
        .expect("report");

    assert_eq!(
        report.change,
        ChangeOutcome::Increased {
            change_pct: 5.0,
            caution: false
        }
    );
    assert_eq!(report.change_text, "increased by 5.00%");
    assert!(report.caution.is_none());
}

#[tokio::test]
async fn report_computes_position_against_quote() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 94.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("KRW-SOL", Granularity::Daily, Some(Position::new(100.0, 2.0)))
        .await
        .expect("report");

    assert_eq!(report.price, Some(150.0));
    assert_eq!(report.price_text, "150 KRW");
    assert_eq!(
        report.position,
        Some(PositionOutcome::Computed {
            profit: 100.0,
            profit_pct: Some(50.0)
        })
    );
    assert_eq!(
        report.position_text.as_deref(),
        Some("Profit/loss: 100 KRW (50.00%)")
    );
    assert!(report.change.caution());
    assert!(report.caution.is_some());
}

#[tokio::test]
async fn report_without_price_skips_position_only() {
    let provider = Arc::new(CannedProvider::new(None, &[100.0, 100.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("KRW-SOL", Granularity::Daily, Some(Position::new(100.0, 2.0)))
        .await
        .expect("report");

    assert!(report.price.is_none());
    assert_eq!(report.price_text, PRICE_UNAVAILABLE);
    assert!(report.position.is_none());
    assert!(report.position_text.is_none());
    assert_eq!(report.change, ChangeOutcome::Unchanged);
    assert!(report.chart.is_some());
}

#[tokio::test]
async fn report_without_monthly_candles_has_no_chart() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 106.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("KRW-SOL", Granularity::Monthly, None)
        .await
        .expect("report");

    assert!(report.series.is_none());
    assert!(report.chart.is_none());
    // The change alert always uses the daily window
    assert_eq!(report.change_text, "increased by 6.00%");
    assert_eq!(report.position, Some(PositionOutcome::NeedsQuantity));
}

#[tokio::test]
async fn single_candle_change_is_unavailable() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0]));
    let dashboard = dashboard_with(provider).await;

    let change = dashboard.change("KRW-SOL").await;
    assert_eq!(
        change,
        ChangeOutcome::Unavailable {
            reason: UnavailableReason::InsufficientData
        }
    );
    assert_eq!(change.message(), "N/A");
}

#[tokio::test]
async fn series_is_ascending_and_chart_annotates_every_point() {
    let closes = [
        50_000_000.0,
        51_000_000.0,
        52_000_000.0,
        53_000_000.0,
        54_000_000.0,
        55_000_000.0,
        56_000_000.0,
        57_000_000.0,
    ];
    let provider = Arc::new(CannedProvider::new(Some(57_100_000.0), &closes));
    let dashboard = dashboard_with(provider).await;

    let series = dashboard
        .series("KRW-SOL", Granularity::Daily)
        .await
        .expect("series");
    assert_eq!(series.len(), 8);
    assert_eq!(series.closes().collect::<Vec<_>>(), closes.to_vec());

    let chart = dashboard
        .render(Granularity::Daily, &series)
        .expect("chart");
    let svg = chart.as_str();
    assert!(svg.contains("7-day closing price"));
    for close in ["50,000,000 KRW", "53,000,000 KRW", "57,000,000 KRW"] {
        assert!(svg.contains(close), "missing annotation {}", close);
    }
    assert!(svg.contains("2024-03-01"));
    assert!(svg.contains("2024-03-08"));
}

#[tokio::test]
async fn each_report_refetches_candles() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 105.0]));
    let dashboard = dashboard_with(provider.clone()).await;

    dashboard
        .report("KRW-SOL", Granularity::Daily, None)
        .await
        .expect("first report");
    dashboard
        .report("KRW-SOL", Granularity::Monthly, None)
        .await
        .expect("second report");

    // Daily once for the first report; daily and monthly for the second
    assert_eq!(provider.candle_calls.load(Ordering::SeqCst), 3);
}

fn rendered(report: &MarketReport) -> String {
    let mut out = Vec::new();
    write_report(&mut out, report).expect("write to buffer");
    String::from_utf8(out).expect("utf-8 report")
}

#[tokio::test]
async fn terminal_report_lists_every_section() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 94.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("솔라나", Granularity::Daily, Some(Position::new(100.0, 2.0)))
        .await
        .expect("report");

    let text = rendered(&report);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "솔라나 (KRW-SOL)",
            "  Price: 150 KRW",
            "  Last day: decreased by 6.00%",
            "  Caution: fell more than 5%; trade with caution",
            "  Profit/loss: 100 KRW (50.00%)",
            "  7-day closing price (2 points)",
        ]
    );
}

#[tokio::test]
async fn terminal_report_without_price_or_chart() {
    let provider = Arc::new(CannedProvider::new(None, &[100.0, 101.0]));
    let dashboard = dashboard_with(provider).await;

    let report = dashboard
        .report("KRW-SOL", Granularity::Monthly, Some(Position::new(100.0, 2.0)))
        .await
        .expect("report");

    let text = rendered(&report);
    assert!(text.contains("  Price: price unavailable\n"));
    assert!(text.contains("  Last day: increased by 1.00%\n"));
    assert!(text.ends_with("  No monthly chart available\n"));
    assert!(!text.contains("Profit/loss"));
    assert!(!text.contains("Caution"));
}

#[tokio::test]
async fn terminal_catalog_listing() {
    let provider = Arc::new(CannedProvider::new(Some(150.0), &[100.0, 105.0]));
    let dashboard = dashboard_with(provider).await;

    let mut out = Vec::new();
    write_catalog(&mut out, dashboard.catalog()).expect("write to buffer");
    assert_eq!(String::from_utf8(out).expect("utf-8"), "KRW-SOL\t솔라나\n");
}
