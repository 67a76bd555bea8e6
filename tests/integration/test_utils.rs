//! Shared fixtures: a wiremock-backed Upbit API and a router wired to it.

use std::sync::Arc;
use std::time::Instant;

use axum_test::TestServer;
use coinboard::config::CatalogLocale;
use coinboard::core::http::{create_router, AppState};
use coinboard::core::Dashboard;
use coinboard::metrics::Metrics;
use coinboard::services::load_catalog;
use coinboard::services::upbit::{UpbitMarketDataProvider, UpbitRestClient};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Ascending daily closes for KRW-BTC; the last move is +5.56%.
pub const BTC_DAILY_CLOSES: [f64; 8] = [
    88_000_000.0,
    89_000_000.0,
    90_500_000.0,
    91_000_000.0,
    89_500_000.0,
    90_000_000.0,
    90_000_000.0,
    95_000_000.0,
];

pub const BTC_PRICE: f64 = 95_123_000.0;

pub fn market_listing() -> Value {
    json!([
        {"market": "KRW-BTC", "korean_name": "비트코인", "english_name": "Bitcoin"},
        {"market": "KRW-ETH", "korean_name": "이더리움", "english_name": "Ethereum"},
        {"market": "BTC-ETH", "korean_name": "이더리움", "english_name": "Ethereum"},
        {"market": "USDT-BTC", "korean_name": "비트코인", "english_name": "Bitcoin"},
        {"market": "KRW-XRP", "korean_name": "리플", "english_name": "XRP", "market_warning": "NONE"}
    ])
}

pub fn candle_record(code: &str, kst: &str, close: f64) -> Value {
    json!({
        "market": code,
        "candle_date_time_utc": kst,
        "candle_date_time_kst": kst,
        "opening_price": close * 0.99,
        "high_price": close * 1.01,
        "low_price": close * 0.98,
        "trade_price": close,
        "timestamp": 1_704_700_000_000_i64,
        "candle_acc_trade_price": close * 10.0,
        "candle_acc_trade_volume": 10.0
    })
}

/// Daily window newest first, as the exchange sends it
pub fn daily_candles(code: &str, ascending_closes: &[f64]) -> Value {
    let records: Vec<Value> = ascending_closes
        .iter()
        .enumerate()
        .rev()
        .map(|(i, close)| {
            candle_record(code, &format!("2024-01-{:02}T09:00:00", i + 1), *close)
        })
        .collect();
    Value::Array(records)
}

/// Monthly window newest first: 2023-01 .. 2024-01
pub fn monthly_candles(code: &str) -> Value {
    let records: Vec<Value> = (0..13)
        .rev()
        .map(|i| {
            let (year, month) = if i < 12 { (2023, i + 1) } else { (2024, 1) };
            let close = 60_000_000.0 + i as f64 * 2_500_000.0;
            candle_record(code, &format!("{}-{:02}-01T09:00:00", year, month), close)
        })
        .collect();
    Value::Array(records)
}

pub async fn mock_market_all(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/market/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_listing()))
        .mount(server)
        .await;
}

pub async fn mock_ticker(server: &MockServer, code: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/ticker"))
        .and(query_param("markets", code))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mock_candles(server: &MockServer, endpoint: &str, code: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/candles/{}", endpoint)))
        .and(query_param("market", code))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mocks for KRW-BTC (everything available) and KRW-ETH (ticker and
/// candles failing). KRW-XRP has no mocks at all.
pub async fn mock_upbit() -> MockServer {
    let server = MockServer::start().await;
    mock_market_all(&server).await;

    mock_ticker(
        &server,
        "KRW-BTC",
        json!([{"market": "KRW-BTC", "trade_price": BTC_PRICE, "timestamp": 1_704_700_000_000_i64}]),
    )
    .await;
    mock_candles(&server, "days", "KRW-BTC", daily_candles("KRW-BTC", &BTC_DAILY_CLOSES)).await;
    mock_candles(&server, "months", "KRW-BTC", monthly_candles("KRW-BTC")).await;

    Mock::given(method("GET"))
        .and(path("/v1/ticker"))
        .and(query_param("markets", "KRW-ETH"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/candles/days"))
        .and(query_param("market", "KRW-ETH"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    server
}

pub fn provider_for(server: &MockServer) -> UpbitMarketDataProvider {
    let client = UpbitRestClient::with_client(server.uri(), reqwest::Client::new());
    UpbitMarketDataProvider::with_client(Arc::new(client))
}

/// Router backed by the mocked exchange.
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub upbit: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let upbit = mock_upbit().await;
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let provider = Arc::new(provider_for(&upbit).with_metrics(metrics.clone()));

        let catalog = load_catalog(provider.as_ref(), "KRW", CatalogLocale::Korean)
            .await
            .expect("catalog loads from mock");
        let dashboard = Dashboard::new(provider, Arc::new(catalog), "KRW");

        Self::with_dashboard(upbit, metrics, Some(Arc::new(dashboard)))
    }

    /// Router whose catalog failed to load
    pub async fn without_catalog() -> Self {
        let upbit = MockServer::start().await;
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        Self::with_dashboard(upbit, metrics, None)
    }

    fn with_dashboard(
        upbit: MockServer,
        metrics: Arc<Metrics>,
        dashboard: Option<Arc<Dashboard>>,
    ) -> Self {
        let state = AppState {
            metrics: metrics.clone(),
            start_time: Arc::new(Instant::now()),
            dashboard,
        };
        let server = TestServer::new(create_router(state)).expect("start test server");

        Self {
            server,
            metrics,
            upbit,
        }
    }
}
