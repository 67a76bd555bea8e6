//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::config::Config;
use crate::core::dashboard::Dashboard;
use crate::format::currency;
use crate::metrics::Metrics;
use crate::models::{Granularity, Market, Position};
use crate::services::load_catalog;
use crate::services::upbit::UpbitMarketDataProvider;
use crate::signals::evaluate_position;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    /// `None` when the catalog could not be loaded at startup
    pub dashboard: Option<Arc<Dashboard>>,
}

/// `degraded` when the catalog failed to load and only health and metrics are served
fn health_status(state: &AppState) -> &'static str {
    if state.dashboard.is_some() {
        "healthy"
    } else {
        "degraded"
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health_status(&state),
        "uptime_seconds": uptime_seconds,
        "catalog_loaded": state.dashboard.is_some(),
        "service": "coinboard"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();
    let response = next.run(request).await;
    state.metrics.http_requests_in_flight.dec();

    let status = response.status();
    let duration = start.elapsed();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        warn!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Default, Deserialize)]
struct PositionQuery {
    average_price: Option<f64>,
    quantity: Option<f64>,
}

impl PositionQuery {
    fn position(&self) -> Position {
        Position::new(
            self.average_price.unwrap_or_default(),
            self.quantity.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Default, Deserialize)]
struct ReportQuery {
    granularity: Option<String>,
    average_price: Option<f64>,
    quantity: Option<f64>,
}

fn dashboard(state: &AppState) -> Result<&Arc<Dashboard>, StatusCode> {
    state
        .dashboard
        .as_ref()
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

fn market<'a>(dashboard: &'a Dashboard, code: &str) -> Result<&'a Market, StatusCode> {
    dashboard
        .catalog()
        .by_code(code)
        .ok_or(StatusCode::NOT_FOUND)
}

fn granularity(value: &str) -> Result<Granularity, StatusCode> {
    value.parse().map_err(|_| StatusCode::BAD_REQUEST)
}

/// List the catalog in menu order
async fn list_markets(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let markets = dashboard.catalog().markets();
    Ok(Json(json!({
        "count": markets.len(),
        "markets": markets,
    })))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;

    let price = dashboard.quote(&market.code).await.map_err(|e| {
        warn!(error = %e, code = %code, "Quote unavailable");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    Ok(Json(json!({
        "code": market.code,
        "display_name": market.display_name,
        "price": price,
        "formatted": currency(price, dashboard.currency_suffix()),
    })))
}

async fn get_series(
    State(state): State<AppState>,
    Path((code, granularity_name)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;
    let granularity = granularity(&granularity_name)?;

    let series = dashboard
        .series(&market.code, granularity)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(json!({
        "code": market.code,
        "granularity": granularity,
        "points": series.points(),
        "scaled": series.scaled(),
    })))
}

async fn get_chart(
    State(state): State<AppState>,
    Path((code, granularity_name)): Path<(String, String)>,
) -> Result<Response, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;
    let granularity = granularity(&granularity_name)?;

    let figure = dashboard
        .chart(&market.code, granularity)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok((
        [(header::CONTENT_TYPE, figure.content_type())],
        figure.into_string(),
    )
        .into_response())
}

async fn get_alert(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;

    let change = dashboard.change(&market.code).await;
    Ok(Json(json!({
        "code": market.code,
        "change": change,
        "message": change.message(),
        "caution": change.caution_notice(),
    })))
}

async fn get_position(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<PositionQuery>,
) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;

    // Without a price there is nothing to mark the position against
    let price = dashboard.quote(&market.code).await.map_err(|e| {
        warn!(error = %e, code = %code, "Skipping profit/loss, quote unavailable");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let outcome = evaluate_position(&params.position(), price);
    Ok(Json(json!({
        "code": market.code,
        "price": price,
        "position": outcome,
        "message": outcome.message(dashboard.currency_suffix()),
    })))
}

async fn get_report(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<Value>, StatusCode> {
    let dashboard = dashboard(&state)?;
    let market = market(dashboard, &code)?;
    let granularity = match params.granularity.as_deref() {
        Some(value) => granularity(value)?,
        None => Granularity::Daily,
    };
    let position = PositionQuery {
        average_price: params.average_price,
        quantity: params.quantity,
    }
    .position();

    let report = dashboard
        .report(&market.code, granularity, Some(position))
        .await
        .map_err(|e| {
            error!(error = %e, code = %code, "Failed to build report");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    serde_json::to_value(&report).map(Json).map_err(|e| {
        error!(error = %e, "Failed to serialize report");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/markets", get(list_markets))
        .route("/api/markets/{code}/quote", get(get_quote))
        .route("/api/markets/{code}/series/{granularity}", get(get_series))
        .route("/api/markets/{code}/chart/{granularity}", get(get_chart))
        .route("/api/markets/{code}/alert", get(get_alert))
        .route("/api/markets/{code}/position", get(get_position))
        .route("/api/markets/{code}/report", get(get_report))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = Arc::new(
        UpbitMarketDataProvider::new(config.api_base_url.clone()).with_metrics(metrics.clone()),
    );

    // Loaded once; a failure leaves the market routes answering 503
    let catalog = load_catalog(provider.as_ref(), &config.quote_currency, config.locale).await;
    let dashboard = match catalog {
        Ok(catalog) => {
            info!(markets = catalog.len(), "Market catalog ready");
            Some(Arc::new(Dashboard::new(
                provider,
                Arc::new(catalog),
                config.currency_suffix(),
            )))
        }
        Err(e) => {
            error!(error = %e, "Failed to load market catalog - market endpoints will be unavailable");
            None
        }
    };

    let state = AppState {
        metrics,
        start_time: Arc::new(Instant::now()),
        dashboard,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
