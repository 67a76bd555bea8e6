//! Prometheus metrics for the HTTP surface and exchange calls.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    /// Labelled by endpoint (`market_all`, `ticker`, `candles_days`, ...)
    pub exchange_requests_total: IntCounterVec,
    pub exchange_request_failures_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total HTTP requests served")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let exchange_requests_total = IntCounterVec::new(
            Opts::new("exchange_requests_total", "Requests sent to the exchange API"),
            &["endpoint"],
        )?;
        let exchange_request_failures_total = IntCounterVec::new(
            Opts::new(
                "exchange_request_failures_total",
                "Exchange API requests that failed or returned unusable data",
            ),
            &["endpoint"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(exchange_requests_total.clone()))?;
        registry.register(Box::new(exchange_request_failures_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            exchange_requests_total,
            exchange_request_failures_total,
        })
    }

    pub fn record_exchange_request(&self, endpoint: &str, success: bool) {
        self.exchange_requests_total
            .with_label_values(&[endpoint])
            .inc();
        if !success {
            self.exchange_request_failures_total
                .with_label_values(&[endpoint])
                .inc();
        }
    }

    /// Render all metrics in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
