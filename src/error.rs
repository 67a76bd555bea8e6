//! Error types shared by the market-data pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Market catalog unavailable: {0}")]
    CatalogUnavailable(String),

    #[error("Quote unavailable for {code}: {reason}")]
    QuoteUnavailable { code: String, reason: String },

    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Exchange returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::Parse(err.to_string())
    }
}

impl From<url::ParseError> for DashboardError {
    fn from(err: url::ParseError) -> Self {
        DashboardError::Config(format!("invalid URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
