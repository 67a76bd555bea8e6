use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OHLC candle in the exchange's local time zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Candle bucket size and the fixed window requested for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
}

impl Granularity {
    /// Candles per window: the current bucket plus 7 prior days or 12 prior months
    pub fn window_len(self) -> usize {
        match self {
            Granularity::Daily => 8,
            Granularity::Monthly => 13,
        }
    }

    /// Exchange candle endpoint path segment
    pub fn endpoint(self) -> &'static str {
        match self {
            Granularity::Daily => "days",
            Granularity::Monthly => "months",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            Granularity::Daily => "7-day closing price",
            Granularity::Monthly => "12-month closing price",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Daily => "daily",
            Granularity::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "daily" | "day" | "days" => Ok(Granularity::Daily),
            "monthly" | "month" | "months" => Ok(Granularity::Monthly),
            other => Err(format!("unknown granularity '{}'", other)),
        }
    }
}
