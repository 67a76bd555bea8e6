//! Upbit REST payloads.

use crate::models::Candle;
use crate::services::market_data::{MarketListing, Ticker};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `GET /v1/market/all` entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRecord {
    pub market: String,
    pub korean_name: String,
    #[serde(default)]
    pub english_name: String,
}

impl From<MarketRecord> for MarketListing {
    fn from(record: MarketRecord) -> Self {
        Self {
            code: record.market,
            korean_name: record.korean_name,
            english_name: record.english_name,
        }
    }
}

/// `GET /v1/ticker` entry; only the fields the dashboard reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerRecord {
    pub market: String,
    pub trade_price: f64,
}

impl From<TickerRecord> for Ticker {
    fn from(record: TickerRecord) -> Self {
        Self {
            code: record.market,
            trade_price: record.trade_price,
        }
    }
}

/// `GET /v1/candles/{days,months}` entry; only the fields the dashboard
/// reads. `trade_price` is the close.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandleRecord {
    pub candle_date_time_kst: NaiveDateTime,
    pub opening_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub trade_price: f64,
    #[serde(default)]
    pub candle_acc_trade_volume: f64,
}

impl From<CandleRecord> for Candle {
    fn from(record: CandleRecord) -> Self {
        Candle::new(
            record.opening_price,
            record.high_price,
            record.low_price,
            record.trade_price,
            record.candle_acc_trade_volume,
            record.candle_date_time_kst,
        )
    }
}
