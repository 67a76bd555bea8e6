//! Closing-price series derived from candle windows.

use super::candle::Candle;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Divisor applied to prices for chart-axis readability.
pub const SCALE_FACTOR: f64 = 10_000_000.0;

/// Price → display value
pub fn scale(price: f64) -> f64 {
    price / SCALE_FACTOR
}

/// Display value → price
pub fn unscale(value: f64) -> f64 {
    value * SCALE_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: f64,
}

/// Time-ascending closing prices with strictly increasing timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Normalize a candle window in any order (the exchange sends newest
    /// first). A repeated timestamp keeps the close listed first, which is
    /// the freshest record in exchange order.
    pub fn from_candles(candles: &[Candle]) -> Self {
        let mut points: Vec<PricePoint> = candles
            .iter()
            .map(|c| PricePoint {
                timestamp: c.timestamp,
                close: c.close,
            })
            .collect();

        // Stable sort keeps exchange order among equal timestamps
        points.sort_by_key(|p| p.timestamp);
        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last() {
                Some(last) if last.timestamp == point.timestamp => {}
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The two most recent closes as `(previous, current)`
    pub fn last_two_closes(&self) -> Option<(f64, f64)> {
        match self.points.as_slice() {
            [.., previous, current] => Some((previous.close, current.close)),
            _ => None,
        }
    }

    /// Display-scaled copy of the series
    pub fn scaled(&self) -> Vec<(NaiveDateTime, f64)> {
        self.points
            .iter()
            .map(|p| (p.timestamp, scale(p.close)))
            .collect()
    }
}
