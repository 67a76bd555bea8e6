//! Market-data dashboard for the Upbit public REST API.
//!
//! Loads the market catalog once, then per interaction fetches the latest
//! quote and a daily or monthly candle window, normalizes it into a
//! closing-price series, renders it as an SVG chart, and derives a change
//! alert and position profit/loss.

pub mod charts;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{DashboardError, Result};
