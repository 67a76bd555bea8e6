//! Core application primitives (pipeline orchestration, HTTP surface)

pub mod dashboard;
pub mod http;
pub mod terminal;

pub use dashboard::{Dashboard, MarketReport, PRICE_UNAVAILABLE};
pub use http::{create_router, start_server, AppState};
pub use terminal::{write_catalog, write_report};
