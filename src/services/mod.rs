//! Exchange-facing services: provider trait, Upbit client, and the fetch
//! stages of the pipeline.

pub mod candles;
pub mod catalog;
pub mod market_data;
pub mod quote;
pub mod upbit;

pub use candles::fetch_candles;
pub use catalog::{build_catalog, load_catalog};
pub use market_data::{MarketDataProvider, MarketListing, Ticker};
pub use quote::fetch_quote;
