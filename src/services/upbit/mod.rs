//! Upbit exchange integration.

pub mod client;
pub mod messages;
pub mod provider;

pub use client::UpbitRestClient;
pub use provider::UpbitMarketDataProvider;
