//! Environment-driven configuration.
//!
//! Binaries call `dotenvy::dotenv()` first, so values may come from a `.env`
//! file as well as the process environment.

use crate::error::{DashboardError, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.upbit.com";
pub const DEFAULT_QUOTE_CURRENCY: &str = "KRW";
pub const DEFAULT_PORT: u16 = 8080;

/// Which localized exchange name is used as the catalog's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogLocale {
    #[default]
    Korean,
    English,
}

impl std::str::FromStr for CatalogLocale {
    type Err = DashboardError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "korean" | "ko" => Ok(CatalogLocale::Korean),
            "english" | "en" => Ok(CatalogLocale::English),
            other => Err(DashboardError::Config(format!(
                "CATALOG_LOCALE must be 'korean' or 'english', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Exchange REST base URL, without a trailing slash
    pub api_base_url: String,
    /// Quote currency family the catalog is filtered to (e.g. `KRW`)
    pub quote_currency: String,
    pub locale: CatalogLocale,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            locale: CatalogLocale::default(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Read configuration from the environment, falling back to defaults for
    /// unset variables. Set-but-invalid values are errors.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(url) = env::var("UPBIT_API_URL") {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Ok(quote) = env::var("QUOTE_CURRENCY") {
            let quote = quote.trim().to_ascii_uppercase();
            if quote.is_empty() {
                return Err(DashboardError::Config(
                    "QUOTE_CURRENCY must not be empty".to_string(),
                ));
            }
            config.quote_currency = quote;
        }

        if let Ok(locale) = env::var("CATALOG_LOCALE") {
            config.locale = locale.parse()?;
        }

        if let Ok(port) = env::var("PORT") {
            config.port = port.trim().parse().map_err(|_| {
                DashboardError::Config(format!("PORT must be a port number, got '{}'", port))
            })?;
        }

        Ok(config)
    }

    /// Axis/label suffix for amounts in the quote currency
    pub fn currency_suffix(&self) -> &str {
        &self.quote_currency
    }
}

/// Deployment environment name (`APP_ENV`), defaulting to `sandbox`
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}
