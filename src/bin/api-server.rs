//! Coinboard API Server
//!
//! Serves quotes, closing-price series, SVG charts, change alerts and
//! position profit/loss for the markets in the Upbit catalog.

use coinboard::config::{get_environment, Config};
use coinboard::core::http::start_server;
use coinboard::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting Coinboard API Server");
    info!(environment = %get_environment(), "Environment");
    info!(
        api_base_url = %config.api_base_url,
        quote_currency = %config.quote_currency,
        locale = ?config.locale,
        "Exchange"
    );

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        result = start_server(config) => {
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
                return Err(e);
            }
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
