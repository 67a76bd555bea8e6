//! One-shot terminal report for a single market.
//!
//! ```text
//! coinboard --list
//! coinboard 비트코인 --granularity monthly --chart-out btc.svg
//! coinboard KRW-ETH --average-price 3000000 --quantity 1.5
//! ```

use clap::Parser;
use coinboard::config::Config;
use coinboard::core::{write_catalog, write_report, Dashboard};
use coinboard::logging;
use coinboard::models::{Granularity, Position};
use coinboard::services::load_catalog;
use coinboard::services::upbit::UpbitMarketDataProvider;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "coinboard")]
#[command(about = "Upbit market report: price, closing-price chart, change alert, profit/loss")]
struct Cli {
    /// Market display name or code (e.g. KRW-BTC)
    market: Option<String>,

    /// Print the market catalog and exit
    #[arg(long)]
    list: bool,

    /// Chart window: daily or monthly
    #[arg(short, long, default_value = "daily")]
    granularity: Granularity,

    /// Average purchase price of the held position
    #[arg(long, default_value_t = 0.0)]
    average_price: f64,

    /// Quantity held
    #[arg(long, default_value_t = 0.0)]
    quantity: f64,

    /// Write the chart as SVG to this path
    #[arg(long)]
    chart_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let provider = Arc::new(UpbitMarketDataProvider::new(config.api_base_url.clone()));
    let catalog = load_catalog(provider.as_ref(), &config.quote_currency, config.locale).await?;
    let dashboard = Dashboard::new(provider, Arc::new(catalog), config.currency_suffix());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        write_catalog(&mut out, dashboard.catalog())?;
        return Ok(());
    }

    let Some(name) = cli.market.as_deref() else {
        return Err("a market name or code is required (or pass --list)".into());
    };

    let position = Position::new(cli.average_price, cli.quantity);
    let report = dashboard
        .report(name, cli.granularity, Some(position))
        .await?;

    write_report(&mut out, &report)?;

    if let (Some(path), Some(chart)) = (&cli.chart_out, &report.chart) {
        std::fs::write(path, chart.as_str())?;
        info!(path = %path.display(), "Wrote chart");
    }

    Ok(())
}
