//! Market catalog loading.

use crate::config::CatalogLocale;
use crate::error::{DashboardError, Result};
use crate::models::{Catalog, CatalogConflict, Market};
use crate::services::market_data::{MarketDataProvider, MarketListing};
use tracing::{info, warn};

/// Fetch the market listing once and keep the `<quote>-` markets.
///
/// Any fetch or parse failure is `CatalogUnavailable`: without a catalog
/// there is nothing to select, and callers show an empty state instead.
pub async fn load_catalog(
    provider: &(dyn MarketDataProvider + Send + Sync),
    quote_currency: &str,
    locale: CatalogLocale,
) -> Result<Catalog> {
    let listings = provider
        .list_markets()
        .await
        .map_err(|e| DashboardError::CatalogUnavailable(e.to_string()))?;

    let total = listings.len();
    let catalog = build_catalog(listings, quote_currency, locale);

    info!(
        quote_currency = quote_currency,
        total_markets = total,
        catalog_size = catalog.len(),
        "Loaded market catalog"
    );
    Ok(catalog)
}

/// Filter a listing to one quote-currency family and index it by display name.
pub fn build_catalog(
    listings: Vec<MarketListing>,
    quote_currency: &str,
    locale: CatalogLocale,
) -> Catalog {
    let prefix = format!("{}-", quote_currency);

    let markets = listings
        .into_iter()
        .filter(|listing| listing.code.starts_with(&prefix))
        .map(|listing| {
            let display_name = match locale {
                CatalogLocale::Korean => listing.korean_name,
                CatalogLocale::English if listing.english_name.is_empty() => listing.korean_name,
                CatalogLocale::English => listing.english_name,
            };
            Market::new(listing.code, display_name)
        });

    let (catalog, conflicts) = Catalog::from_markets(markets);
    for conflict in conflicts {
        match conflict {
            CatalogConflict::Replaced { previous, by } => warn!(
                display_name = %by.display_name,
                replaced_code = %previous.code,
                code = %by.code,
                "Duplicate display name, later market replaces earlier one"
            ),
            CatalogConflict::DuplicateCode(dup) => warn!(
                code = %dup.code,
                display_name = %dup.display_name,
                "Dropping market with duplicate code"
            ),
        }
    }
    catalog
}
