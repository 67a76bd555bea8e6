use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tradable market against the configured quote currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    /// Exchange code, e.g. `KRW-BTC`
    pub code: String,
    /// Localized display name
    pub display_name: String,
}

impl Market {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

/// A listing entry that did not make it into the catalog as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogConflict {
    /// A later market with the same display name took this one's slot
    Replaced { previous: Market, by: Market },
    /// Code already listed under another display name; the later entry is dropped
    DuplicateCode(Market),
}

/// Display name → market code mapping, built once and read-only afterwards.
///
/// Entries keep the order the exchange listed them in, which is the order
/// the selection menu shows.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    markets: Vec<Market>,
    by_name: HashMap<String, usize>,
    by_code: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog. For a repeated display name the last listed market
    /// wins but stays at the position the name first appeared.
    pub fn from_markets<I>(markets: I) -> (Self, Vec<CatalogConflict>)
    where
        I: IntoIterator<Item = Market>,
    {
        let mut catalog = Catalog::default();
        let mut conflicts = Vec::new();

        for market in markets {
            if let Some(&i) = catalog.by_code.get(&market.code) {
                if catalog.markets[i].display_name != market.display_name {
                    conflicts.push(CatalogConflict::DuplicateCode(market));
                    continue;
                }
            }

            if let Some(&i) = catalog.by_name.get(&market.display_name) {
                let previous = std::mem::replace(&mut catalog.markets[i], market.clone());
                catalog.by_code.remove(&previous.code);
                catalog.by_code.insert(market.code.clone(), i);
                conflicts.push(CatalogConflict::Replaced {
                    previous,
                    by: market,
                });
                continue;
            }

            let index = catalog.markets.len();
            catalog.by_name.insert(market.display_name.clone(), index);
            catalog.by_code.insert(market.code.clone(), index);
            catalog.markets.push(market);
        }

        (catalog, conflicts)
    }

    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Market code for a display name
    pub fn code_for(&self, display_name: &str) -> Option<&str> {
        self.by_name
            .get(display_name)
            .map(|&i| self.markets[i].code.as_str())
    }

    pub fn by_code(&self, code: &str) -> Option<&Market> {
        self.by_code.get(code).map(|&i| &self.markets[i])
    }

    /// Resolve either a display name or a market code
    pub fn resolve(&self, name_or_code: &str) -> Option<&Market> {
        self.by_name
            .get(name_or_code)
            .or_else(|| self.by_code.get(name_or_code))
            .map(|&i| &self.markets[i])
    }

    /// Display names in menu order
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.markets.iter().map(|m| m.display_name.as_str())
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }
}
