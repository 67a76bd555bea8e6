//! Shared data models spanning the pipeline stages.

pub mod candle;
pub mod market;
pub mod position;
pub mod series;

pub use candle::{Candle, Granularity};
pub use market::{Catalog, CatalogConflict, Market};
pub use position::Position;
pub use series::{scale, unscale, PricePoint, PriceSeries, SCALE_FACTOR};
