//! Derived signals over fetched market data.

pub mod change;
pub mod position;

pub use change::{classify_change, evaluate_change, ChangeOutcome, UnavailableReason};
pub use position::{evaluate_position, PositionOutcome};
