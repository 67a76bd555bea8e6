//! Held-position profit/loss.

use crate::format::{currency, percent};
use crate::models::Position;
use serde::Serialize;

pub const ENTER_QUANTITY_NOTICE: &str = "Enter the quantity held.";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PositionOutcome {
    /// Quantity is zero, nothing to compute
    NeedsQuantity,
    Computed {
        profit: f64,
        /// `None` when the cost basis is zero
        profit_pct: Option<f64>,
    },
}

impl PositionOutcome {
    pub fn message(&self, currency_suffix: &str) -> String {
        match self {
            PositionOutcome::NeedsQuantity => ENTER_QUANTITY_NOTICE.to_string(),
            PositionOutcome::Computed {
                profit,
                profit_pct: Some(pct),
            } => format!(
                "Profit/loss: {} ({})",
                currency(*profit, currency_suffix),
                percent(*pct)
            ),
            PositionOutcome::Computed {
                profit,
                profit_pct: None,
            } => format!("Profit/loss: {} (N/A)", currency(*profit, currency_suffix)),
        }
    }
}

/// Profit/loss of `position` marked at `current_price`.
pub fn evaluate_position(position: &Position, current_price: f64) -> PositionOutcome {
    if position.quantity == 0.0 {
        return PositionOutcome::NeedsQuantity;
    }

    let profit = (current_price - position.average_price) * position.quantity;
    let cost_basis = position.average_price * position.quantity;
    let profit_pct = if cost_basis == 0.0 {
        None
    } else {
        Some(profit / cost_basis * 100.0)
    };

    PositionOutcome::Computed { profit, profit_pct }
}
