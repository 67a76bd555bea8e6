use serde::{Deserialize, Serialize};

/// A user-entered holding for the selected market. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub average_price: f64,
    #[serde(default)]
    pub quantity: f64,
}

impl Position {
    /// Negative and non-finite inputs are clamped to zero, matching a form
    /// field with a minimum of 0.
    pub fn new(average_price: f64, quantity: f64) -> Self {
        Self {
            average_price: non_negative(average_price),
            quantity: non_negative(quantity),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
