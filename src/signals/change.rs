//! Day-over-day change classification.

use crate::format::percent;
use crate::models::PriceSeries;
use serde::Serialize;

/// Moves strictly beyond this many percent are flagged for caution.
pub const CAUTION_THRESHOLD_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Fewer than two closes
    InsufficientData,
    /// Previous close is zero
    ZeroBaseline,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChangeOutcome {
    Increased { change_pct: f64, caution: bool },
    Decreased { change_pct: f64, caution: bool },
    Unchanged,
    Unavailable { reason: UnavailableReason },
}

impl ChangeOutcome {
    pub fn caution(&self) -> bool {
        match self {
            ChangeOutcome::Increased { caution, .. } | ChangeOutcome::Decreased { caution, .. } => {
                *caution
            }
            _ => false,
        }
    }

    /// Short notice, e.g. `increased by 5.00%`
    pub fn message(&self) -> String {
        match self {
            ChangeOutcome::Increased { change_pct, .. } => {
                format!("increased by {}", percent(*change_pct))
            }
            ChangeOutcome::Decreased { change_pct, .. } => {
                format!("decreased by {}", percent(change_pct.abs()))
            }
            ChangeOutcome::Unchanged => "no change".to_string(),
            ChangeOutcome::Unavailable { .. } => "N/A".to_string(),
        }
    }

    pub fn caution_notice(&self) -> Option<String> {
        match self {
            ChangeOutcome::Increased { caution: true, .. } => Some(format!(
                "rose more than {}%; trade with caution",
                CAUTION_THRESHOLD_PCT
            )),
            ChangeOutcome::Decreased { caution: true, .. } => Some(format!(
                "fell more than {}%; trade with caution",
                CAUTION_THRESHOLD_PCT
            )),
            _ => None,
        }
    }
}

/// Classify the move between the two most recent closes of a daily series.
///
/// Undersized series and a zero previous close are reported as
/// `Unavailable`; this never divides by zero.
pub fn evaluate_change(series: &PriceSeries) -> ChangeOutcome {
    let Some((previous, current)) = series.last_two_closes() else {
        return ChangeOutcome::Unavailable {
            reason: UnavailableReason::InsufficientData,
        };
    };

    if previous == 0.0 {
        return ChangeOutcome::Unavailable {
            reason: UnavailableReason::ZeroBaseline,
        };
    }

    classify_change((current - previous) * 100.0 / previous)
}

pub fn classify_change(change_pct: f64) -> ChangeOutcome {
    if change_pct > 0.0 {
        ChangeOutcome::Increased {
            change_pct,
            caution: change_pct > CAUTION_THRESHOLD_PCT,
        }
    } else if change_pct < 0.0 {
        ChangeOutcome::Decreased {
            change_pct,
            caution: change_pct < -CAUTION_THRESHOLD_PCT,
        }
    } else {
        ChangeOutcome::Unchanged
    }
}
