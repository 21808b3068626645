//! Entry, stop-loss and target derivation.

use crate::types::{TradeLevels, TradeSignal};

/// Breakout levels for CALL, breakdown levels for PUT, nothing for WAIT.
///
/// The target sits `risk_reward` times the entry-to-stop distance beyond the
/// entry.
pub fn compute_levels(
    signal: TradeSignal,
    recent_high: f64,
    recent_low: f64,
    risk_reward: f64,
) -> Option<TradeLevels> {
    match signal {
        TradeSignal::Call => {
            let entry = recent_high;
            let stop_loss = recent_low;
            Some(TradeLevels {
                entry,
                stop_loss,
                target: entry + (entry - stop_loss) * risk_reward,
            })
        }
        TradeSignal::Put => {
            let entry = recent_low;
            let stop_loss = recent_high;
            Some(TradeLevels {
                entry,
                stop_loss,
                target: entry - (stop_loss - entry) * risk_reward,
            })
        }
        TradeSignal::Wait => None,
    }
}
