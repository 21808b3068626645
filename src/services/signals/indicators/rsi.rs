//! Relative Strength Index (RSI).

use crate::error::EngineError;

/// RSI from the simple average gain and loss of the last `period` deltas.
///
/// Uses every available delta when the input holds fewer than `period + 1`
/// values. With no losses the oscillator saturates at 100. Result is in
/// [0, 100].
pub fn rsi(xs: &[f64], period: usize) -> Result<f64, EngineError> {
    if period == 0 {
        return Err(EngineError::Configuration(
            "RSI period must be at least 1".to_string(),
        ));
    }
    if xs.len() < 2 {
        return Err(EngineError::InsufficientData(format!(
            "RSI needs at least 2 values, got {}",
            xs.len()
        )));
    }

    let start = xs.len().saturating_sub(period + 1);
    let (gains, losses, count) =
        xs[start..]
            .windows(2)
            .fold((0.0, 0.0, 0usize), |(g, l, n), pair| {
                let change = pair[1] - pair[0];
                if change > 0.0 {
                    (g + change, l, n + 1)
                } else {
                    (g, l - change, n + 1)
                }
            });

    let avg_gain = gains / count as f64;
    let avg_loss = losses / count as f64;

    if avg_loss == 0.0 {
        return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
}
