//! Exponential Moving Average (EMA).

use crate::error::EngineError;

/// EMA of `xs` with smoothing `k = 2 / (period + 1)`.
///
/// Seeded with the first element rather than an SMA, so inputs shorter than
/// `period` still produce a value; the effective lookback is then `xs.len()`.
pub fn ema(xs: &[f64], period: usize) -> Result<f64, EngineError> {
    if period == 0 {
        return Err(EngineError::Configuration(
            "EMA period must be at least 1".to_string(),
        ));
    }
    let (first, rest) = xs.split_first().ok_or_else(|| {
        EngineError::InsufficientData("EMA of an empty sequence".to_string())
    })?;

    let k = 2.0 / (period as f64 + 1.0);
    Ok(rest.iter().fold(*first, |prev, x| prev + k * (x - prev)))
}
