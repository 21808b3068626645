//! Close-to-close trend slope.

use crate::error::EngineError;

/// Latest value minus the value `lookback` steps earlier.
pub fn trend_slope(xs: &[f64], lookback: usize) -> Result<f64, EngineError> {
    if xs.len() <= lookback {
        return Err(EngineError::InsufficientData(format!(
            "trend slope over {} steps needs {} values, got {}",
            lookback,
            lookback + 1,
            xs.len()
        )));
    }
    let last = xs.len() - 1;
    Ok(xs[last] - xs[last - lookback])
}
