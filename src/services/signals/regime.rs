//! Volatility regime classification.

use crate::error::EngineError;
use crate::services::signals::ScoringConfig;
use crate::types::Regime;

/// ATR relative to the mean high-low range of the window.
pub fn volatility_ratio(atr: f64, avg_range: f64) -> Result<f64, EngineError> {
    if avg_range <= 0.0 {
        return Err(EngineError::InsufficientData(
            "zero average range in window".to_string(),
        ));
    }
    Ok(atr / avg_range)
}

/// VOLATILE above the volatile threshold, COMPRESSION below the compression
/// threshold, RANGE otherwise. A ratio equal to either threshold is RANGE.
pub fn classify(ratio: f64, config: &ScoringConfig) -> Regime {
    if ratio > config.volatile_ratio {
        Regime::Volatile
    } else if ratio < config.compression_ratio {
        Regime::Compression
    } else {
        Regime::Range
    }
}
