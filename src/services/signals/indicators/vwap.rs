//! Volume Weighted Average Price (VWAP).

use crate::error::EngineError;
use crate::types::Candle;

/// (High + Low + Close) / 3
pub fn typical_price(candle: &Candle) -> f64 {
    (candle.high + candle.low + candle.close) / 3.0
}

/// VWAP = Σ(TP × Volume) / Σ(Volume), with a missing volume counted as 1.
///
/// Every volume must be finite and non-negative.
pub fn vwap(candles: &[Candle]) -> Result<f64, EngineError> {
    if candles.iter().any(|c| {
        let vol = c.volume_or_default();
        !vol.is_finite() || vol < 0.0
    }) {
        return Err(EngineError::InsufficientData(
            "VWAP needs finite, non-negative volumes".to_string(),
        ));
    }

    let (cum_tp_vol, cum_vol) = candles.iter().fold((0.0, 0.0), |(pv, v), candle| {
        let vol = candle.volume_or_default();
        (pv + typical_price(candle) * vol, v + vol)
    });

    if cum_vol <= 0.0 {
        return Err(EngineError::InsufficientData(
            "VWAP needs positive total volume".to_string(),
        ));
    }

    Ok(cum_tp_vol / cum_vol)
}
