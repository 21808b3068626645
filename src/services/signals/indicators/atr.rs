//! Average True Range (ATR) and range measures.

use crate::error::EngineError;
use crate::types::Candle;

/// TR = max(High-Low, |High-PrevClose|, |Low-PrevClose|)
pub fn true_range(current: &Candle, previous: &Candle) -> f64 {
    let hl = current.high - current.low;
    let hc = (current.high - previous.close).abs();
    let lc = (current.low - previous.close).abs();
    hl.max(hc).max(lc)
}

/// Simple mean of the last `period` true ranges, or of all of them when
/// fewer are available.
pub fn atr(candles: &[Candle], period: usize) -> Result<f64, EngineError> {
    if period == 0 {
        return Err(EngineError::Configuration(
            "ATR period must be at least 1".to_string(),
        ));
    }
    if candles.len() < 2 {
        return Err(EngineError::InsufficientData(format!(
            "ATR needs at least 2 candles, got {}",
            candles.len()
        )));
    }

    let true_ranges: Vec<f64> = candles
        .windows(2)
        .map(|pair| true_range(&pair[1], &pair[0]))
        .collect();

    let recent = &true_ranges[true_ranges.len().saturating_sub(period)..];
    Ok(recent.iter().sum::<f64>() / recent.len() as f64)
}

/// Mean high-low range.
pub fn average_range(candles: &[Candle]) -> Result<f64, EngineError> {
    if candles.is_empty() {
        return Err(EngineError::InsufficientData(
            "average range of no candles".to_string(),
        ));
    }
    Ok(candles.iter().map(Candle::range).sum::<f64>() / candles.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_uptrend_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle::new(close + 0.5, close - 0.5, close)
            })
            .collect()
    }

    #[test]
    fn test_true_range_uses_gap() {
        let previous = Candle::new(101.0, 99.0, 100.0);
        let gap_up = Candle::new(106.0, 104.0, 105.0);
        assert_eq!(true_range(&gap_up, &previous), 6.0);

        let inside = Candle::new(100.5, 99.5, 100.0);
        assert_eq!(true_range(&inside, &previous), 1.0);
    }

    #[test]
    fn test_atr_uptrend() {
        // Each step: high - prevClose = 1.5 dominates a range of 1.0
        let candles = create_uptrend_candles(20);
        assert!((atr(&candles, 14).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_atr_uses_all_when_fewer_than_period() {
        let candles = create_uptrend_candles(4);
        assert!((atr(&candles, 14).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_atr_only_last_period() {
        let mut candles = create_uptrend_candles(5);
        // A wide early bar falls outside a period of 2
        candles[1] = Candle::new(130.0, 70.0, 101.0);
        let value = atr(&candles, 2).unwrap();
        assert!((value - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_atr_is_order_sensitive() {
        let mut candles = create_uptrend_candles(20);
        candles[10] = Candle::new(140.0, 108.0, 139.0);
        let forward = atr(&candles, 14).unwrap();
        let reversed: Vec<Candle> = candles.iter().rev().copied().collect();
        let backward = atr(&reversed, 14).unwrap();
        assert!((forward - backward).abs() > 1e-9);
    }

    #[test]
    fn test_atr_errors() {
        let candles = create_uptrend_candles(1);
        assert!(matches!(
            atr(&candles, 14),
            Err(EngineError::InsufficientData(_))
        ));
        assert!(matches!(
            atr(&create_uptrend_candles(5), 0),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_average_range() {
        let candles = create_uptrend_candles(10);
        assert!((average_range(&candles).unwrap() - 1.0).abs() < 1e-12);
        assert!(average_range(&[]).is_err());
    }
}
