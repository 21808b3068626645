//! Signal scoring engine: candles in, one decision out.

use tracing::debug;

use crate::error::EngineError;
use crate::services::signals::indicators::{
    atr, average_range, ema, rsi, trend_slope, vwap, z_score,
};
use crate::services::signals::{levels, regime, scoring, ScoringConfig};
use crate::types::{Candle, CandleWindow, Decision, IndicatorSet};

/// Stateless engine bound to a validated scoring configuration.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: ScoringConfig,
}

impl SignalEngine {
    /// Validate `config` and bind it to a new engine.
    pub fn new(config: ScoringConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Minimum number of candles `evaluate` accepts.
    pub fn min_lookback(&self) -> usize {
        self.config.window
    }

    pub fn evaluate(&self, candles: &[Candle]) -> Result<Decision, EngineError> {
        run(candles, &self.config)
    }
}

/// Evaluate `candles` under `config`.
///
/// Fails with `InsufficientData` when fewer than `config.window` candles are
/// supplied or the window is degenerate, and with `Configuration` when the
/// config does not validate.
pub fn evaluate(candles: &[Candle], config: &ScoringConfig) -> Result<Decision, EngineError> {
    config.validate()?;
    run(candles, config)
}

fn run(candles: &[Candle], config: &ScoringConfig) -> Result<Decision, EngineError> {
    let window = CandleWindow::last(candles, config.window).ok_or_else(|| {
        EngineError::InsufficientData(format!(
            "need at least {} candles, got {}",
            config.window,
            candles.len()
        ))
    })?;

    if window
        .candles()
        .iter()
        .any(|c| !(c.high.is_finite() && c.low.is_finite() && c.close.is_finite()))
    {
        return Err(EngineError::InsufficientData(
            "non-finite price in window".to_string(),
        ));
    }

    if window.candles().iter().any(|c| {
        let volume = c.volume_or_default();
        !volume.is_finite() || volume < 0.0
    }) {
        return Err(EngineError::InsufficientData(
            "non-finite or negative volume in window".to_string(),
        ));
    }

    let indicators = compute_indicators(&window, config)?;
    let regime = regime::classify(indicators.volatility_ratio, config);

    let mut scores = scoring::score_factors(&indicators, config);
    scoring::apply_regime(&mut scores, regime, config);
    let (signal, confidence, confirmation) = scoring::decide(&scores, config);

    let (recent_high, recent_low) = window.recent_extremes(config.level_lookback);
    let trade_levels = levels::compute_levels(signal, recent_high, recent_low, config.risk_reward);

    debug!(
        "{} decision: {} conf={:.1} regime={} bull={:.1} bear={:.1}",
        config.name, signal, confidence, regime, scores.bull_score, scores.bear_score
    );

    Ok(Decision {
        signal,
        confidence,
        regime,
        price: indicators.price,
        confirmation,
        scores,
        indicators,
        entry: trade_levels.map(|l| l.entry),
        stop_loss: trade_levels.map(|l| l.stop_loss),
        target: trade_levels.map(|l| l.target),
    })
}

/// Derive every indicator the factors need from one window.
pub fn compute_indicators(
    window: &CandleWindow<'_>,
    config: &ScoringConfig,
) -> Result<IndicatorSet, EngineError> {
    let candles = window.candles();
    let closes = window.closes();

    let current = window.current();
    let price = current.close;
    let prev_close = window.previous().map(|c| c.close).ok_or_else(|| {
        EngineError::InsufficientData("window has no previous close".to_string())
    })?;

    let atr = atr(candles, config.atr_period)?;
    let avg_range = average_range(candles)?;
    let volatility_ratio = regime::volatility_ratio(atr, avg_range)?;

    let ema_fast = ema(&closes, config.ema_fast_period)?;
    let ema_slow = ema(&closes, config.ema_slow_period)?;

    let z_score = z_score(price, &closes)?;

    let vwap = vwap(candles)?;
    if atr <= 0.0 {
        return Err(EngineError::InsufficientData(
            "zero ATR in window".to_string(),
        ));
    }
    let vwap_deviation = (price - vwap) / atr;

    let rsi = rsi(&closes, config.rsi_period)?;
    let trend_slope = trend_slope(&closes, config.trend_lookback)?;

    Ok(IndicatorSet {
        price,
        prev_close,
        atr,
        avg_range,
        volatility_ratio,
        ema_fast,
        ema_slow,
        slope: ema_fast - ema_slow,
        z_score,
        vwap,
        vwap_deviation,
        rsi,
        trend_slope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Confirmation, Regime, TradeSignal};

    fn rising_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 100.0 + i as f64;
                Candle::new(close + 0.5, close - 0.5, close)
            })
            .collect()
    }

    fn falling_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let close = 200.0 - i as f64;
                Candle::new(close + 0.5, close - 0.5, close)
            })
            .collect()
    }

    #[test]
    fn test_rising_window_is_call() {
        let candles = rising_candles(20);
        let decision = evaluate(&candles, &ScoringConfig::canonical()).unwrap();

        assert_eq!(decision.signal, TradeSignal::Call);
        assert!(decision.confidence >= 56.0);
        assert_eq!(decision.confidence, 100.0);
        assert_eq!(decision.regime, Regime::Volatile);
        assert_eq!(decision.confirmation, Confirmation::StronglyConfirmed);
        assert_eq!(decision.price, 119.0);
        assert!(decision.indicators.slope > 0.0);
        assert!(decision.indicators.z_score > 0.0);
    }

    #[test]
    fn test_rising_window_levels() {
        let candles = rising_candles(20);
        let decision = evaluate(&candles, &ScoringConfig::canonical()).unwrap();
        let levels = decision.levels().unwrap();
        // Last three candles: highs up to 119.5, lows down to 116.5
        assert_eq!(levels.entry, 119.5);
        assert_eq!(levels.stop_loss, 116.5);
        assert!((levels.target - 124.0).abs() < 1e-9);
    }

    #[test]
    fn test_falling_window_is_put() {
        let candles = falling_candles(25);
        let decision = evaluate(&candles, &ScoringConfig::canonical()).unwrap();
        assert_eq!(decision.signal, TradeSignal::Put);
        assert!(decision.scores.bear_score > decision.scores.bull_score);
        let levels = decision.levels().unwrap();
        assert!(levels.target < levels.entry);
        assert!(levels.stop_loss > levels.entry);
    }

    #[test]
    fn test_insufficient_candles() {
        let candles = rising_candles(19);
        let err = evaluate(&candles, &ScoringConfig::canonical()).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ScoringConfig {
            ema_slow_period: 0,
            ..ScoringConfig::canonical()
        };
        let err = evaluate(&rising_candles(20), &config).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(SignalEngine::new(config).is_err());
    }

    #[test]
    fn test_flat_window_is_degenerate() {
        let candles = vec![Candle::new(100.0, 100.0, 100.0); 20];
        let err = evaluate(&candles, &ScoringConfig::canonical()).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_zero_weights_produce_low_edge_wait() {
        let config = ScoringConfig {
            weights: crate::services::signals::FactorWeights::zero(),
            ..ScoringConfig::canonical()
        };
        let decision = evaluate(&rising_candles(20), &config).unwrap();
        assert_eq!(decision.signal, TradeSignal::Wait);
        assert_eq!(decision.scores.bull_score, 0.0);
        assert_eq!(decision.scores.bear_score, 0.0);
        assert_eq!(decision.confirmation, Confirmation::LowEdge);
        assert!(decision.levels().is_none());
    }

    #[test]
    fn test_only_window_suffix_is_used() {
        let mut candles = falling_candles(40);
        candles.extend(rising_candles(20));
        let decision = evaluate(&candles, &ScoringConfig::canonical()).unwrap();
        assert_eq!(decision.signal, TradeSignal::Call);
    }

    #[test]
    fn test_input_not_mutated() {
        let candles = rising_candles(30);
        let before = candles.clone();
        let _ = evaluate(&candles, &ScoringConfig::canonical()).unwrap();
        assert_eq!(candles, before);
    }

    #[test]
    fn test_infinite_volume_is_rejected() {
        let mut candles = rising_candles(20);
        candles[5] = candles[5].with_volume(f64::INFINITY);
        let err = evaluate(&candles, &ScoringConfig::canonical()).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));

        candles[5] = candles[5].with_volume(f64::NAN);
        assert!(evaluate(&candles, &ScoringConfig::canonical()).is_err());
    }

    #[test]
    fn test_negative_volume_is_rejected() {
        let mut candles = rising_candles(20);
        candles[0] = candles[0].with_volume(-18.5);
        let err = evaluate(&candles, &ScoringConfig::canonical()).unwrap_err();
        assert!(matches!(err, EngineError::InsufficientData(_)));
    }

    #[test]
    fn test_bad_volume_before_window_is_ignored() {
        let mut candles = rising_candles(25);
        candles[0] = candles[0].with_volume(f64::INFINITY);
        let decision = evaluate(&candles, &ScoringConfig::canonical()).unwrap();
        assert!(decision.indicators.vwap.is_finite());
        assert_eq!(decision.signal, TradeSignal::Call);
    }

    #[test]
    fn test_engine_wrapper_matches_free_function() {
        let engine = SignalEngine::new(ScoringConfig::bias()).unwrap();
        assert_eq!(engine.min_lookback(), 15);
        let candles = rising_candles(15);
        assert_eq!(
            engine.evaluate(&candles).unwrap(),
            evaluate(&candles, &ScoringConfig::bias()).unwrap()
        );
    }
}
