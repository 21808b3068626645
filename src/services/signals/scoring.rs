//! Weighted factor voting and the signal decision.

use crate::services::signals::{Factor, ScoringConfig};
use crate::types::{Confirmation, IndicatorSet, Regime, ScoreState, TradeSignal};

/// Which accumulator a factor votes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Bull,
    Bear,
}

fn vote_above_below(value: f64, upper: f64, lower: f64) -> Option<Vote> {
    if value > upper {
        Some(Vote::Bull)
    } else if value < lower {
        Some(Vote::Bear)
    } else {
        None
    }
}

/// Evaluate a single factor. `None` means the factor is neutral.
pub fn vote(factor: Factor, indicators: &IndicatorSet, config: &ScoringConfig) -> Option<Vote> {
    match factor {
        Factor::Trend => vote_above_below(indicators.slope, 0.0, 0.0),
        Factor::Dispersion => {
            vote_above_below(indicators.z_score, config.z_threshold, -config.z_threshold)
        }
        Factor::Vwap => vote_above_below(
            indicators.vwap_deviation,
            config.vwap_threshold,
            -config.vwap_threshold,
        ),
        Factor::Rsi => vote_above_below(indicators.rsi, config.rsi_upper, config.rsi_lower),
        Factor::PriorClose => {
            vote_above_below(indicators.price, indicators.prev_close, indicators.prev_close)
        }
        Factor::Momentum => vote_above_below(indicators.trend_slope, 0.0, 0.0),
    }
}

/// Accumulate every weighted factor vote into a fresh score state.
pub fn score_factors(indicators: &IndicatorSet, config: &ScoringConfig) -> ScoreState {
    let mut scores = ScoreState::default();
    for factor in Factor::ALL {
        let weight = config.weights.get(factor);
        if weight == 0.0 {
            continue;
        }
        match vote(factor, indicators, config) {
            Some(Vote::Bull) => scores.add_bull(weight),
            Some(Vote::Bear) => scores.add_bear(weight),
            None => {}
        }
    }
    scores
}

/// Scale both accumulators in a volatile regime. Other regimes are untouched.
pub fn apply_regime(scores: &mut ScoreState, regime: Regime, config: &ScoringConfig) {
    if regime == Regime::Volatile {
        scores.scale(config.volatile_multiplier);
    }
}

/// Signal, confidence and confirmation tier for a finished score state.
///
/// Scores are compared unrounded. Ties never produce a direction.
pub fn decide(scores: &ScoreState, config: &ScoringConfig) -> (TradeSignal, f64, Confirmation) {
    let confidence = scores.confidence();

    let mut signal = if scores.bull_score > scores.bear_score && confidence > config.entry_threshold
    {
        TradeSignal::Call
    } else if scores.bear_score > scores.bull_score && confidence > config.entry_threshold {
        TradeSignal::Put
    } else {
        TradeSignal::Wait
    };

    let mut confirmation = if confidence >= config.strong_threshold {
        Confirmation::StronglyConfirmed
    } else {
        Confirmation::NormalSetup
    };

    if confidence < config.min_edge {
        signal = TradeSignal::Wait;
        confirmation = Confirmation::LowEdge;
    }

    (signal, confidence, confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neutral_indicators() -> IndicatorSet {
        IndicatorSet {
            price: 100.0,
            prev_close: 100.0,
            atr: 1.0,
            avg_range: 1.0,
            volatility_ratio: 1.0,
            ema_fast: 100.0,
            ema_slow: 100.0,
            slope: 0.0,
            z_score: 0.0,
            vwap: 100.0,
            vwap_deviation: 0.0,
            rsi: 50.0,
            trend_slope: 0.0,
        }
    }

    fn scores(bull: f64, bear: f64) -> ScoreState {
        ScoreState {
            bull_score: bull,
            bear_score: bear,
        }
    }

    #[test]
    fn test_neutral_indicators_score_zero() {
        let config = ScoringConfig::canonical();
        let state = score_factors(&neutral_indicators(), &config);
        assert_eq!(state, ScoreState::default());
    }

    #[test]
    fn test_all_bullish_factors() {
        let config = ScoringConfig::canonical();
        let indicators = IndicatorSet {
            price: 101.0,
            slope: 0.4,
            z_score: 1.2,
            vwap_deviation: 0.9,
            rsi: 70.0,
            trend_slope: 2.0,
            ..neutral_indicators()
        };
        let state = score_factors(&indicators, &config);
        assert_eq!(state.bull_score, 100.0);
        assert_eq!(state.bear_score, 0.0);
    }

    #[test]
    fn test_all_bearish_factors() {
        let config = ScoringConfig::canonical();
        let indicators = IndicatorSet {
            price: 99.0,
            slope: -0.4,
            z_score: -1.2,
            vwap_deviation: -0.9,
            rsi: 30.0,
            ..neutral_indicators()
        };
        let state = score_factors(&indicators, &config);
        assert_eq!(state.bull_score, 0.0);
        assert_eq!(state.bear_score, 100.0);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let config = ScoringConfig::canonical();
        let indicators = IndicatorSet {
            z_score: 0.8,
            vwap_deviation: -0.5,
            rsi: 55.0,
            ..neutral_indicators()
        };
        assert_eq!(vote(Factor::Dispersion, &indicators, &config), None);
        assert_eq!(vote(Factor::Vwap, &indicators, &config), None);
        assert_eq!(vote(Factor::Rsi, &indicators, &config), None);
    }

    #[test]
    fn test_momentum_only_counts_when_weighted() {
        let indicators = IndicatorSet {
            trend_slope: 3.0,
            ..neutral_indicators()
        };
        let canonical = score_factors(&indicators, &ScoringConfig::canonical());
        assert_eq!(canonical.bull_score, 0.0);

        let bias = score_factors(&indicators, &ScoringConfig::bias());
        assert_eq!(bias.bull_score, 10.0);
    }

    #[test]
    fn test_volatile_regime_amplifies() {
        let config = ScoringConfig::canonical();
        let mut state = scores(60.0, 20.0);
        apply_regime(&mut state, Regime::Volatile, &config);
        assert!((state.bull_score - 66.0).abs() < 1e-9);
        assert!((state.bear_score - 22.0).abs() < 1e-9);

        let mut state = scores(60.0, 20.0);
        apply_regime(&mut state, Regime::Compression, &config);
        assert_eq!(state, scores(60.0, 20.0));
    }

    #[test]
    fn test_decide_zero_scores_is_low_edge_wait() {
        let (signal, confidence, confirmation) =
            decide(&ScoreState::default(), &ScoringConfig::canonical());
        assert_eq!(signal, TradeSignal::Wait);
        assert_eq!(confidence, 0.0);
        assert_eq!(confirmation, Confirmation::LowEdge);
        assert_eq!(confirmation.label(), "LOW EDGE – NO TRADE");
    }

    #[test]
    fn test_decide_call_and_put() {
        let config = ScoringConfig::canonical();
        let (signal, confidence, confirmation) = decide(&scores(80.0, 20.0), &config);
        assert_eq!(signal, TradeSignal::Call);
        assert_eq!(confidence, 60.0);
        assert_eq!(confirmation, Confirmation::NormalSetup);

        let (signal, _, confirmation) = decide(&scores(0.0, 100.0), &config);
        assert_eq!(signal, TradeSignal::Put);
        assert_eq!(confirmation, Confirmation::StronglyConfirmed);
    }

    #[test]
    fn test_decide_between_edges_waits_with_normal_label() {
        // 50 <= confidence <= 55: no trade, but not flagged as low edge
        let (signal, confidence, confirmation) =
            decide(&scores(55.0, 0.0), &ScoringConfig::canonical());
        assert_eq!(signal, TradeSignal::Wait);
        assert_eq!(confidence, 55.0);
        assert_eq!(confirmation, Confirmation::NormalSetup);
    }

    #[test]
    fn test_decide_low_edge_overrides_direction() {
        // A permissive entry threshold still cannot beat the minimum edge
        let config = ScoringConfig {
            entry_threshold: 10.0,
            ..ScoringConfig::canonical()
        };
        let (signal, confidence, confirmation) = decide(&scores(45.0, 0.0), &config);
        assert_eq!(signal, TradeSignal::Wait);
        assert_eq!(confidence, 45.0);
        assert_eq!(confirmation, Confirmation::LowEdge);
    }

    #[test]
    fn test_decide_tie_waits_under_any_policy() {
        let config = ScoringConfig {
            entry_threshold: 0.0,
            min_edge: 0.0,
            ..ScoringConfig::canonical()
        };
        let (signal, confidence, _) = decide(&scores(45.0, 45.0), &config);
        assert_eq!(signal, TradeSignal::Wait);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_strong_threshold_is_inclusive() {
        let (_, _, confirmation) = decide(&scores(75.0, 0.0), &ScoringConfig::canonical());
        assert_eq!(confirmation, Confirmation::StronglyConfirmed);
    }
}
