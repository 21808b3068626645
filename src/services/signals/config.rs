//! Scoring configuration and named presets.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Factors that vote into the bull/bear accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Sign of the fast/slow EMA spread.
    Trend,
    /// Z-score of the latest close beyond the dispersion threshold.
    Dispersion,
    /// Distance from VWAP in ATR units.
    Vwap,
    /// RSI beyond the upper/lower band.
    Rsi,
    /// Latest close versus the previous close.
    PriorClose,
    /// Sign of the close-to-close trend slope.
    Momentum,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Trend,
        Factor::Dispersion,
        Factor::Vwap,
        Factor::Rsi,
        Factor::PriorClose,
        Factor::Momentum,
    ];
}

/// Weight contributed by each factor when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub trend: f64,
    pub dispersion: f64,
    pub vwap: f64,
    pub rsi: f64,
    pub prior_close: f64,
    pub momentum: f64,
}

impl FactorWeights {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Trend => self.trend,
            Factor::Dispersion => self.dispersion,
            Factor::Vwap => self.vwap,
            Factor::Rsi => self.rsi,
            Factor::PriorClose => self.prior_close,
            Factor::Momentum => self.momentum,
        }
    }

    pub fn zero() -> Self {
        Self {
            trend: 0.0,
            dispersion: 0.0,
            vwap: 0.0,
            rsi: 0.0,
            prior_close: 0.0,
            momentum: 0.0,
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            trend: 25.0,
            dispersion: 20.0,
            vwap: 15.0,
            rsi: 20.0,
            prior_close: 20.0,
            momentum: 0.0,
        }
    }
}

/// Everything that shapes a decision: lookbacks, weights and thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Preset name, informational.
    pub name: String,
    /// Candles taken from the end of the input. Also the minimum input length.
    pub window: usize,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub atr_period: usize,
    pub rsi_period: usize,
    /// Bars back for the close-to-close trend slope.
    pub trend_lookback: usize,
    /// Bars used for recent high/low when deriving levels.
    pub level_lookback: usize,

    pub weights: FactorWeights,

    /// |z| must exceed this for the dispersion factor to fire.
    pub z_threshold: f64,
    /// |vwap deviation| in ATR units must exceed this.
    pub vwap_threshold: f64,
    pub rsi_upper: f64,
    pub rsi_lower: f64,

    /// Volatility ratio above this is VOLATILE.
    pub volatile_ratio: f64,
    /// Volatility ratio below this is COMPRESSION.
    pub compression_ratio: f64,
    /// Applied to both accumulators in a VOLATILE regime.
    pub volatile_multiplier: f64,

    /// Confidence must exceed this for CALL/PUT.
    pub entry_threshold: f64,
    /// Confidence below this forces WAIT with a low-edge label.
    pub min_edge: f64,
    /// Confidence at or above this is strongly confirmed.
    pub strong_threshold: f64,

    pub risk_reward: f64,
}

impl ScoringConfig {
    /// Full five-factor engine over a 20 candle window.
    pub fn canonical() -> Self {
        Self {
            name: "canonical".to_string(),
            window: 20,
            ema_fast_period: 5,
            ema_slow_period: 15,
            atr_period: 14,
            rsi_period: 14,
            trend_lookback: 5,
            level_lookback: 3,
            weights: FactorWeights::default(),
            z_threshold: 0.8,
            vwap_threshold: 0.5,
            rsi_upper: 55.0,
            rsi_lower: 45.0,
            volatile_ratio: 1.2,
            compression_ratio: 0.8,
            volatile_multiplier: 1.1,
            entry_threshold: 55.0,
            min_edge: 50.0,
            strong_threshold: 75.0,
            risk_reward: 1.5,
        }
    }

    /// Trend, dispersion and VWAP only.
    pub fn classic() -> Self {
        Self {
            name: "classic".to_string(),
            weights: FactorWeights {
                rsi: 0.0,
                prior_close: 0.0,
                ..FactorWeights::default()
            },
            ..Self::canonical()
        }
    }

    /// Reduced 15 candle window with a heavier trend vote.
    pub fn bias() -> Self {
        Self {
            name: "bias".to_string(),
            window: 15,
            ema_fast_period: 5,
            ema_slow_period: 10,
            weights: FactorWeights {
                trend: 30.0,
                dispersion: 20.0,
                vwap: 0.0,
                rsi: 20.0,
                prior_close: 20.0,
                momentum: 10.0,
            },
            ..Self::canonical()
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "canonical" | "default" | "full" => Some(Self::canonical()),
            "classic" => Some(Self::classic()),
            "bias" | "reduced" => Some(Self::bias()),
            _ => None,
        }
    }

    pub fn with_risk_reward(mut self, risk_reward: f64) -> Self {
        self.risk_reward = risk_reward;
        self
    }

    /// Reject configurations the engine cannot evaluate meaningfully.
    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("atr_period", self.atr_period),
            ("rsi_period", self.rsi_period),
            ("trend_lookback", self.trend_lookback),
            ("level_lookback", self.level_lookback),
        ];
        for (name, value) in periods {
            if value == 0 {
                return Err(config_error(format!("{} must be at least 1", name)));
            }
        }

        if self.window < 2 {
            return Err(config_error("window must hold at least 2 candles"));
        }
        if self.trend_lookback >= self.window {
            return Err(config_error(format!(
                "trend_lookback {} must be shorter than window {}",
                self.trend_lookback, self.window
            )));
        }
        if self.level_lookback > self.window {
            return Err(config_error(format!(
                "level_lookback {} exceeds window {}",
                self.level_lookback, self.window
            )));
        }

        for factor in Factor::ALL {
            let weight = self.weights.get(factor);
            if !weight.is_finite() || weight < 0.0 {
                return Err(config_error(format!(
                    "weight for {:?} must be a non-negative number, got {}",
                    factor, weight
                )));
            }
        }

        let finite = [
            self.z_threshold,
            self.vwap_threshold,
            self.rsi_upper,
            self.rsi_lower,
            self.volatile_ratio,
            self.compression_ratio,
            self.volatile_multiplier,
            self.entry_threshold,
            self.min_edge,
            self.strong_threshold,
            self.risk_reward,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(config_error("thresholds must be finite"));
        }

        if self.z_threshold < 0.0 || self.vwap_threshold < 0.0 {
            return Err(config_error("z and vwap thresholds must be non-negative"));
        }
        if self.rsi_lower > self.rsi_upper {
            return Err(config_error(format!(
                "rsi_lower {} above rsi_upper {}",
                self.rsi_lower, self.rsi_upper
            )));
        }
        if self.compression_ratio > self.volatile_ratio {
            return Err(config_error(format!(
                "compression_ratio {} above volatile_ratio {}",
                self.compression_ratio, self.volatile_ratio
            )));
        }
        if self.volatile_multiplier <= 0.0 {
            return Err(config_error("volatile_multiplier must be positive"));
        }
        if self.risk_reward <= 0.0 {
            return Err(config_error("risk_reward must be positive"));
        }

        for (name, value) in [
            ("entry_threshold", self.entry_threshold),
            ("min_edge", self.min_edge),
            ("strong_threshold", self.strong_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(config_error(format!(
                    "{} must be within [0, 100], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::canonical()
    }
}

fn config_error(msg: impl Into<String>) -> EngineError {
    EngineError::Configuration(msg.into())
}
