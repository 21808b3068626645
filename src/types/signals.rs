use serde::{Deserialize, Serialize};
use std::fmt;

/// Directional output of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSignal {
    Call,
    Put,
    Wait,
}

impl TradeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSignal::Call => "CALL",
            TradeSignal::Put => "PUT",
            TradeSignal::Wait => "WAIT",
        }
    }

    /// Whether this signal should be logged as a trade.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, TradeSignal::Wait)
    }
}

impl fmt::Display for TradeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volatility character of the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    Range,
    Compression,
    Volatile,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::Range => "RANGE",
            Regime::Compression => "COMPRESSION",
            Regime::Volatile => "VOLATILE",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confirmation tier attached to a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confirmation {
    #[serde(rename = "STRONGLY CONFIRMED – MULTI FACTOR ALIGNMENT")]
    StronglyConfirmed,
    #[serde(rename = "NORMAL SETUP")]
    NormalSetup,
    #[serde(rename = "LOW EDGE – NO TRADE")]
    LowEdge,
}

impl Confirmation {
    pub fn label(&self) -> &'static str {
        match self {
            Confirmation::StronglyConfirmed => "STRONGLY CONFIRMED – MULTI FACTOR ALIGNMENT",
            Confirmation::NormalSetup => "NORMAL SETUP",
            Confirmation::LowEdge => "LOW EDGE – NO TRADE",
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bull and bear accumulators for one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreState {
    pub bull_score: f64,
    pub bear_score: f64,
}

impl ScoreState {
    pub fn add_bull(&mut self, weight: f64) {
        self.bull_score += weight;
    }

    pub fn add_bear(&mut self, weight: f64) {
        self.bear_score += weight;
    }

    /// Multiply both accumulators by the same factor.
    pub fn scale(&mut self, factor: f64) {
        self.bull_score *= factor;
        self.bear_score *= factor;
    }

    /// Absolute score spread, capped at 100.
    pub fn confidence(&self) -> f64 {
        (self.bull_score - self.bear_score).abs().min(100.0)
    }
}

/// Every indicator value the engine derived from a window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub price: f64,
    pub prev_close: f64,
    pub atr: f64,
    pub avg_range: f64,
    pub volatility_ratio: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    /// EMA spread: fast minus slow.
    pub slope: f64,
    pub z_score: f64,
    pub vwap: f64,
    /// Distance from VWAP in ATR units.
    pub vwap_deviation: f64,
    pub rsi: f64,
    /// Close minus the close `trend_lookback` bars earlier.
    pub trend_slope: f64,
}

/// Entry, stop-loss and target prices for an actionable signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLevels {
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
}

/// Engine output for one candle window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub signal: TradeSignal,
    /// Conviction in [0, 100].
    pub confidence: f64,
    pub regime: Regime,
    /// Close of the most recent candle.
    pub price: f64,
    pub confirmation: Confirmation,
    pub scores: ScoreState,
    pub indicators: IndicatorSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl Decision {
    /// Price levels, present only for CALL and PUT.
    pub fn levels(&self) -> Option<TradeLevels> {
        match (self.entry, self.stop_loss, self.target) {
            (Some(entry), Some(stop_loss), Some(target)) => Some(TradeLevels {
                entry,
                stop_loss,
                target,
            }),
            _ => None,
        }
    }
}
