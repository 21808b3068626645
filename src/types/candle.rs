use serde::{Deserialize, Serialize};

/// OHLCV candle, ordered oldest first within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Optional bar timestamp (ms). Ordering is implied by position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Candle {
    /// Build a candle without timestamp, open or volume.
    pub fn new(high: f64, low: f64, close: f64) -> Self {
        Self {
            time: None,
            open: None,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Volume, defaulting to 1 when the source omits it.
    pub fn volume_or_default(&self) -> f64 {
        self.volume.unwrap_or(1.0)
    }

    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Fixed-size suffix of a candle sequence.
///
/// Borrows the caller's candles; nothing in the engine mutates them.
#[derive(Debug, Clone, Copy)]
pub struct CandleWindow<'a> {
    candles: &'a [Candle],
}

impl<'a> CandleWindow<'a> {
    /// Take the last `size` candles. Returns `None` if fewer are available.
    pub fn last(candles: &'a [Candle], size: usize) -> Option<Self> {
        if size == 0 || candles.len() < size {
            return None;
        }
        Some(Self {
            candles: &candles[candles.len() - size..],
        })
    }

    pub fn candles(&self) -> &'a [Candle] {
        self.candles
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Most recent candle. A window is never empty.
    pub fn current(&self) -> &'a Candle {
        &self.candles[self.candles.len() - 1]
    }

    /// The candle before the current one, if the window has one.
    pub fn previous(&self) -> Option<&'a Candle> {
        self.candles.len().checked_sub(2).map(|i| &self.candles[i])
    }

    /// Highest high and lowest low over the last `lookback` candles.
    pub fn recent_extremes(&self, lookback: usize) -> (f64, f64) {
        let start = self.candles.len().saturating_sub(lookback.max(1));
        self.candles[start..]
            .iter()
            .fold((f64::MIN, f64::MAX), |(hi, lo), c| {
                (hi.max(c.high), lo.min(c.low))
            })
    }
}
