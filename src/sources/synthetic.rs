//! Synthetic candles for demo and offline use.
//!
//! Only ever used as an explicit fallback policy of the candle supplier.
//! The scoring engine itself never generates data.

use async_trait::async_trait;
use rand::Rng;

use crate::error::EngineError;
use crate::sources::CandleSource;
use crate::types::Candle;

/// Random candles scattered around a base price.
pub struct SyntheticCandleSource {
    base_price: f64,
    count: usize,
}

impl SyntheticCandleSource {
    pub fn new(base_price: f64, count: usize) -> Self {
        Self { base_price, count }
    }

    /// Generate one batch of candles.
    ///
    /// High in [base, base+50), low in [base-50, base), close drawn from
    /// [base-25, base+25) and clamped into the bar, volume in [1000, 1500).
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Candle> {
        let base = self.base_price;
        (0..self.count)
            .map(|_| {
                let high = base + rng.gen_range(0.0..50.0);
                let low = base - 50.0 + rng.gen_range(0.0..50.0);
                let close = (base - 25.0 + rng.gen_range(0.0..50.0)).clamp(low, high);
                Candle {
                    time: None,
                    open: None,
                    high,
                    low,
                    close,
                    volume: Some(1000.0 + rng.gen_range(0.0..500.0)),
                }
            })
            .collect()
    }
}

impl Default for SyntheticCandleSource {
    fn default() -> Self {
        Self::new(22_000.0, 30)
    }
}

#[async_trait]
impl CandleSource for SyntheticCandleSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    async fn fetch_candles(&self) -> Result<Vec<Candle>, EngineError> {
        Ok(self.generate(&mut rand::thread_rng()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generated_candles_are_well_formed() {
        let source = SyntheticCandleSource::default();
        let mut rng = StdRng::seed_from_u64(7);
        let candles = source.generate(&mut rng);

        assert_eq!(candles.len(), 30);
        for candle in &candles {
            assert!(candle.high >= candle.low);
            assert!(candle.close >= candle.low && candle.close <= candle.high);
            let volume = candle.volume.unwrap();
            assert!((1000.0..1500.0).contains(&volume));
        }
    }

    #[test]
    fn test_generation_is_seed_deterministic() {
        let source = SyntheticCandleSource::new(100.0, 5);
        let a = source.generate(&mut StdRng::seed_from_u64(42));
        let b = source.generate(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_fetch_returns_count() {
        let source = SyntheticCandleSource::new(22_000.0, 25);
        assert_eq!(source.fetch_candles().await.unwrap().len(), 25);
    }
}
