//! Candle suppliers.

pub mod http;
pub mod synthetic;

pub use http::HttpCandleSource;
pub use synthetic::SyntheticCandleSource;

use async_trait::async_trait;
use tracing::warn;

use crate::error::EngineError;
use crate::types::Candle;

/// Supplies the candle sequence the engine evaluates, oldest first.
///
/// Failures are reported as `DataUnavailable`. Retries, if any, belong to
/// the implementation.
#[async_trait]
pub trait CandleSource: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    async fn fetch_candles(&self) -> Result<Vec<Candle>, EngineError>;
}

/// Tries `primary`, then `fallback` when the primary fails.
pub struct FallbackCandleSource {
    primary: Box<dyn CandleSource>,
    fallback: Box<dyn CandleSource>,
}

impl FallbackCandleSource {
    pub fn new(primary: Box<dyn CandleSource>, fallback: Box<dyn CandleSource>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl CandleSource for FallbackCandleSource {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn fetch_candles(&self) -> Result<Vec<Candle>, EngineError> {
        match self.primary.fetch_candles().await {
            Ok(candles) => Ok(candles),
            Err(e) => {
                warn!(
                    "{} source failed ({}), using {} data",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                self.fallback.fetch_candles().await
            }
        }
    }
}
