//! HTTP JSON candle source.
//!
//! Fetches a candle window from a single configured URL. The body is either
//! a bare array of candles or an object with a `candles` array.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::error::EngineError;
use crate::sources::CandleSource;
use crate::types::Candle;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandlePayload {
    Bare(Vec<Candle>),
    Wrapped { candles: Vec<Candle> },
}

impl CandlePayload {
    fn into_candles(self) -> Vec<Candle> {
        match self {
            CandlePayload::Bare(candles) => candles,
            CandlePayload::Wrapped { candles } => candles,
        }
    }
}

/// Candle supplier backed by `DATA_URL`.
pub struct HttpCandleSource {
    client: Client,
    url: Option<String>,
}

impl HttpCandleSource {
    /// Create a source for `url`. With no URL every fetch fails with
    /// `DataUnavailable`.
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EngineError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CandleSource for HttpCandleSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_candles(&self) -> Result<Vec<Candle>, EngineError> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| EngineError::DataUnavailable("No DATA_URL set".to_string()))?;

        debug!("Fetching candles: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| EngineError::DataUnavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(EngineError::DataUnavailable(format!(
                "API error: {}",
                response.status()
            )));
        }

        let payload: CandlePayload = response
            .json()
            .await
            .map_err(|e| EngineError::DataUnavailable(format!("Parse error: {}", e)))?;

        let candles = payload.into_candles();
        debug!("Fetched {} candles", candles.len());
        Ok(candles)
    }
}
