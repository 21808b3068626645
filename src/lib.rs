//! Quant Engine - regime-aware CALL/PUT/WAIT signal server for index candles

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{MarketHoursGate, ScoringConfig, SignalLogger};
use sources::CandleSource;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scoring: Arc<ScoringConfig>,
    pub source: Arc<dyn CandleSource>,
    pub gate: Arc<dyn MarketHoursGate>,
    pub trade_log: Arc<dyn SignalLogger>,
}

/// Build the full HTTP application with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// Re-export commonly used types
pub use error::{AppError, EngineError};
pub use types::*;
