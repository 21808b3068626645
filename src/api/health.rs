//! Liveness and status routes.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::AppState;

pub const ROOT_MESSAGE: &str = "Quant Engine Running Successfully";

/// Service status with the effective runtime settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    /// Preset used when a request names none.
    pub preset: String,
    pub window: usize,
    pub market_hours: bool,
    pub mock_fallback: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { ROOT_MESSAGE }))
        .route("/api/health", get(get_status))
}

/// GET /api/health
async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        preset: state.scoring.name.clone(),
        window: state.scoring.window,
        market_hours: state.config.market_hours.enabled,
        mock_fallback: state.config.mock_fallback,
    })
}
