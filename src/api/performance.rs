use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResponse {
    pub total_trades: usize,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/performance", get(get_performance))
}

/// GET /performance
async fn get_performance(State(state): State<AppState>) -> Result<Json<PerformanceResponse>> {
    let total_trades = state.trade_log.total_trades()?;
    Ok(Json(PerformanceResponse { total_trades }))
}
