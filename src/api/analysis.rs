//! Analysis endpoint: gate, fetch, evaluate, log.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::scoring_config_for;
use crate::error::{AppError, EngineError, Result};
use crate::services::signals::evaluate;
use crate::services::TradeLogRecord;
use crate::types::Decision;
use crate::AppState;

/// Query parameters for the analysis endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisQuery {
    /// Scoring preset override: canonical, classic, bias
    pub preset: Option<String>,
}

/// Returned instead of a decision while the market is closed.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketClosedResponse {
    pub market_open: bool,
    pub reason: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Closed(MarketClosedResponse),
    Decision(Decision),
}

pub fn router() -> Router<AppState> {
    Router::new().route("/analysis", get(get_analysis))
}

/// GET /analysis
async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<AnalysisResponse>> {
    let now = Utc::now();

    let market = state.gate.status(now);
    if !market.open {
        debug!("Analysis skipped: {}", market.reason);
        return Ok(Json(AnalysisResponse::Closed(MarketClosedResponse {
            market_open: false,
            reason: market.reason,
        })));
    }

    let scoring = match query.preset.as_deref() {
        Some(name) => scoring_config_for(name, state.config.risk_reward).map_err(|e| match e {
            EngineError::Configuration(msg) => AppError::BadRequest(msg),
            other => AppError::Engine(other),
        })?,
        None => (*state.scoring).clone(),
    };

    let candles = state.source.fetch_candles().await?;
    let decision = evaluate(&candles, &scoring)?;

    if decision.signal.is_actionable() {
        let record = TradeLogRecord::pending(&decision, now);
        if let Err(e) = state.trade_log.append(&record) {
            warn!("Failed to log {} signal: {}", decision.signal, e);
        }
        info!(
            "{} signal at {} (confidence {:.1}, {})",
            decision.signal, decision.price, decision.confidence, decision.regime
        );
    }

    Ok(Json(AnalysisResponse::Decision(decision)))
}
