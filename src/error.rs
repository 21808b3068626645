use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors produced by the scoring engine and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Window shorter than the required lookback, or degenerate input.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Upstream candle fetch failed.
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Engine(e @ EngineError::InsufficientData(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Engine(e @ EngineError::DataUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Engine(e @ EngineError::Configuration(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Csv(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
