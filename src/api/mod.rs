pub mod analysis;
pub mod health;
pub mod performance;

use crate::AppState;
use axum::Router;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analysis::router())
        .merge(performance::router())
}
