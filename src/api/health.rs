use axum::{extract::State, response::Json};
use serde_json::json;

use crate::state::AppState;

/// Health check con el estado del cache
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "cache": state.cache.ping().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
