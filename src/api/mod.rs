//! API endpoints
//!
//! Este módulo contiene los endpoints de la API.

pub mod health;
pub mod player;
pub mod quests;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::cors_middleware_with_origins;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/quests", get(quests::get_quests))
        .route("/player", get(player::get_player))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware_with_origins(cors_origins))
        .with_state(state)
}
