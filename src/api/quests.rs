use axum::{extract::State, Json};

use crate::models::Game;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Catálogo de juegos con sus quests ordenadas por nombre
pub async fn get_quests(State(state): State<AppState>) -> Result<Json<Vec<Game>>, AppError> {
    tracing::info!("📋 GET /quests");
    let catalog = state.catalog.get_catalog().await?;
    Ok(Json(catalog))
}
