use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::models::Player;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, Validate)]
pub struct PlayerQuery {
    // Ausente equivale a vacío para que lo rechace la validación
    #[serde(default)]
    #[validate(length(min = 1, max = 32))]
    pub username: String,
}

/// Perfil y estadísticas de un jugador por nombre de usuario
pub async fn get_player(
    State(state): State<AppState>,
    Query(query): Query<PlayerQuery>,
) -> Result<Json<Player>, AppError> {
    query.validate()?;
    tracing::info!("👤 GET /player?username={}", query.username);

    let player = state.players.get_player(&query.username).await?;
    Ok(Json(player))
}
