use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::transport_error;
use crate::models::hypixel::{
    GamesResource, HypixelErrorBody, PlayerResponse, PlayerStats, QuestsResource, ResourceKind,
};
use crate::utils::errors::{AppError, AppResult};

const SERVICE: &str = "hypixel";

/// Cliente de la API de Hypixel (catálogo y estadísticas)
#[derive(Clone)]
pub struct HypixelClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HypixelClient {
    pub fn new(client: Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub async fn fetch_quests(&self) -> AppResult<QuestsResource> {
        self.fetch_resource(ResourceKind::Quests).await
    }

    pub async fn fetch_games(&self) -> AppResult<GamesResource> {
        self.fetch_resource(ResourceKind::Games).await
    }

    async fn fetch_resource<T: DeserializeOwned>(&self, kind: ResourceKind) -> AppResult<T> {
        let url = format!("{}/v2/resources/{}", self.base_url, kind.as_str());
        info!("🌐 Obteniendo recurso {} de Hypixel", kind.as_str());

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        decode_success(response).await
    }

    pub async fn fetch_player_stats(&self, id: &str) -> AppResult<PlayerStats> {
        let url = format!("{}/v2/player?uuid={}", self.base_url, urlencoding::encode(id));
        info!("🌐 Obteniendo estadísticas de Hypixel para {}", id);

        let response = self
            .client
            .get(&url)
            .header("API-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let body: PlayerResponse = decode_success(response).await?;
        body.player
            .ok_or_else(|| AppError::NotFound(format!("Player {} has never joined Hypixel", id)))
    }
}

/// Verificar el status y decodificar el cuerpo JSON
async fn decode_success<T: DeserializeOwned>(response: reqwest::Response) -> AppResult<T> {
    let status = response.status();
    debug!("📡 Hypixel response status: {}", status);

    let body = response.text().await.map_err(|e| transport_error(SERVICE, e))?;

    if !status.is_success() {
        let cause = serde_json::from_str::<HypixelErrorBody>(&body)
            .ok()
            .and_then(|b| b.cause)
            .unwrap_or_else(|| status.to_string());
        error!("❌ Hypixel respondió {}: {}", status, cause);
        return Err(AppError::upstream(SERVICE, Some(status.as_u16()), cause));
    }

    serde_json::from_str(&body).map_err(|e| AppError::decode(SERVICE, e.to_string()))
}
