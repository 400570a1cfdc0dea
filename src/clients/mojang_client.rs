use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use super::transport_error;
use crate::models::mojang::{MojangErrorBody, MojangProfile};
use crate::models::Identity;
use crate::utils::errors::{AppError, AppResult};

const SERVICE: &str = "mojang";

/// Cliente de la API de perfiles de Mojang
#[derive(Clone)]
pub struct MojangClient {
    client: Client,
    base_url: String,
}

impl MojangClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn resolve_identity(&self, display_name: &str) -> AppResult<Identity> {
        let url = format!(
            "{}/users/profiles/minecraft/{}",
            self.base_url,
            urlencoding::encode(display_name)
        );
        info!("🔍 Resolviendo identidad de {}", display_name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let status = response.status();
        debug!("📡 Mojang response status: {}", status);
        let body = response.text().await.map_err(|e| transport_error(SERVICE, e))?;

        let error_message = || {
            serde_json::from_str::<MojangErrorBody>(&body)
                .ok()
                .and_then(|b| b.error_message)
        };

        // 204 sin cuerpo, 404 con errorMessage, 400 para nombres inválidos
        if matches!(
            status,
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST
        ) {
            let message = error_message()
                .unwrap_or_else(|| format!("Couldn't find any profile with name {}", display_name));
            warn!("❌ Perfil no encontrado para {}: {}", display_name, message);
            return Err(AppError::NotFound(message));
        }

        if !status.is_success() {
            let message = error_message().unwrap_or_else(|| status.to_string());
            return Err(AppError::upstream(SERVICE, Some(status.as_u16()), message));
        }

        let profile: MojangProfile =
            serde_json::from_str(&body).map_err(|e| AppError::decode(SERVICE, e.to_string()))?;

        Ok(Identity {
            id: profile.id,
            canonical_name: profile.name,
        })
    }
}
