//! Clients - HTTP Clients for External APIs
//!
//! This module contains the upstream gateway: the Hypixel catalog/statistics
//! client and the Mojang identity client behind one trait.

pub mod hypixel_client;
pub mod mojang_client;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::UpstreamConfig;
use crate::models::hypixel::{GamesResource, PlayerStats, QuestsResource};
use crate::models::Identity;
use crate::utils::errors::{AppError, AppResult};

pub use hypixel_client::HypixelClient;
pub use mojang_client::MojangClient;

/// Servicios upstream; cada llamada es un round trip de red.
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    async fn fetch_quests(&self) -> AppResult<QuestsResource>;

    async fn fetch_games(&self) -> AppResult<GamesResource>;

    /// `AppError::NotFound` si el nombre no corresponde a ninguna cuenta
    async fn resolve_identity(&self, display_name: &str) -> AppResult<Identity>;

    async fn fetch_player_stats(&self, id: &str) -> AppResult<PlayerStats>;
}

/// Gateway HTTP real sobre un único `reqwest::Client`
#[derive(Clone)]
pub struct HttpGateway {
    hypixel: HypixelClient,
    mojang: MojangClient,
}

impl HttpGateway {
    pub fn new(config: &UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("quest-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            hypixel: HypixelClient::new(client.clone(), &config.hypixel_url, &config.hypixel_api_key),
            mojang: MojangClient::new(client, &config.mojang_url),
        })
    }
}

#[async_trait]
impl UpstreamGateway for HttpGateway {
    async fn fetch_quests(&self) -> AppResult<QuestsResource> {
        self.hypixel.fetch_quests().await
    }

    async fn fetch_games(&self) -> AppResult<GamesResource> {
        self.hypixel.fetch_games().await
    }

    async fn resolve_identity(&self, display_name: &str) -> AppResult<Identity> {
        self.mojang.resolve_identity(display_name).await
    }

    async fn fetch_player_stats(&self, id: &str) -> AppResult<PlayerStats> {
        self.hypixel.fetch_player_stats(id).await
    }
}

/// Error de transporte (conexión, timeout, lectura del cuerpo)
pub(crate) fn transport_error(service: &'static str, e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::upstream(service, None, "request timed out")
    } else {
        AppError::upstream(service, e.status().map(|s| s.as_u16()), e.to_string())
    }
}
