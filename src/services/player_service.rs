//! Resolución de jugadores
//!
//! Nombre de usuario -> identidad estable (cache largo) -> estadísticas
//! (cache corto) -> `Player`. El `Player` en sí nunca se guarda en cache.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{keys, CacheStore};
use crate::clients::UpstreamGateway;
use crate::models::hypixel::PlayerStats;
use crate::models::{Identity, Player};
use crate::utils::errors::AppResult;

#[derive(Debug, Clone)]
pub struct PlayerCacheTtl {
    pub identity: Duration,
    pub stats: Duration,
}

pub struct PlayerService {
    cache: Arc<dyn CacheStore>,
    gateway: Arc<dyn UpstreamGateway>,
    ttl: PlayerCacheTtl,
}

impl PlayerService {
    pub fn new(cache: Arc<dyn CacheStore>, gateway: Arc<dyn UpstreamGateway>, ttl: PlayerCacheTtl) -> Self {
        Self { cache, gateway, ttl }
    }

    pub async fn get_player(&self, display_name: &str) -> AppResult<Player> {
        // Las estadísticas se indexan por id, así que la identidad va primero
        let identity = self.resolve_identity(display_name).await?;
        let stats = self.fetch_stats(&identity.id).await?;

        let player = project_player(identity, &stats);
        info!(
            "✅ Jugador {} resuelto: xp={}, quests_completed={}",
            player.username, player.xp, player.quests_completed
        );
        Ok(player)
    }

    pub async fn resolve_identity(&self, display_name: &str) -> AppResult<Identity> {
        let key = keys::identity_key(display_name);

        match self.cache.get_fields(&key).await {
            Ok(Some(fields)) => match Identity::from_fields(fields) {
                Some(identity) => {
                    debug!("🔑 Identidad en cache para {}", display_name);
                    return Ok(identity);
                }
                None => warn!("⚠️ Identidad incompleta en cache para clave {}", key),
            },
            Ok(None) => {}
            Err(e) => warn!("⚠️ Cache no disponible al leer identidad: {}", e),
        }

        let identity = self.gateway.resolve_identity(display_name).await?;

        if let Err(e) = self.cache.set_fields(&key, &identity.to_fields(), self.ttl.identity).await {
            warn!("⚠️ No se pudo guardar la identidad en cache: {}", e);
        }
        Ok(identity)
    }

    pub async fn fetch_stats(&self, id: &str) -> AppResult<PlayerStats> {
        let key = keys::stats_key(id);

        match self.cache.get(&key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(stats) => {
                    debug!("📊 Estadísticas en cache para {}", id);
                    return Ok(stats);
                }
                Err(e) => warn!("⚠️ Estadísticas en cache ilegibles para {}: {}", id, e),
            },
            Ok(None) => {}
            Err(e) => warn!("⚠️ Cache no disponible al leer estadísticas: {}", e),
        }

        let stats = self.gateway.fetch_player_stats(id).await?;

        match serde_json::to_string(&stats) {
            Ok(payload) => {
                if let Err(e) = self.cache.set(&key, &payload, self.ttl.stats).await {
                    warn!("⚠️ No se pudieron guardar las estadísticas en cache: {}", e);
                }
            }
            Err(e) => warn!("⚠️ No se pudieron serializar las estadísticas: {}", e),
        }
        Ok(stats)
    }
}

/// Proyectar identidad + estadísticas crudas en el modelo público
pub fn project_player(identity: Identity, stats: &PlayerStats) -> Player {
    let quests_completed = stats
        .quests
        .values()
        .filter_map(|quest| quest.completions.as_ref())
        .map(|completions| completions.len() as u64)
        .sum();

    Player {
        uuid: identity.id,
        username: identity.canonical_name,
        xp: stats.network_exp as i64,
        quests_completed,
    }
}
