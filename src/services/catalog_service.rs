//! Agregador del catálogo
//!
//! Combina los recursos `quests` y `games` de Hypixel en una lista de juegos
//! con sus quests ordenadas, y la guarda en cache como una sola entrada.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::cache::{keys, CacheStore};
use crate::clients::UpstreamGateway;
use crate::models::hypixel::{
    GamesResource, QuestRecord, QuestsResource, DAILY_RESET_REQUIREMENT, MULTIPLIED_EXPERIENCE_REWARD,
};
use crate::models::{Game, Quest};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::first_match_or;

pub struct CatalogService {
    cache: Arc<dyn CacheStore>,
    gateway: Arc<dyn UpstreamGateway>,
    ttl: Duration,
}

impl CatalogService {
    pub fn new(cache: Arc<dyn CacheStore>, gateway: Arc<dyn UpstreamGateway>, ttl: Duration) -> Self {
        Self { cache, gateway, ttl }
    }

    /// Obtener el catálogo completo (cache primero, luego upstream)
    pub async fn get_catalog(&self) -> AppResult<Vec<Game>> {
        let key = keys::catalog_key();

        if let Some(catalog) = self.read_cached(&key).await {
            info!("✅ Catálogo servido desde cache ({} juegos)", catalog.len());
            return Ok(catalog);
        }

        // Los dos recursos son independientes; si uno falla, falla todo
        let (quests, games) = futures::try_join!(self.gateway.fetch_quests(), self.gateway.fetch_games())?;

        let catalog = build_catalog(quests, &games)?;

        match serde_json::to_string(&catalog) {
            Ok(payload) => {
                if let Err(e) = self.cache.set(&key, &payload, self.ttl).await {
                    warn!("⚠️ No se pudo guardar el catálogo en cache: {}", e);
                }
            }
            Err(e) => warn!("⚠️ No se pudo serializar el catálogo: {}", e),
        }

        info!("✅ Catálogo construido desde upstream ({} juegos)", catalog.len());
        Ok(catalog)
    }

    async fn read_cached(&self, key: &str) -> Option<Vec<Game>> {
        match self.cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(catalog) => Some(catalog),
                Err(e) => {
                    warn!("⚠️ Catálogo en cache ilegible, se recalcula: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("⚠️ Cache no disponible, se consulta upstream: {}", e);
                None
            }
        }
    }
}

/// Unir quests y juegos; un slug sin nombre de juego aborta la construcción.
pub fn build_catalog(quests: QuestsResource, games: &GamesResource) -> AppResult<Vec<Game>> {
    let slug_to_name: HashMap<String, &str> = games
        .games
        .values()
        .map(|game| (game.database_name.to_lowercase(), game.name.as_str()))
        .collect();

    quests
        .quests
        .into_iter()
        .map(|(slug, records)| -> AppResult<Game> {
            let name = slug_to_name
                .get(&slug)
                .ok_or_else(|| AppError::DataIntegrity(format!("Unknown game slug '{}' in quests resource", slug)))?;

            let mut quests = records.iter().map(to_quest).collect::<AppResult<Vec<Quest>>>()?;
            quests.sort_by(|a, b| a.name.cmp(&b.name));

            Ok(Game {
                name: name.to_string(),
                quests,
            })
        })
        .collect()
}

fn to_quest(record: &QuestRecord) -> AppResult<Quest> {
    let xp = first_match_or(
        &record.rewards,
        |reward| reward.kind == MULTIPLIED_EXPERIENCE_REWARD,
        |reward| experience_amount(record, reward.amount.as_ref()),
        Ok(0),
    )?;
    let daily = first_match_or(
        &record.requirements,
        |requirement| requirement.kind == DAILY_RESET_REQUIREMENT,
        |_| true,
        false,
    );

    Ok(Quest {
        name: record.name.clone(),
        description: record.description.clone(),
        xp,
        daily,
    })
}

fn experience_amount(record: &QuestRecord, amount: Option<&serde_json::Value>) -> AppResult<u64> {
    match amount {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(value) => value.as_u64().ok_or_else(|| {
            AppError::decode(
                "hypixel",
                format!("invalid experience amount {} in quest '{}'", value, record.name),
            )
        }),
    }
}
