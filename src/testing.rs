//! Dobles de prueba para los servicios: gateway en memoria con contadores de
//! llamadas y un almacén de cache siempre caído.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheError, CacheStore, FieldMap};
use crate::clients::UpstreamGateway;
use crate::models::hypixel::{GamesResource, PlayerStats, QuestsResource};
use crate::models::Identity;
use crate::utils::errors::{AppError, AppResult};

pub fn quests_json(quests: serde_json::Value) -> QuestsResource {
    serde_json::from_value(serde_json::json!({ "success": true, "quests": quests })).unwrap()
}

pub fn games_json(games: serde_json::Value) -> GamesResource {
    serde_json::from_value(serde_json::json!({ "success": true, "games": games })).unwrap()
}

#[derive(Default)]
pub struct FakeGateway {
    quests: Option<QuestsResource>,
    games: Option<GamesResource>,
    fail_games: bool,
    /// nombre en minúsculas -> identidad
    identities: HashMap<String, Identity>,
    stats: HashMap<String, PlayerStats>,
    quests_calls: AtomicUsize,
    games_calls: AtomicUsize,
    identity_calls: AtomicUsize,
    stats_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_quests(mut self, quests: QuestsResource) -> Self {
        self.quests = Some(quests);
        self
    }

    pub fn with_games(mut self, games: GamesResource) -> Self {
        self.games = Some(games);
        self
    }

    pub fn failing_games(mut self) -> Self {
        self.fail_games = true;
        self
    }

    pub fn with_player(mut self, id: &str, canonical_name: &str, stats: PlayerStats) -> Self {
        self.identities.insert(
            canonical_name.to_lowercase(),
            Identity {
                id: id.to_string(),
                canonical_name: canonical_name.to_string(),
            },
        );
        self.stats.insert(id.to_string(), stats);
        self
    }

    pub fn quests_calls(&self) -> usize {
        self.quests_calls.load(Ordering::SeqCst)
    }

    pub fn games_calls(&self) -> usize {
        self.games_calls.load(Ordering::SeqCst)
    }

    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }

    pub fn stats_calls(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamGateway for FakeGateway {
    async fn fetch_quests(&self) -> AppResult<QuestsResource> {
        self.quests_calls.fetch_add(1, Ordering::SeqCst);
        self.quests
            .clone()
            .ok_or_else(|| AppError::upstream("hypixel", Some(503), "quests unavailable"))
    }

    async fn fetch_games(&self) -> AppResult<GamesResource> {
        self.games_calls.fetch_add(1, Ordering::SeqCst);
        match (&self.games, self.fail_games) {
            (Some(games), false) => Ok(games.clone()),
            _ => Err(AppError::upstream("hypixel", Some(503), "games unavailable")),
        }
    }

    async fn resolve_identity(&self, display_name: &str) -> AppResult<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        self.identities
            .get(&display_name.to_lowercase())
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Couldn't find any profile with name {}", display_name)))
    }

    async fn fetch_player_stats(&self, id: &str) -> AppResult<PlayerStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        self.stats
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::upstream("hypixel", Some(500), "stats unavailable"))
    }
}

/// Almacén que falla en todas las operaciones
pub struct UnavailableCache;

#[async_trait]
impl CacheStore for UnavailableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _payload: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn get_fields(&self, _key: &str) -> Result<Option<FieldMap>, CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn set_fields(&self, _key: &str, _fields: &FieldMap, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> bool {
        false
    }
}
