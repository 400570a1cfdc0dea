//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Todos los componentes se construyen una vez
//! al arrancar y se comparten con `Arc`.

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::clients::UpstreamGateway;
use crate::config::EnvironmentConfig;
use crate::services::{CatalogService, PlayerCacheTtl, PlayerService};

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<dyn CacheStore>,
    pub catalog: Arc<CatalogService>,
    pub players: Arc<PlayerService>,
}

impl AppState {
    pub fn new(config: &EnvironmentConfig, cache: Arc<dyn CacheStore>, gateway: Arc<dyn UpstreamGateway>) -> Self {
        let catalog = CatalogService::new(cache.clone(), gateway.clone(), config.cache.catalog_ttl);
        let players = PlayerService::new(
            cache.clone(),
            gateway,
            PlayerCacheTtl {
                identity: config.cache.identity_ttl,
                stats: config.cache.stats_ttl,
            },
        );

        Self {
            cache,
            catalog: Arc::new(catalog),
            players: Arc::new(players),
        }
    }
}
