//! Configuración de cache
//!
//! Este módulo contiene la configuración para el sistema de cache.

use std::time::Duration;

/// Configuración del cache
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// `None` usa el almacén en memoria
    pub redis_url: Option<String>,
    pub operation_timeout: Duration,
    pub catalog_ttl: Duration,
    pub identity_ttl: Duration,
    pub stats_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            operation_timeout: Duration::from_secs(2),
            catalog_ttl: Duration::from_secs(6 * 60 * 60), // 6 horas
            identity_ttl: Duration::from_secs(6 * 60 * 60), // 6 horas
            stats_ttl: Duration::from_secs(60),
        }
    }
}
