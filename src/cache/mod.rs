//! Cache
//!
//! Este módulo contiene el contrato del almacén de cache y sus dos backends:
//! Redis (compartido entre procesos) y memoria (un solo proceso).

pub mod cache_config;
pub mod keys;
pub mod memory_cache;
pub mod redis_client;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use cache_config::CacheConfig;
pub use memory_cache::MemoryCache;
pub use redis_client::RedisClient;

/// Mapa de campos pequeño (equivalente a un hash de Redis)
pub type FieldMap = HashMap<String, String>;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        CacheError::Unavailable(e.to_string())
    }
}

/// Operaciones del almacén de cache.
///
/// La expiración la aplica el propio almacén: una clave expirada y una
/// clave ausente devuelven ambas `Ok(None)`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError>;

    async fn get_fields(&self, key: &str) -> Result<Option<FieldMap>, CacheError>;

    async fn set_fields(&self, key: &str, fields: &FieldMap, ttl: Duration) -> Result<(), CacheError>;

    /// Verificar si el almacén responde
    async fn ping(&self) -> bool;
}
