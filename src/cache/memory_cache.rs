//! Cache en memoria
//!
//! Almacén de un solo proceso con expiración por clave. Se usa cuando no hay
//! Redis configurado y en los tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use super::{CacheError, CacheStore, FieldMap};

#[derive(Debug, Clone)]
enum CachedValue {
    Payload(String),
    Fields(FieldMap),
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leer una entrada viva; las expiradas se eliminan al leerlas
    async fn read(&self, key: &str) -> Option<CachedValue> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => {
                    debug!("📥 Cache HIT para clave: {}", key);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    debug!("❌ Cache MISS para clave: {}", key);
                    return None;
                }
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CacheEntry::is_expired) {
            entries.remove(key);
            debug!("⏰ Cache EXPIRADO para clave: {}", key);
        }
        None
    }

    async fn write(&self, key: &str, value: CachedValue, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        debug!("💾 Cache SET para clave: {} (TTL: {:?})", key, ttl);
    }

    /// Limpiar entradas expiradas
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(match self.read(key).await {
            Some(CachedValue::Payload(payload)) => Some(payload),
            _ => None,
        })
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError> {
        self.write(key, CachedValue::Payload(payload.to_string()), ttl).await;
        Ok(())
    }

    async fn get_fields(&self, key: &str) -> Result<Option<FieldMap>, CacheError> {
        Ok(match self.read(key).await {
            Some(CachedValue::Fields(fields)) => Some(fields),
            _ => None,
        })
    }

    async fn set_fields(&self, key: &str, fields: &FieldMap, ttl: Duration) -> Result<(), CacheError> {
        self.write(key, CachedValue::Fields(fields.clone()), ttl).await;
        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }
}
