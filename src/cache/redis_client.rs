use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info, warn};

use super::{CacheConfig, CacheError, CacheStore, FieldMap};

/// Cliente Redis con connection manager y operaciones async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    operation_timeout: Duration,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(redis_url: &str, config: &CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", mask_redis_url(redis_url));

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        // Test de conexión usando un comando simple
        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self {
            manager,
            operation_timeout: config.operation_timeout,
        })
    }

    /// Ejecutar un comando acotado por el timeout de operación
    async fn bounded<T, F>(&self, op: &str, key: &str, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("⚠️ Redis {} falló para clave {}: {}", op, key, e);
                Err(e.into())
            }
            Err(_) => {
                warn!("⏰ Redis {} excedió {:?} para clave {}", op, self.operation_timeout, key);
                Err(CacheError::Unavailable(format!("{} timed out", op)))
            }
        }
    }
}

/// SET EX rechaza 0 segundos
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = self.bounded("GET", key, conn.get(key)).await?;

        match &value {
            Some(_) => debug!("📥 Cache HIT para clave: {}", key),
            None => debug!("❌ Cache MISS para clave: {}", key),
        }
        Ok(value)
    }

    async fn set(&self, key: &str, payload: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let secs = ttl_secs(ttl);

        let _: () = self.bounded("SET", key, conn.set_ex(key, payload, secs)).await?;

        debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, secs);
        Ok(())
    }

    async fn get_fields(&self, key: &str) -> Result<Option<FieldMap>, CacheError> {
        let mut conn = self.manager.clone();
        let fields: FieldMap = self.bounded("HGETALL", key, conn.hgetall(key)).await?;

        // HGETALL sobre una clave inexistente devuelve un mapa vacío
        if fields.is_empty() {
            debug!("❌ Cache MISS para clave: {}", key);
            Ok(None)
        } else {
            debug!("📥 Cache HIT para clave: {}", key);
            Ok(Some(fields))
        }
    }

    async fn set_fields(&self, key: &str, fields: &FieldMap, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        let secs = ttl_secs(ttl);
        let pairs: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        let mut pipe = redis::pipe();
        pipe.atomic()
            .hset_multiple(key, &pairs)
            .ignore()
            .cmd("EXPIRE")
            .arg(key)
            .arg(secs)
            .ignore();

        let _: () = self
            .bounded("HSET", key, pipe.query_async(&mut conn))
            .await?;

        debug!("💾 Cache HSET para clave: {} ({} campos, TTL: {}s)", key, pairs.len(), secs);
        Ok(())
    }

    async fn ping(&self) -> bool {
        let mut conn = self.manager.clone();
        let cmd = redis::cmd("PING");
        match self.bounded("PING", "-", cmd.query_async::<_, String>(&mut conn)).await {
            Ok(response) => response == "PONG",
            Err(_) => false,
        }
    }
}

/// Enmascarar credenciales de la URL de Redis en logs
fn mask_redis_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at_pos)) if at_pos > scheme_end => {
            format!("{}***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
