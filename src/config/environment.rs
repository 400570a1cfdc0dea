//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Se lee una sola vez al
//! arrancar el proceso.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::cache::CacheConfig;

pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "http://quest.renntg.com",
    "https://quest.renntg.com",
    "http://localhost:5173",
];

/// Configuración de los servicios upstream
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub hypixel_url: String,
    pub mojang_url: String,
    pub hypixel_api_key: String,
    pub timeout: Duration,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
}

impl EnvironmentConfig {
    /// Cargar desde las variables de entorno del proceso
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let hypixel_api_key = var("HYPIXEL_API_KEY").ok_or_else(|| anyhow!("HYPIXEL_API_KEY must be set"))?;

        let cors_origins = match var("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        let defaults = CacheConfig::default();
        let cache = CacheConfig {
            redis_url: var("REDIS_URL"),
            operation_timeout: parse_secs(&var, "CACHE_TIMEOUT_SECS", defaults.operation_timeout)?,
            catalog_ttl: parse_secs(&var, "CATALOG_TTL_SECS", defaults.catalog_ttl)?,
            identity_ttl: parse_secs(&var, "IDENTITY_TTL_SECS", defaults.identity_ttl)?,
            stats_ttl: parse_secs(&var, "STATS_TTL_SECS", defaults.stats_ttl)?,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: match var("PORT") {
                Some(port) => port.parse().context("PORT must be a valid number")?,
                None => 8000,
            },
            cors_origins,
            upstream: UpstreamConfig {
                hypixel_url: var("HYPIXEL_API_URL").unwrap_or_else(|| "https://api.hypixel.net".to_string()),
                mojang_url: var("MOJANG_API_URL").unwrap_or_else(|| "https://api.mojang.com".to_string()),
                hypixel_api_key,
                timeout: parse_secs(&var, "UPSTREAM_TIMEOUT_SECS", Duration::from_secs(5))?,
            },
            cache,
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_secs<F>(var: &F, name: &str, default: Duration) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(value) => {
            let secs: u64 = value
                .parse()
                .with_context(|| format!("{} must be a number of seconds", name))?;
            Ok(Duration::from_secs(secs))
        }
        None => Ok(default),
    }
}
