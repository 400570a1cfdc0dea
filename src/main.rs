use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quest_proxy::api;
use quest_proxy::cache::{CacheStore, MemoryCache, RedisClient};
use quest_proxy::clients::HttpGateway;
use quest_proxy::config::EnvironmentConfig;
use quest_proxy::state::AppState;

const MEMORY_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🎮 Quest Proxy - Hypixel / Mojang");
    info!("================================");

    let config = EnvironmentConfig::from_env()?;

    let cache = build_cache(&config).await;
    let gateway = Arc::new(HttpGateway::new(&config.upstream)?);

    let app_state = AppState::new(&config, cache, gateway);
    let app = api::create_router(app_state, &config.cors_origins);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /quests - Catálogo de juegos y quests");
    info!("   GET  /player?username=<nombre> - Estadísticas de un jugador");
    info!("   GET  /health - Health check");
    info!("🔓 CORS permitido para: {}", config.cors_origins.join(", "));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Redis si hay URL configurada; si no, o si no conecta, cache en memoria
async fn build_cache(config: &EnvironmentConfig) -> Arc<dyn CacheStore> {
    if let Some(redis_url) = &config.cache.redis_url {
        match RedisClient::new(redis_url, &config.cache).await {
            Ok(client) => return Arc::new(client),
            Err(e) => error!("❌ Error conectando a Redis, se usa cache en memoria: {}", e),
        }
    } else {
        warn!("⚠️ REDIS_URL no configurada, se usa cache en memoria");
    }

    let memory = MemoryCache::new();
    let sweeper = memory.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(MEMORY_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sweeper.purge_expired().await;
            if purged > 0 {
                info!("🧹 {} entradas expiradas eliminadas del cache en memoria", purged);
            }
        }
    });
    Arc::new(memory)
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
