//! studygenie-api - HTTP API server for StudyGenie

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use studygenie_api::config::LogFormat;
use studygenie_api::{logging, router, ApiConfig, AppState, StoreBackend};
use studygenie_core::logging::{SUBSYSTEM_DB, SUBSYSTEM_INFERENCE};
use studygenie_db::{Database, InMemoryStore, PoolConfig};
use studygenie_inference::{OpenAIBackend, StudyGenerator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ApiConfig::from_env()?;
    let _log_guard = logging::init_tracing(&config.log)?;

    info!(
        log_format = if config.log.format == LogFormat::Json { "json" } else { "text" },
        log_file = config.log.file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let backend = OpenAIBackend::new(config.openai.clone())?;
    if config.openai.api_key.is_none() && config.openai.requires_api_key() {
        warn!(
            subsystem = SUBSYSTEM_INFERENCE,
            "No API key configured; uploads and chat will fail until EMERGENT_LLM_KEY or OPENAI_API_KEY is set"
        );
    }
    let generator = StudyGenerator::new(Arc::new(backend));
    info!(
        model = generator.model_name(),
        base_url = %config.openai.base_url,
        cors_any_origin = config.cors_allows_any(),
        "Generation backend configured"
    );

    let (state, db) = match config.store_backend {
        StoreBackend::Postgres => {
            let db = Database::connect_with_config(
                &config.database_url,
                PoolConfig::new().max_connections(config.db_max_connections),
            )
            .await?;
            db.migrate().await?;
            (AppState::postgres(&db, generator), Some(db))
        }
        StoreBackend::Memory => {
            warn!(subsystem = SUBSYSTEM_DB, "Using in-memory store; data is lost on restart");
            (AppState::in_memory(InMemoryStore::new(), generator), None)
        }
    };

    let app = router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(db) = db {
        db.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
