use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ats_api::config::Config;
use ats_api::db::{create_pool, run_migrations};
use ats_api::llm_client;
use ats_api::routes::build_router;
use ats_api::state::AppState;
use ats_api::store::{MemoryStore, PgStore, TalentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("ats_api={0},tower_http={0}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    let store: Arc<dyn TalentStore> = if config.uses_memory_store() {
        warn!("DATABASE_URL is memory://; matches are lost on restart");
        Arc::new(MemoryStore::new())
    } else {
        let db = create_pool(&config.database_url).await?;
        if config.run_migrations {
            run_migrations(&db).await?;
        }
        Arc::new(PgStore::new(db))
    };

    let state = AppState::new(config.clone(), store)?;
    info!(
        "LLM client initialized (model: {}, timeout: {}s, pool cap: {})",
        llm_client::MODEL,
        config.llm_timeout_secs,
        config.match_pool_size
    );

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
