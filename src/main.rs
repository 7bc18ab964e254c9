use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &notes_api::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_path = %cfg.database_path.display(),
        listen_addr = %cfg.listen_addr,
        cors_origins = ?cfg.cors_origins,
        loglevel = %cfg.loglevel,
        production = cfg.production,
        max_body_bytes = cfg.max_body_bytes
    );

    cfg.ensure_secure()?;
    if cfg.uses_default_admin_password() {
        warn!("NOTES_ADMIN_PASSWORD not set; deletes are guarded by the built-in fallback secret");
    }

    let storage = notes_api::db::open(&cfg.database_path).await?;

    let state = notes_api::router::NotesState::from_config(storage.clone(), cfg);
    let app = notes_api::router::notes_router(state, cfg);

    let listener = TcpListener::bind(cfg.listen_addr.as_str()).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    storage.close().await;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
