//! tunedrop-ui - music sharing web service binary
//!
//! Startup sequence: tracing, root folder resolution, database
//! initialization, settings load, HTTP server.

use anyhow::Result;
use tracing::info;
use tunedrop_common::config;
use tunedrop_common::db::{init_database, setting_i64, setting_u16, setting_usize};
use tunedrop_ui::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tunedrop-ui v{}", env!("CARGO_PKG_VERSION"));

    // Root folder: CLI arg > TUNEDROP_ROOT > config file > platform default
    let cli_root = std::env::args().nth(1);
    let root = config::resolve_root_folder(cli_root.as_deref());
    config::ensure_root_layout(&root)?;
    info!("Root folder: {}", root.display());

    let db_path = config::database_path(&root);
    let pool = init_database(&db_path).await?;

    let port = setting_u16(&pool, "http_port", 5730).await?;
    let session_timeout_secs = setting_i64(&pool, "session_timeout_seconds", 604800).await?;
    let upload_max_bytes = setting_usize(&pool, "upload_max_bytes", 52428800).await?;

    // Expired sessions accumulate between restarts; drop them up front
    let purged = tunedrop_ui::db::sessions::purge_expired(&pool).await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    let state = AppState::new(
        pool,
        config::upload_dir(&root),
        session_timeout_secs,
        upload_max_bytes,
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("tunedrop-ui listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}
