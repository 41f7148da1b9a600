use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderValue;
use rollbook_core::config::RollbookConfig;
use rollbook_core::db::sqlite::SqliteStudentStore;
use rollbook_core::db::DatabasePool;
use tokio::net::TcpListener;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

/// Run the `serve` command: start the web console server.
pub async fn run(config_path: &str, port: u16) -> anyhow::Result<()> {
    let config = RollbookConfig::load(Path::new(config_path))?;
    config.validate()?;

    let path = config
        .rollbook
        .database
        .path
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("SQLite path not configured"))?;
    let connect_str = format!("sqlite:{}?mode=rwc", path);
    let pool = DatabasePool::new_sqlite(&connect_str).await?;

    let store = match pool {
        DatabasePool::Sqlite(p) => SqliteStudentStore::new(p),
    };

    let state = Arc::new(rollbook_console::AppState {
        store,
        config: config.clone(),
    });
    let app = rollbook_console::router(state);

    // Add security headers
    let app = app
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;

    println!("Rollbook console listening on http://{}", addr);
    info!("Starting server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C handler");
    info!("Received shutdown signal");
}
