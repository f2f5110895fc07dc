use anyhow::Context;

use fieldops_api::config::AppConfig;
use fieldops_api::database::{schema, DatabaseManager};
use fieldops_api::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SECURITY_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    fieldops_api::init_tracing();

    let config = AppConfig::from_env();
    config.validate()?;
    tracing::info!("Starting Field Ops API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config).await?;
    schema::init_db(&pool).await?;

    let bind_addr = config.bind_addr();
    let app = fieldops_api::app(AppState::new(config, pool.clone()));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Field Ops API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
