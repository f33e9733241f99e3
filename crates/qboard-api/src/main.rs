mod config;
mod error;
mod routes;

use std::sync::Arc;

use config::AppConfig;
use qboard_core::db::Database;
use routes::{app_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("qboard_api=info".parse()?)
                .add_directive("qboard_core=info".parse()?),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Starting qboard-api with config: {:?}", config);

    let database = Database::open(&config.db_path)?;
    let state = AppState::new(config, database);
    let bind_addr = state.config.bind_addr.clone();
    let router = app_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("qboard-api listening on {}", bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
