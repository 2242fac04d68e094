use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::EnvFilter;

use concierge::chat::provider::OpenAiProvider;
use concierge::config::Config;
use concierge::server::{build_router, AppState};
use concierge::store::run_migrations;
use concierge::tools::MockCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    tracing::info!("Starting travel concierge service");
    tracing::info!("Chat model: {}", config.chat_model);
    if config.allow_test_bypass {
        tracing::warn!("Test bypass is ENABLED - do not run this configuration in production");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.sqlite_max_connections)
        .connect(&config.database_url)
        .await?;
    run_migrations(&pool).await?;

    let provider = Arc::new(OpenAiProvider::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
    ));

    let state = AppState::new(pool, provider, Arc::new(MockCatalog), Arc::new(config.clone()));
    let app = build_router(state);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
