use anyhow::{Context, Result};
use persistence::repositories::UserRepository;
use shared::jwt::TokenService;
use std::sync::Arc;
use tracing::info;

use user_service_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics().context("Failed to install Prometheus recorder")?;

    info!("Starting User Service v{}", env!("CARGO_PKG_VERSION"));

    // Signing keys are loaded once; a missing or invalid key is fatal
    let tokens = TokenService::from_files(&config.jwt.private_key_path, &config.jwt.public_key_path)
        .context("Failed to load token signing keys")?;

    let pool = persistence::db::create_pool(&config.pool_config()).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let store = Arc::new(UserRepository::new(pool));
    let addr = config.socket_addr()?;
    let app = app::create_app(config, store, Arc::new(tokens));

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
