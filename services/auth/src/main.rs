use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use auth::{AppState, config::AppConfig, routes::create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting authentication service");

    let config = AppConfig::from_env()?;
    info!("Allowed origins: {}", config.allowed_origins.join(", "));

    let app_state = AppState::initialize(&config).await?;

    info!("Authentication service initialized successfully");

    let app = create_router(app_state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Authentication service listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
