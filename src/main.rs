use anyhow::Result;
use portfolio_gateway::config::Config;
use portfolio_gateway::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("portfolio_gateway=info".parse()?),
        )
        .init();

    info!("Starting portfolio gateway");

    // Load configuration from environment
    let config = Config::from_env()?;
    let port = config.port;
    info!(
        locales = %config.locales.join(","),
        default = %config.default_locale,
        "Locale configuration loaded"
    );

    let state = AppState::new(config)?;
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Listening on port {}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
