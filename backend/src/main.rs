use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use expense_tracker::config::Config;
use expense_tracker::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    info!("Starting server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on {}", config.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
