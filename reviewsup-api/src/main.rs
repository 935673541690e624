//! reviewsup-api - Testimonial collection and showcase backend
//!
//! Serves the showcase assembly pipeline, review moderation, and widget
//! embedding verification behind an HTTP API. Routing/auth gateways and
//! the presentation layer live elsewhere.

use anyhow::Result;
use clap::Parser;
use reviewsup_api::{build_router, AppState, ServiceConfig};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "reviewsup-api", about = "Reviewsup backend API service")]
struct Args {
    /// Path to TOML config file
    #[arg(long, env = "REVIEWSUP_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config file)
    #[arg(long, env = "REVIEWSUP_DATABASE")]
    database: Option<PathBuf>,

    /// Bind port (overrides config file)
    #[arg(long, env = "REVIEWSUP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Reviewsup API (reviewsup-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Config resolution: CLI argument > environment > TOML file > default
    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(database) = args.database {
        config.database_path = database;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Database path: {}", config.database_path.display());
    let pool = reviewsup_api::db::init_database(&config.database_path).await?;

    let bind_addr = config.bind_addr();
    let state = AppState::new(pool, config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("reviewsup-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
