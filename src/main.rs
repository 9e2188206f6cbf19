//! `rizz-admin` entry point.
//!
//! Loads `.env`, installs the tracing subscriber, reads configuration, and
//! dispatches the parsed command.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use rizz_admin::commands::{self, Cli};
use rizz_admin::{AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rizz_admin=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let cli = Cli::parse();
    tracing::debug!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    tracing::debug!(base_url = %config.api.base_url, "Configuration loaded");

    let app = AppState::new(config)?;
    commands::run(cli, app).await
}
