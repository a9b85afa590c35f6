//! zdd-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) overlaid with
//! `ZDD_*` environment variables, migrates the store to the configured stage
//! and serves the asset API over HTTP.
//!
//! ```sh
//! ZDD_STAGE=v3 ZDD_STORE_PATH=assets.db cargo run -p zdd-server
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use zdd_server::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Zero-downtime asset store server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)?;

  // Migrate before binding: an unmigrated store must never see traffic.
  let store = zdd_server::open_store(&cfg).await?;
  let app = zdd_server::router(Arc::new(store));

  let address = cfg.address();
  tracing::info!(stage = %cfg.stage, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for ctrl-c");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
