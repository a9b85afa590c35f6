//! Process wiring for the asset service: configuration, store start-up and
//! the top-level router.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::{Router, routing::get};
use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use zdd_core::{Stage, store::AssetStore};
use zdd_store_sqlite::{Pool, PoolConfig, StagedStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ZDD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  /// Which stage this deployment serves.
  pub stage:              Stage,
  pub store_path:         PathBuf,
  #[serde(default = "default_max_connections")]
  pub max_connections:    usize,
  #[serde(default = "default_timeout_ms")]
  pub acquire_timeout_ms: u64,
  #[serde(default = "default_timeout_ms")]
  pub busy_timeout_ms:    u64,
  /// Run every stage's migration up to `stage` instead of only its own.
  #[serde(default)]
  pub bootstrap:          bool,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_max_connections() -> usize { 8 }
fn default_timeout_ms() -> u64 { 5_000 }

impl ServerConfig {
  /// Layer `path` (optional) under `ZDD_`-prefixed environment variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_builder(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ZDD")),
    )
  }

  pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn pool_config(&self) -> PoolConfig {
    PoolConfig::new(&self.store_path)
      .with_max_connections(self.max_connections)
      .with_acquire_timeout(Duration::from_millis(self.acquire_timeout_ms))
      .with_busy_timeout(Duration::from_millis(self.busy_timeout_ms))
  }
}

// ─── Start-up ─────────────────────────────────────────────────────────────────

/// Open the pool, select the configured stage and migrate.
///
/// Any error here must stop the process before it serves traffic.
pub async fn open_store(cfg: &ServerConfig) -> anyhow::Result<StagedStore> {
  let pool = Pool::open(cfg.pool_config())
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;

  let store = StagedStore::new(pool, cfg.stage);
  let migrated = if cfg.bootstrap {
    tracing::info!(stage = %cfg.stage, "bootstrapping every stage up to the selected one");
    store.migrate_through().await
  } else {
    store.migrate().await
  };
  migrated.with_context(|| format!("migration for stage {} failed", cfg.stage))?;

  tracing::info!(stage = %cfg.stage, "store ready");
  Ok(store)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// `/health` plus the asset API under `/api`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: AssetStore + 'static,
{
  Router::new()
    .route("/health", get(|| async { "OK" }))
    .nest("/api", zdd_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}
