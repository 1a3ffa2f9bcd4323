//! `ibge-ingest` — loads IBGE country-indicator series into SQLite.
//!
//! One sequential pass: fetch → normalize → preview → ensure schema →
//! upsert dimensions → insert facts. Any stage failure aborts the run.

mod client;
mod config;

use std::time::Duration;

use anyhow::Context as _;
use clap::Parser;
use ibge_core::{normalize, store::ObservationStore as _};
use ibge_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::client::{ApiClient, ApiConfig};
use crate::config::Config;

/// How many normalized rows to echo before loading.
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(author, version, about = "Load IBGE country indicators into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: std::path::PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = Config::load(&cli.config)?;
  cfg.validate()?;

  let api = ApiClient::new(ApiConfig {
    base_url: cfg.base_url.clone(),
    timeout:  Duration::from_secs(cfg.timeout_secs),
  })?;

  // Extract.
  let blocks = api.fetch_indicators(&cfg.countries, &cfg.indicators).await?;
  tracing::info!(blocks = blocks.len(), "fetched indicator blocks");

  // Normalize.
  let rows = normalize(&blocks);
  for row in rows.iter().take(PREVIEW_ROWS) {
    tracing::info!(
      country = %row.country,
      indicator = %row.indicator,
      year = row.year,
      value = row.value,
      "preview",
    );
  }

  // Load.
  let store = SqliteStore::open(&cfg.db_path)
    .await
    .with_context(|| format!("opening store at {}", cfg.db_path.display()))?;
  store.ensure_schema().await?;
  store.upsert_dimensions(&rows).await?;
  let inserted = store.insert_observations(&rows).await?;

  tracing::info!(inserted, db = %cfg.db_path.display(), "load complete");
  Ok(())
}
