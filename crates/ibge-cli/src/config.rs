//! Runtime configuration for the ingest pipeline.
//!
//! Values come from an optional TOML file plus `IBGE_`-prefixed environment
//! variables (e.g. `IBGE_DB_PATH`). Every field has a default, so the binary
//! runs with no setup at all.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Everything the pipeline needs, resolved once at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Base URL of the IBGE country API.
  pub base_url:     String,
  /// Pipe-delimited ISO country codes to request.
  pub countries:    String,
  /// Pipe-delimited indicator codes to request.
  pub indicators:   String,
  /// HTTP request timeout in seconds.
  pub timeout_secs: u64,
  /// Path of the SQLite database file.
  pub db_path:      PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      base_url:     "https://servicodados.ibge.gov.br/api/v1/paises".into(),
      countries:    "BR|AR|UY|ES|DE|IT|US|MX|CA|CN|JP|NZ|AU|DZ|EG|ZA".into(),
      indicators:   "77818|77819|77820".into(),
      timeout_secs: 5,
      db_path:      PathBuf::from("ibge.db"),
    }
  }
}

impl Config {
  /// Load from `path` (if it exists) with `IBGE_*` environment overrides.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("IBGE"))
      .build()
      .context("failed to read configuration")?;

    settings
      .try_deserialize()
      .context("failed to deserialise Config")
  }

  /// Reject obviously unusable values before the pipeline starts.
  pub fn validate(&self) -> Result<()> {
    ensure!(!self.base_url.is_empty(), "base_url must not be empty");
    ensure!(!self.countries.is_empty(), "countries must not be empty");
    ensure!(!self.indicators.is_empty(), "indicators must not be empty");
    ensure!(self.timeout_secs > 0, "timeout_secs must be positive");
    Ok(())
  }
}
