//! Async HTTP client for the IBGE country-indicator JSON API.

use std::time::Duration;

use anyhow::{Context, Result};
use ibge_core::payload::IndicatorBlock;
use reqwest::Client;

/// Connection settings for the IBGE API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

/// Async HTTP client for the IBGE JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, countries: &str, indicators: &str) -> String {
    format!(
      "{}/{countries}/indicadores/{indicators}",
      self.config.base_url.trim_end_matches('/'),
    )
  }

  /// Fetch the indicator blocks for pipe-delimited country and indicator
  /// code lists.
  ///
  /// One GET, no retry: a timeout, a non-2xx status, or an undecodable body
  /// is an error.
  pub async fn fetch_indicators(
    &self,
    countries: &str,
    indicators: &str,
  ) -> Result<Vec<IndicatorBlock>> {
    let url = self.url(countries, indicators);
    tracing::debug!(%url, "requesting indicator data");

    let response = self
      .client
      .get(&url)
      .send()
      .await
      .with_context(|| format!("GET {url} failed"))?
      .error_for_status()
      .context("IBGE API returned an error status")?;

    response
      .json::<Vec<IndicatorBlock>>()
      .await
      .context("failed to decode IBGE API response")
  }
}
