//! Serde shapes for the IBGE country-indicator API response.
//!
//! The API returns a list of indicator blocks. Each block carries one series
//! per requested country, and each series is a list of single-entry
//! year → value maps where the value may be a string, a number, or null.

use serde::Deserialize;
use serde_json::Value;

/// One indicator block from the API response.
///
/// A missing `indicador` key is a deserialization error; a missing `series`
/// list is treated as empty.
#[derive(Debug, Clone, Deserialize)]
pub struct IndicatorBlock {
  /// Indicator code, e.g. `"77818"`.
  pub indicador: String,
  #[serde(default)]
  pub series:    Vec<CountrySeries>,
}

/// The per-country series inside an indicator block.
#[derive(Debug, Clone, Deserialize)]
pub struct CountrySeries {
  pub pais:  CountryRef,
  /// Year → value cells. The API emits one single-entry map per year.
  #[serde(default)]
  pub serie: Vec<serde_json::Map<String, Value>>,
}

/// Country reference (ISO 3166 alpha-2 code in `id`).
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRef {
  pub id: String,
}
