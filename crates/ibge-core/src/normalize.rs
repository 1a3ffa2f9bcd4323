//! Normalization of the nested API payload into flat observation rows.
//!
//! Traversal order (indicator → country → year) is preserved in the output.
//! Cells that fail validation are skipped with a [`SkipReason`] logged at
//! debug level; a bad cell never aborts the pass.

use serde_json::Value;

use crate::{payload::IndicatorBlock, row::ObservationRow};

// ─── Skip reasons ────────────────────────────────────────────────────────────

/// Why a year → value cell was left out of the normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The year key is not a non-negative decimal integer literal.
  NonNumericYear,
  /// The value is null, an empty string, or the `-` placeholder.
  MissingValue,
  /// The value looked present but did not convert to a finite number.
  NonNumericValue,
}

// ─── Normalization ───────────────────────────────────────────────────────────

/// Flatten `blocks` into observation rows, dropping invalid cells.
///
/// No deduplication and no sorting happen here: identical cells in the input
/// produce identical rows, in input order.
pub fn normalize(blocks: &[IndicatorBlock]) -> Vec<ObservationRow> {
  let mut rows = Vec::new();

  for block in blocks {
    for series in &block.series {
      for cell in &series.serie {
        for (year, value) in cell {
          match parse_cell(year, value) {
            Ok((year, value)) => rows.push(ObservationRow {
              country:   series.pais.id.clone(),
              indicator: block.indicador.clone(),
              year,
              value,
            }),
            Err(reason) => {
              tracing::debug!(
                country = %series.pais.id,
                indicator = %block.indicador,
                %year,
                ?reason,
                "skipping cell",
              );
            }
          }
        }
      }
    }
  }

  tracing::info!(rows = rows.len(), "normalized API payload");
  rows
}

/// Validate a single year → value cell.
pub fn parse_cell(year: &str, value: &Value) -> Result<(i32, f64), SkipReason> {
  if year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
    return Err(SkipReason::NonNumericYear);
  }
  let year: i32 = year.parse().map_err(|_| SkipReason::NonNumericYear)?;

  let parsed = match value {
    Value::Null => return Err(SkipReason::MissingValue),
    Value::String(s) if s.is_empty() || s == "-" => {
      return Err(SkipReason::MissingValue);
    }
    Value::String(s) => s.trim().parse::<f64>().ok(),
    Value::Number(n) => n.as_f64(),
    _ => None,
  };

  match parsed {
    Some(v) if v.is_finite() => Ok((year, v)),
    _ => Err(SkipReason::NonNumericValue),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
