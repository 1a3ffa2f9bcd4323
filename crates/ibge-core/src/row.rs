//! The flat row format produced by normalization.

/// One normalized observation: a (country, indicator, year, value) tuple.
///
/// `country` and `indicator` are natural keys; the store resolves them to
/// surrogate ids at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
  pub country:   String,
  pub indicator: String,
  pub year:      i32,
  pub value:     f64,
}
