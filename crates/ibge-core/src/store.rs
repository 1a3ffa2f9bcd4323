//! The `ObservationStore` trait.
//!
//! Implemented by storage backends (e.g. `ibge-store-sqlite`). The pipeline
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::row::ObservationRow;

/// Abstraction over the star-schema store the pipeline loads into.
///
/// Dimension rows (countries, indicators) are upserted by natural name and
/// never updated or deleted. Fact rows are strictly appended; re-loading the
/// same rows duplicates them.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded async runtime.
pub trait ObservationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create the dimension and fact tables if they do not exist yet.
  /// Idempotent; safe to call on every run.
  fn ensure_schema(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert every distinct country and indicator name found in `rows` into
  /// its dimension table, first-seen order. Names already present are left
  /// untouched.
  fn upsert_dimensions<'a>(
    &'a self,
    rows: &'a [ObservationRow],
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Resolve each row's names to surrogate ids and append the resulting
  /// fact rows in one transaction. Returns the number of rows inserted.
  ///
  /// Fails if any name is missing from its dimension table; dimensions must
  /// be upserted first.
  fn insert_observations<'a>(
    &'a self,
    rows: &'a [ObservationRow],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// The country dimension table as (id, name) pairs, id order.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<(i64, String)>, Self::Error>> + Send + '_;

  /// The indicator dimension table as (id, name) pairs, id order.
  fn list_indicators(
    &self,
  ) -> impl Future<Output = Result<Vec<(i64, String)>, Self::Error>> + Send + '_;

  /// All fact rows joined back to their dimension names, insertion order.
  fn list_observations(
    &self,
  ) -> impl Future<Output = Result<Vec<ObservationRow>, Self::Error>> + Send + '_;
}
