//! Error type for `ibge-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A fact row named a country or indicator missing from its dimension
  /// table. Dimensions must be upserted before facts are inserted.
  #[error("unresolved {table} dimension: {name:?}")]
  UnresolvedDimension { table: &'static str, name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
