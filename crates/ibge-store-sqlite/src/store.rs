//! [`SqliteStore`] — the SQLite implementation of [`ObservationStore`].

use std::{
  collections::{HashMap, HashSet},
  path::Path,
};

use ibge_core::{row::ObservationRow, store::ObservationStore};

use crate::{Error, Result, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An observation store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`.
  ///
  /// The schema is not created here; call
  /// [`ensure_schema`](ObservationStore::ensure_schema) before loading.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self { conn })
  }

  /// Upsert `names` into the dimension table `table`, one transaction.
  /// Existing names are left untouched.
  async fn upsert_names(&self, table: &'static str, names: Vec<String>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let sql =
            format!("INSERT INTO {table} (nome) VALUES (?1) ON CONFLICT (nome) DO NOTHING");
          let mut stmt = tx.prepare(&sql)?;
          for nome in &names {
            stmt.execute(rusqlite::params![nome])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load a dimension table into a name → id map.
  fn load_dimension_map(
    tx: &rusqlite::Transaction<'_>,
    table: &str,
  ) -> rusqlite::Result<HashMap<String, i64>> {
    let mut stmt = tx.prepare(&format!("SELECT nome, id FROM {table}"))?;
    let rows = stmt
      .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.into_iter().collect())
  }

  /// List one dimension table as (id, name) pairs, id order.
  async fn list_dimension(&self, table: &'static str) -> Result<Vec<(i64, String)>> {
    let pairs = self
      .conn
      .call(move |conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT id, nome FROM {table} ORDER BY id"))?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(pairs)
  }
}

/// Distinct values of `names`, first-seen order.
fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
  let mut seen = HashSet::new();
  let mut out = Vec::new();
  for name in names {
    if seen.insert(name) {
      out.push(name.to_owned());
    }
  }
  out
}

// ─── ObservationStore impl ───────────────────────────────────────────────────

impl ObservationStore for SqliteStore {
  type Error = Error;

  async fn ensure_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn upsert_dimensions(&self, rows: &[ObservationRow]) -> Result<()> {
    let countries = distinct(rows.iter().map(|r| r.country.as_str()));
    let indicators = distinct(rows.iter().map(|r| r.indicator.as_str()));

    // One transaction per dimension table, countries first.
    self.upsert_names("paises", countries).await?;
    self.upsert_names("indicadores", indicators).await?;
    Ok(())
  }

  async fn insert_observations(&self, rows: &[ObservationRow]) -> Result<usize> {
    let rows = rows.to_vec();

    // The closure reports an unresolved name through the inner Result so the
    // transaction rolls back before the error is surfaced.
    let outcome: std::result::Result<usize, (&'static str, String)> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let pais_map = Self::load_dimension_map(&tx, "paises")?;
        let indicador_map = Self::load_dimension_map(&tx, "indicadores")?;

        {
          let mut stmt = tx.prepare(
            "INSERT INTO dados (pais_id, indicador_id, ano, valor)
             VALUES (?1, ?2, ?3, ?4)",
          )?;

          for row in &rows {
            let Some(&pais_id) = pais_map.get(&row.country) else {
              return Ok(Err(("paises", row.country.clone())));
            };
            let Some(&indicador_id) = indicador_map.get(&row.indicator) else {
              return Ok(Err(("indicadores", row.indicator.clone())));
            };
            stmt.execute(rusqlite::params![pais_id, indicador_id, row.year, row.value])?;
          }
        }

        tx.commit()?;
        Ok(Ok(rows.len()))
      })
      .await?;

    outcome.map_err(|(table, name)| Error::UnresolvedDimension { table, name })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_countries(&self) -> Result<Vec<(i64, String)>> {
    self.list_dimension("paises").await
  }

  async fn list_indicators(&self) -> Result<Vec<(i64, String)>> {
    self.list_dimension("indicadores").await
  }

  async fn list_observations(&self) -> Result<Vec<ObservationRow>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT p.nome, i.nome, d.ano, d.valor
           FROM dados d
           JOIN paises p      ON p.id = d.pais_id
           JOIN indicadores i ON i.id = d.indicador_id
           ORDER BY d.id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(ObservationRow {
              country:   row.get(0)?,
              indicator: row.get(1)?,
              year:      row.get(2)?,
              value:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}
