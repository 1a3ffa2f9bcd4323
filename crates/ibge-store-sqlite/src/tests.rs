//! Integration tests for `SqliteStore` against an in-memory database.

use ibge_core::{row::ObservationRow, store::ObservationStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory().await.expect("in-memory store");
  s.ensure_schema().await.expect("schema");
  s
}

fn row(country: &str, indicator: &str, year: i32, value: f64) -> ObservationRow {
  ObservationRow {
    country:   country.into(),
    indicator: indicator.into(),
    year,
    value,
  }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_schema_is_idempotent() {
  let s = store().await;
  s.ensure_schema().await.unwrap();
  s.ensure_schema().await.unwrap();

  assert!(s.list_countries().await.unwrap().is_empty());
  assert!(s.list_observations().await.unwrap().is_empty());
}

// ─── Dimension upsert ────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_creates_distinct_dimensions() {
  let s = store().await;
  let rows = vec![
    row("BR", "77818", 2020, 5.3),
    row("BR", "77819", 2020, 1.0),
    row("AR", "77818", 2021, 2.0),
  ];

  s.upsert_dimensions(&rows).await.unwrap();

  let countries = s.list_countries().await.unwrap();
  assert_eq!(
    countries.iter().map(|(_, n)| n.as_str()).collect::<Vec<_>>(),
    vec!["BR", "AR"]
  );

  let indicators = s.list_indicators().await.unwrap();
  assert_eq!(
    indicators.iter().map(|(_, n)| n.as_str()).collect::<Vec<_>>(),
    vec!["77818", "77819"]
  );
}

#[tokio::test]
async fn upsert_with_overlapping_names_is_idempotent() {
  let s = store().await;

  s.upsert_dimensions(&[row("BR", "77818", 2020, 5.3)])
    .await
    .unwrap();
  s.upsert_dimensions(&[
    row("BR", "77818", 2021, 4.1),
    row("UY", "77818", 2021, 3.0),
  ])
  .await
  .unwrap();

  let countries = s.list_countries().await.unwrap();
  let brs: Vec<_> = countries.iter().filter(|(_, n)| n == "BR").collect();
  assert_eq!(brs.len(), 1);
  assert_eq!(countries.len(), 2);

  // Surrogate id of the existing row is unchanged by the second upsert.
  assert_eq!(countries[0].1, "BR");
  assert_eq!(countries[0].0, 1);
}

// ─── Fact insertion ──────────────────────────────────────────────────────────

#[tokio::test]
async fn facts_resolve_to_dimension_ids() {
  let s = store().await;
  let rows = vec![
    row("BR", "77818", 2020, 5.3),
    row("AR", "77819", 2021, -0.7),
  ];

  s.upsert_dimensions(&rows).await.unwrap();
  let inserted = s.insert_observations(&rows).await.unwrap();
  assert_eq!(inserted, 2);

  // Joining back through the dimension tables reproduces the input rows in
  // insertion order, so every fact references a real dimension row.
  let stored = s.list_observations().await.unwrap();
  assert_eq!(stored, rows);
}

#[tokio::test]
async fn insert_without_upsert_fails_unresolved() {
  let s = store().await;

  let err = s
    .insert_observations(&[row("BR", "77818", 2020, 5.3)])
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    crate::Error::UnresolvedDimension { table: "paises", .. }
  ));

  // The failed transaction left nothing behind.
  assert!(s.list_observations().await.unwrap().is_empty());
}

#[tokio::test]
async fn unresolved_indicator_aborts_whole_batch() {
  let s = store().await;
  let known = vec![row("BR", "77818", 2020, 5.3)];
  s.upsert_dimensions(&known).await.unwrap();

  let batch = vec![
    row("BR", "77818", 2020, 5.3),
    row("BR", "99999", 2021, 1.0), // never upserted
  ];
  let err = s.insert_observations(&batch).await.unwrap_err();
  assert!(matches!(
    err,
    crate::Error::UnresolvedDimension { table: "indicadores", .. }
  ));

  // No partial rows: the resolvable first row rolled back too.
  assert!(s.list_observations().await.unwrap().is_empty());
}

#[tokio::test]
async fn reloading_same_rows_duplicates_facts() {
  // The fact table has no natural key; a rerun of the pipeline appends a
  // second copy of every row. That is the intended (if surprising) behavior.
  let s = store().await;
  let rows = vec![
    row("BR", "77818", 2020, 5.3),
    row("BR", "77818", 2021, 4.1),
  ];

  s.upsert_dimensions(&rows).await.unwrap();
  s.insert_observations(&rows).await.unwrap();

  s.upsert_dimensions(&rows).await.unwrap();
  s.insert_observations(&rows).await.unwrap();

  let stored = s.list_observations().await.unwrap();
  assert_eq!(stored.len(), 4);

  // Dimensions did not duplicate, only facts.
  assert_eq!(s.list_countries().await.unwrap().len(), 1);
  assert_eq!(s.list_indicators().await.unwrap().len(), 1);
}

#[tokio::test]
async fn empty_batch_inserts_nothing() {
  let s = store().await;
  s.upsert_dimensions(&[]).await.unwrap();
  let inserted = s.insert_observations(&[]).await.unwrap();
  assert_eq!(inserted, 0);
  assert!(s.list_observations().await.unwrap().is_empty());
}
