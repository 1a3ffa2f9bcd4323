//! SQL schema for the IBGE observation store.
//!
//! Executed by [`SqliteStore::ensure_schema`](crate::SqliteStore) on every
//! run. Future migrations will be gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS paises (
    id    INTEGER PRIMARY KEY,
    nome  TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS indicadores (
    id    INTEGER PRIMARY KEY,
    nome  TEXT NOT NULL UNIQUE
);

-- Fact rows are strictly append-only, with no natural key: re-ingesting the
-- same payload inserts duplicate rows.
CREATE TABLE IF NOT EXISTS dados (
    id            INTEGER PRIMARY KEY,
    pais_id       INTEGER NOT NULL REFERENCES paises(id),
    indicador_id  INTEGER NOT NULL REFERENCES indicadores(id),
    ano           INTEGER NOT NULL,
    valor         REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS dados_pais_idx      ON dados(pais_id);
CREATE INDEX IF NOT EXISTS dados_indicador_idx ON dados(indicador_id);

PRAGMA user_version = 1;
";
