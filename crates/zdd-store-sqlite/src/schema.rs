//! SQL schema pieces for the asset store.
//!
//! There is no single schema: each stage applies its own structural step.
//! SQLite has no `ADD COLUMN IF NOT EXISTS`, so stages that alter `assets`
//! check [`column_exists`] first.

use rusqlite::Connection;

/// Persisted in the database file; applied once when the pool opens.
pub const DATABASE_PRAGMAS: &str = "PRAGMA journal_mode = WAL;";

/// Per connection; applied on every checkout.
pub const SESSION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Stage 1: the baseline table with an inline free-text `source`.
pub const CREATE_ASSETS: &str = "
CREATE TABLE IF NOT EXISTS assets (
    id      TEXT PRIMARY KEY,
    name    TEXT NOT NULL,
    source  TEXT
);
";

/// Stage 2: one row per distinct source name.
pub const CREATE_SOURCES: &str = "
CREATE TABLE IF NOT EXISTS sources (
    id    TEXT PRIMARY KEY,   -- hyphenated v4 UUID
    name  TEXT NOT NULL UNIQUE
);
";

/// Stage 2: nullable until the stage 3 backfill has run.
pub const ADD_SOURCE_ID: &str =
  "ALTER TABLE assets ADD COLUMN source_id TEXT REFERENCES sources(id);";

/// Stage 5.
pub const DROP_SOURCE: &str = "ALTER TABLE assets DROP COLUMN source;";

pub fn column_exists(
  conn: &Connection,
  table: &str,
  column: &str,
) -> rusqlite::Result<bool> {
  conn.query_row(
    "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
    rusqlite::params![table, column],
    |row| row.get::<_, i64>(0).map(|n| n > 0),
  )
}
