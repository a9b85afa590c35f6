//! Source deduplication: exactly one `sources` row per name.

use rusqlite::Transaction;
use uuid::Uuid;

use crate::Result;

/// Make sure a `sources` row named `name` exists and return its id.
///
/// The insert is conditional on the name being absent, in one statement, and
/// it runs inside the caller's transaction so it commits or rolls back with
/// the asset write that depends on it. Calling this again for the same name
/// writes nothing and returns the existing id.
pub fn ensure_source_exists(tx: &Transaction<'_>, name: &str) -> Result<String> {
  let candidate = Uuid::new_v4().hyphenated().to_string();

  let inserted = tx.execute(
    "INSERT INTO sources (id, name)
     SELECT ?1, ?2
     WHERE NOT EXISTS (SELECT 1 FROM sources WHERE name = ?2)",
    rusqlite::params![candidate, name],
  )?;

  if inserted == 1 {
    tracing::debug!(source = name, id = %candidate, "created source");
    return Ok(candidate);
  }

  Ok(tx.query_row(
    "SELECT id FROM sources WHERE name = ?1",
    rusqlite::params![name],
    |row| row.get(0),
  )?)
}
