//! Stage 3: backfill and switch reads.
//!
//! `migrate` points every historical asset at its `sources` row. Reads go
//! through the join from here on; writes are inherited from stage 2 and keep
//! filling both columns, so stage 2's read path is still a valid fallback.

use rusqlite::OptionalExtension as _;
use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{
  Error, Pool, Result, StageV2, schema::column_exists,
  source::ensure_source_exists,
};

#[derive(Clone)]
pub struct StageV3 {
  prev: StageV2,
}

impl StageV3 {
  pub fn new(pool: Pool) -> Self { Self { prev: StageV2::new(pool) } }

  pub fn pool(&self) -> &Pool { self.prev.pool() }
}

impl AssetStore for StageV3 {
  type Error = Error;

  /// Backfill `assets.source_id` from the text column.
  ///
  /// Only rows with a NULL `source_id` are touched: once stage 4 writes
  /// `source_id` alone, the text column is stale and must not win. Names that
  /// never got a `sources` row (stage 1 writes) get one first.
  async fn migrate(&self) -> Result<()> {
    let backfilled = self
      .pool()
      .with_transaction(|tx| {
        if !column_exists(tx, "assets", "source")? {
          return Ok(0);
        }

        let orphans = {
          let mut stmt = tx.prepare(
            "SELECT DISTINCT source FROM assets
             WHERE source_id IS NULL AND source IS NOT NULL",
          )?;
          stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        for name in &orphans {
          ensure_source_exists(tx, name)?;
        }

        Ok(tx.execute(
          "UPDATE assets
           SET source_id = (SELECT s.id FROM sources s WHERE s.name = assets.source)
           WHERE source_id IS NULL
             AND source IN (SELECT name FROM sources)",
          [],
        )?)
      })
      .await
      .map_err(Error::migration(Stage::V3))?;

    tracing::info!(stage = %Stage::V3, backfilled, "backfilled assets.source_id");
    Ok(())
  }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    self.prev.create_asset(asset).await
  }

  async fn read_asset_by_id(&self, id: &str) -> Result<Option<Asset>> {
    let id = id.to_owned();
    self
      .pool()
      .run(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT a.id, a.name, s.name
               FROM assets a
               JOIN sources s ON s.id = a.source_id
               WHERE a.id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(Asset {
                  id:     row.get(0)?,
                  name:   row.get(1)?,
                  source: row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await
  }

  async fn update_source_by_id(&self, id: &str, source: &str) -> Result<()> {
    self.prev.update_source_by_id(id, source).await
  }

  async fn delete_asset_by_id(&self, id: &str) -> Result<()> {
    self.prev.delete_asset_by_id(id).await
  }
}
