//! Stage 1, the baseline: `source` is a free-text column on `assets`.

use rusqlite::OptionalExtension as _;
use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{Error, Pool, Result, schema::CREATE_ASSETS};

#[derive(Clone)]
pub struct StageV1 {
  pool: Pool,
}

impl StageV1 {
  pub fn new(pool: Pool) -> Self { Self { pool } }

  pub fn pool(&self) -> &Pool { &self.pool }
}

impl AssetStore for StageV1 {
  type Error = Error;

  async fn migrate(&self) -> Result<()> {
    tracing::info!(stage = %Stage::V1, "creating assets table");
    self
      .pool
      .run(|conn| {
        conn.execute_batch(CREATE_ASSETS)?;
        Ok(())
      })
      .await
      .map_err(Error::migration(Stage::V1))
  }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    asset.validate()?;
    tracing::debug!(stage = %Stage::V1, id = %asset.id, "create asset");

    let row = asset.clone();
    self
      .pool
      .run(move |conn| {
        conn
          .execute(
            "INSERT INTO assets (id, name, source) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.id, row.name, row.source],
          )
          .map_err(Error::on_insert(&row.id))?;
        Ok(())
      })
      .await?;

    Ok(asset)
  }

  /// Fails with [`Error::SourceNotWritten`] on rows written after the stage 4
  /// write switch, whose text column was never filled.
  async fn read_asset_by_id(&self, id: &str) -> Result<Option<Asset>> {
    let id = id.to_owned();
    self
      .pool
      .run(move |conn| {
        let row = conn
          .query_row(
            "SELECT id, name, source FROM assets WHERE id = ?1",
            rusqlite::params![id],
            |row| {
              Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
              ))
            },
          )
          .optional()?;

        match row {
          None => Ok(None),
          Some((id, name, Some(source))) => Ok(Some(Asset { id, name, source })),
          Some((id, _, None)) => Err(Error::SourceNotWritten(id)),
        }
      })
      .await
  }

  async fn update_source_by_id(&self, id: &str, source: &str) -> Result<()> {
    let (id, source) = (id.to_owned(), source.to_owned());
    self
      .pool
      .run(move |conn| {
        let updated = conn.execute(
          "UPDATE assets SET source = ?2 WHERE id = ?1",
          rusqlite::params![id, source],
        )?;
        if updated == 0 {
          return Err(Error::AssetNotFound(id));
        }
        Ok(())
      })
      .await
  }

  async fn delete_asset_by_id(&self, id: &str) -> Result<()> {
    let id = id.to_owned();
    self
      .pool
      .run(move |conn| {
        conn.execute("DELETE FROM assets WHERE id = ?1", rusqlite::params![id])?;
        Ok(())
      })
      .await
  }
}
