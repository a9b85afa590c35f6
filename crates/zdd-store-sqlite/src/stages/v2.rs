//! Stage 2: expand.
//!
//! Adds `assets.source_id` and the `sources` table. Writes fill both the old
//! text column and the new reference, in one transaction; reads still use
//! the text column, so rows written by stage 1 stay readable.

use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{
  Error, Pool, Result, StageV1,
  schema::{ADD_SOURCE_ID, CREATE_SOURCES, column_exists},
  source::ensure_source_exists,
};

#[derive(Clone)]
pub struct StageV2 {
  prev: StageV1,
}

impl StageV2 {
  pub fn new(pool: Pool) -> Self { Self { prev: StageV1::new(pool) } }

  pub fn pool(&self) -> &Pool { self.prev.pool() }
}

impl AssetStore for StageV2 {
  type Error = Error;

  async fn migrate(&self) -> Result<()> {
    tracing::info!(stage = %Stage::V2, "adding sources table and assets.source_id");
    self
      .pool()
      .with_transaction(|tx| {
        tx.execute_batch(CREATE_SOURCES)?;
        if !column_exists(tx, "assets", "source_id")? {
          tx.execute_batch(ADD_SOURCE_ID)?;
        }
        Ok(())
      })
      .await
      .map_err(Error::migration(Stage::V2))
  }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    asset.validate()?;
    tracing::debug!(stage = %Stage::V2, id = %asset.id, "create asset");

    let row = asset.clone();
    self
      .pool()
      .with_transaction(move |tx| {
        let source_id = ensure_source_exists(tx, &row.source)?;
        tx.execute(
          "INSERT INTO assets (id, name, source, source_id) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.id, row.name, row.source, source_id],
        )
        .map_err(Error::on_insert(&row.id))?;
        Ok(())
      })
      .await?;

    Ok(asset)
  }

  async fn read_asset_by_id(&self, id: &str) -> Result<Option<Asset>> {
    self.prev.read_asset_by_id(id).await
  }

  async fn update_source_by_id(&self, id: &str, source: &str) -> Result<()> {
    let (id, source) = (id.to_owned(), source.to_owned());
    self
      .pool()
      .with_transaction(move |tx| {
        let source_id = ensure_source_exists(tx, &source)?;
        let updated = tx.execute(
          "UPDATE assets SET source = ?2, source_id = ?3 WHERE id = ?1",
          rusqlite::params![id, source, source_id],
        )?;
        if updated == 0 {
          // Rolls back the source row too.
          return Err(Error::AssetNotFound(id));
        }
        Ok(())
      })
      .await
  }

  async fn delete_asset_by_id(&self, id: &str) -> Result<()> {
    self.prev.delete_asset_by_id(id).await
  }
}
