//! Stage 4: switch writes.
//!
//! Writes go through `source_id` only. `assets.source` is still there, so
//! stage 3 can keep serving alongside, but nothing writes it any more.

use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{Error, Pool, Result, StageV3, source::ensure_source_exists};

#[derive(Clone)]
pub struct StageV4 {
  prev: StageV3,
}

impl StageV4 {
  pub fn new(pool: Pool) -> Self { Self { prev: StageV3::new(pool) } }

  pub fn pool(&self) -> &Pool { self.prev.pool() }
}

impl AssetStore for StageV4 {
  type Error = Error;

  async fn migrate(&self) -> Result<()> {
    tracing::info!(stage = %Stage::V4, "no structural change");
    Ok(())
  }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    asset.validate()?;
    tracing::debug!(stage = %Stage::V4, id = %asset.id, "create asset");

    let row = asset.clone();
    self
      .pool()
      .with_transaction(move |tx| {
        let source_id = ensure_source_exists(tx, &row.source)?;
        tx.execute(
          "INSERT INTO assets (id, name, source_id) VALUES (?1, ?2, ?3)",
          rusqlite::params![row.id, row.name, source_id],
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
          "UPDATE assets SET source_id = ?2 WHERE id = ?1",
          rusqlite::params![id, source_id],
        )?;
        if updated == 0 {
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
