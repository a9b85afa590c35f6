//! Stage 5: contract, drop `assets.source`.
//!
//! Stage 4's operations never touch the column, so only `migrate` changes.

use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{
  Error, Pool, Result, StageV4,
  schema::{DROP_SOURCE, column_exists},
};

#[derive(Clone)]
pub struct StageV5 {
  prev: StageV4,
}

impl StageV5 {
  pub fn new(pool: Pool) -> Self { Self { prev: StageV4::new(pool) } }

  pub fn pool(&self) -> &Pool { self.prev.pool() }
}

impl AssetStore for StageV5 {
  type Error = Error;

  async fn migrate(&self) -> Result<()> {
    let dropped = self
      .pool()
      .with_transaction(|tx| {
        if !column_exists(tx, "assets", "source")? {
          return Ok(false);
        }
        tx.execute_batch(DROP_SOURCE)?;
        Ok(true)
      })
      .await
      .map_err(Error::migration(Stage::V5))?;

    tracing::info!(stage = %Stage::V5, dropped, "dropped assets.source");
    Ok(())
  }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    self.prev.create_asset(asset).await
  }

  async fn read_asset_by_id(&self, id: &str) -> Result<Option<Asset>> {
    self.prev.read_asset_by_id(id).await
  }

  async fn update_source_by_id(&self, id: &str, source: &str) -> Result<()> {
    self.prev.update_source_by_id(id, source).await
  }

  async fn delete_asset_by_id(&self, id: &str) -> Result<()> {
    self.prev.delete_asset_by_id(id).await
  }
}
