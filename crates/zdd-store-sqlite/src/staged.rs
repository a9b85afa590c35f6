//! [`StagedStore`]: the one stage a process serves, chosen at startup.

use zdd_core::{Asset, Stage, store::AssetStore};

use crate::{Error, Pool, Result, StageV1, StageV2, StageV3, StageV4, StageV5};

/// Dispatches every call to the selected stage.
#[derive(Clone)]
pub enum StagedStore {
  V1(StageV1),
  V2(StageV2),
  V3(StageV3),
  V4(StageV4),
  V5(StageV5),
}

macro_rules! dispatch {
  ($self:ident, $stage:ident => $call:expr) => {
    match $self {
      StagedStore::V1($stage) => $call,
      StagedStore::V2($stage) => $call,
      StagedStore::V3($stage) => $call,
      StagedStore::V4($stage) => $call,
      StagedStore::V5($stage) => $call,
    }
  };
}

impl StagedStore {
  pub fn new(pool: Pool, stage: Stage) -> Self {
    match stage {
      Stage::V1 => StagedStore::V1(StageV1::new(pool)),
      Stage::V2 => StagedStore::V2(StageV2::new(pool)),
      Stage::V3 => StagedStore::V3(StageV3::new(pool)),
      Stage::V4 => StagedStore::V4(StageV4::new(pool)),
      Stage::V5 => StagedStore::V5(StageV5::new(pool)),
    }
  }

  pub fn stage(&self) -> Stage {
    match self {
      StagedStore::V1(_) => Stage::V1,
      StagedStore::V2(_) => Stage::V2,
      StagedStore::V3(_) => Stage::V3,
      StagedStore::V4(_) => Stage::V4,
      StagedStore::V5(_) => Stage::V5,
    }
  }

  pub fn pool(&self) -> &Pool { dispatch!(self, s => s.pool()) }

  /// Run every stage's `migrate` from `V1` up to this one, in order.
  ///
  /// Brings an empty database (or one left at any earlier stage) into this
  /// stage's shape. Every step is idempotent, so already-applied stages are
  /// no-ops.
  pub async fn migrate_through(&self) -> Result<()> {
    for stage in self.stage().up_to() {
      StagedStore::new(self.pool().clone(), stage).migrate().await?;
    }
    Ok(())
  }
}

impl AssetStore for StagedStore {
  type Error = Error;

  async fn migrate(&self) -> Result<()> { dispatch!(self, s => s.migrate().await) }

  async fn create_asset(&self, asset: Asset) -> Result<Asset> {
    dispatch!(self, s => s.create_asset(asset).await)
  }

  async fn read_asset_by_id(&self, id: &str) -> Result<Option<Asset>> {
    dispatch!(self, s => s.read_asset_by_id(id).await)
  }

  async fn update_source_by_id(&self, id: &str, source: &str) -> Result<()> {
    dispatch!(self, s => s.update_source_by_id(id, source).await)
  }

  async fn delete_asset_by_id(&self, id: &str) -> Result<()> {
    dispatch!(self, s => s.delete_asset_by_id(id).await)
  }
}
