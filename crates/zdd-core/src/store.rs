//! The `AssetStore` trait: the CRUD contract every stage honours.
//!
//! The trait is implemented by storage backends (e.g. `zdd-store-sqlite`).
//! Higher layers (`zdd-api`, `zdd-server`) depend on this abstraction, not
//! on any concrete backend or stage.

use std::future::Future;

use crate::{asset::Asset, error::Classify};

/// Abstraction over one stage of the asset store.
///
/// Whatever the physical schema looks like, callers see the same logical
/// [`Asset`]. All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AssetStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  /// Bring the database into this stage's shape.
  ///
  /// Idempotent, and safe against a database already shaped for this or a
  /// later stage. Runs once before any traffic is served; a failure here is
  /// fatal.
  fn migrate(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a new asset. Fails with a `Conflict` kind if the id is taken.
  /// May lazily create the source row.
  fn create_asset(
    &self,
    asset: Asset,
  ) -> impl Future<Output = Result<Asset, Self::Error>> + Send + '_;

  /// Returns `None` if no asset has this id.
  fn read_asset_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Asset>, Self::Error>> + Send + 'a;

  /// Point an existing asset at another source. Fails with a `NotFound`
  /// kind if the id does not exist.
  fn update_source_by_id<'a>(
    &'a self,
    id: &'a str,
    source: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Idempotent: deleting a missing id succeeds and changes nothing.
  fn delete_asset_by_id<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
