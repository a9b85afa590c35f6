//! Error type for `zdd-store-sqlite`.

use std::time::Duration;

use rusqlite::ErrorCode;
use thiserror::Error;
use zdd_core::{Classify, ErrorKind, Stage};

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] zdd_core::Error),

  #[error("asset not found: {0}")]
  AssetNotFound(String),

  #[error("asset already exists: {0}")]
  AssetExists(String),

  #[error("timed out after {0:?} waiting for a pooled connection")]
  AcquireTimeout(Duration),

  #[error("connection pool is closed")]
  PoolClosed,

  #[error("connection pool error: {0}")]
  Pool(String),

  /// The closure handed to a pooled connection panicked or was aborted.
  #[error("connection worker failed: {0}")]
  Interact(String),

  /// A stage that reads `assets.source` found it NULL: the row was written
  /// after the write switch, so this stage is too old for the database.
  #[error("asset {0} has no text source; the store is past the write switch")]
  SourceNotWritten(String),

  #[error("migration to stage {stage} failed: {source}")]
  Migration {
    stage:  Stage,
    #[source]
    source: Box<Error>,
  },

  #[error("sqlite error: {0}")]
  Sqlite(#[from] rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  /// Wrap a failed structural step so it classifies as
  /// [`ErrorKind::Structural`].
  pub(crate) fn migration(stage: Stage) -> impl FnOnce(Error) -> Error {
    move |source| Error::Migration { stage, source: Box::new(source) }
  }

  /// Map a primary-key violation on `assets.id` to [`Error::AssetExists`].
  pub(crate) fn on_insert(id: &str) -> impl FnOnce(rusqlite::Error) -> Error + '_ {
    move |e| match e.sqlite_error_code() {
      Some(ErrorCode::ConstraintViolation) => Error::AssetExists(id.to_owned()),
      _ => Error::Sqlite(e),
    }
  }
}

fn classify_sqlite(e: &rusqlite::Error) -> ErrorKind {
  match e.sqlite_error_code() {
    Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => {
      ErrorKind::Transient
    }
    Some(ErrorCode::ConstraintViolation) => ErrorKind::Conflict,
    _ => ErrorKind::Internal,
  }
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::Core(e) => e.kind(),
      Error::AssetNotFound(_) => ErrorKind::NotFound,
      Error::AssetExists(_) => ErrorKind::Conflict,
      Error::AcquireTimeout(_) => ErrorKind::Transient,
      Error::PoolClosed | Error::Pool(_) | Error::Interact(_) => {
        ErrorKind::Internal
      }
      Error::Migration { .. } | Error::SourceNotWritten(_) => {
        ErrorKind::Structural
      }
      Error::Sqlite(e) => classify_sqlite(e),
    }
  }
}
