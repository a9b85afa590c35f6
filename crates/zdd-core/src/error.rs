//! Error types for `zdd-core`, plus the classification every store error
//! exposes to the transport layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown stage {0:?}: expected one of v1, v2, v3, v4, v5")]
  UnknownStage(String),

  #[error("invalid asset: {0}")]
  InvalidAsset(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse failure class of a store operation.
///
/// The transport layer maps on this, never on the concrete error type, so
/// backends can keep their raw database errors private.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// A lookup or update targeted an id that does not exist.
  NotFound,
  /// A uniqueness constraint was violated (e.g. duplicate asset id).
  Conflict,
  /// The caller supplied input the store refuses to persist.
  InvalidInput,
  /// Connection, timeout or lock contention. Retrying the whole operation
  /// is safe; the store never retries on its own.
  Transient,
  /// A `migrate` step failed. The service must not accept traffic.
  Structural,
  Internal,
}

impl ErrorKind {
  pub fn is_retryable(self) -> bool { matches!(self, ErrorKind::Transient) }
}

/// Implemented by every [`AssetStore::Error`](crate::store::AssetStore::Error).
pub trait Classify {
  fn kind(&self) -> ErrorKind;
}

impl Classify for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::UnknownStage(_) => ErrorKind::Structural,
      Error::InvalidAsset(_) => ErrorKind::InvalidInput,
    }
  }
}
