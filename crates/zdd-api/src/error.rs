//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use zdd_core::{Classify, ErrorKind};

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("store error ({kind:?}): {source}")]
  Store {
    kind:   ErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Classify a store failure. Client errors keep their message; anything
  /// else is carried opaquely and redacted in the response.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Classify + Send + Sync + 'static,
  {
    match err.kind() {
      ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
      // A constraint violation may come straight from the database.
      ErrorKind::Conflict => {
        tracing::debug!(error = %err, "conflicting write");
        ApiError::Conflict("asset already exists".to_owned())
      }
      ErrorKind::InvalidInput => ApiError::BadRequest(err.to_string()),
      kind => ApiError::Store { kind, source: Box::new(err) },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::Store { kind, source } => {
        // Raw database errors stay in the log.
        tracing::error!(?kind, error = %source, "store operation failed");
        if kind.is_retryable() {
          (
            StatusCode::SERVICE_UNAVAILABLE,
            "temporarily unavailable, retry later".to_owned(),
          )
        } else {
          (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
        }
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
