//! Handlers for `/asset` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `POST`   | `/asset`      | Body: `{"id":"a1","name":"Doc A","source":"rss"}` |
//! | `GET`    | `/asset/{id}` | 404 if not found |
//! | `PUT`    | `/asset/{id}` | Body: `{"source":"twitter"}`; 404 if not found |
//! | `DELETE` | `/asset/{id}` | Succeeds whether or not the asset exists |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use zdd_core::{Asset, store::AssetStore};

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
  pub message: String,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /asset`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(asset): Json<Asset>,
) -> Result<Json<Asset>, ApiError>
where
  S: AssetStore,
{
  tracing::info!(id = %asset.id, source = %asset.source, "creating asset");
  let created = store.create_asset(asset).await.map_err(ApiError::store)?;
  Ok(Json(created))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /asset/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Asset>, ApiError>
where
  S: AssetStore,
{
  let asset = store
    .read_asset_by_id(&id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("asset {id} not found")))?;
  Ok(Json(asset))
}

// ─── Update source ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateSourceBody {
  pub source: String,
}

/// `PUT /asset/{id}`, body: `{"source":"twitter"}`
pub async fn update_source<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateSourceBody>,
) -> Result<Json<Message>, ApiError>
where
  S: AssetStore,
{
  tracing::info!(%id, source = %body.source, "updating asset source");
  store
    .update_source_by_id(&id, &body.source)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Message { message: "asset source updated".to_owned() }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /asset/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Message>, ApiError>
where
  S: AssetStore,
{
  store.delete_asset_by_id(&id).await.map_err(ApiError::store)?;
  Ok(Json(Message { message: "asset deleted".to_owned() }))
}
