//! JSON REST API for the asset store.
//!
//! Exposes an axum [`Router`] backed by any [`zdd_core::store::AssetStore`].
//! The same routes are served whichever stage the store is at.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", zdd_api::api_router(store.clone()))
//! ```

pub mod assets;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use zdd_core::store::AssetStore;

pub use error::ApiError;

/// Build the asset API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AssetStore + 'static,
{
  Router::new()
    .route("/asset", post(assets::create::<S>))
    .route(
      "/asset/{id}",
      get(assets::get_one::<S>)
        .put(assets::update_source::<S>)
        .delete(assets::delete_one::<S>),
    )
    .with_state(store)
}
