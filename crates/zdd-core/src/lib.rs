//! Core types and trait definitions for the zero-downtime asset store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::AssetStore`]; the HTTP layer and the
//! server binary depend only on that abstraction.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod asset;
pub mod error;
pub mod stage;
pub mod store;

pub use asset::Asset;
pub use error::{Classify, Error, ErrorKind, Result};
pub use stage::Stage;
