//! SQLite backend for the zero-downtime asset store.
//!
//! Connections come from a [`deadpool_sqlite`] pool and run their statements
//! on blocking threads, off the async runtime. The five stages of
//! the `source` → `sources` migration live in [`stages`]; [`StagedStore`]
//! picks one at startup.

mod schema;
mod source;
mod staged;
mod transaction;

pub mod error;
pub mod pool;
pub mod stages;

pub use error::{Error, Result};
pub use pool::{Pool, PoolConfig};
pub use source::ensure_source_exists;
pub use staged::StagedStore;
pub use stages::{StageV1, StageV2, StageV3, StageV4, StageV5};
