//! The five stages of moving `assets.source` into a `sources` table.
//!
//! Each stage wraps the previous one and overrides only the operations whose
//! SQL has to change; everything else is forwarded to `prev`. Reading the
//! stages in order gives the exact changelist between two deployments.
//!
//! | Stage | Overrides |
//! |-------|-----------|
//! | [`StageV1`] | everything (baseline) |
//! | [`StageV2`] | `migrate`, `create_asset`, `update_source_by_id` |
//! | [`StageV3`] | `migrate`, `read_asset_by_id` |
//! | [`StageV4`] | `migrate`, `create_asset`, `update_source_by_id` |
//! | [`StageV5`] | `migrate` |

mod v1;
mod v2;
mod v3;
mod v4;
mod v5;

pub use v1::StageV1;
pub use v2::StageV2;
pub use v3::StageV3;
pub use v4::StageV4;
pub use v5::StageV5;
