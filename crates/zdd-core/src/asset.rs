//! Asset, the single logical entity served by every stage.
//!
//! The physical representation of `source` changes from stage to stage; this
//! type is what callers always see: the source as its human-readable name.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
  /// Caller-supplied, unique, never empty.
  pub id:     String,
  pub name:   String,
  /// Source name, e.g. `"rss"` or `"twitter"`.
  pub source: String,
}

impl Asset {
  pub fn new(
    id: impl Into<String>,
    name: impl Into<String>,
    source: impl Into<String>,
  ) -> Self {
    Self { id: id.into(), name: name.into(), source: source.into() }
  }

  /// Reject assets no stage is allowed to persist.
  pub fn validate(&self) -> Result<()> {
    if self.id.trim().is_empty() {
      return Err(Error::InvalidAsset("id must not be empty".into()));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_id_is_rejected() {
    assert!(Asset::new("", "Doc A", "rss").validate().is_err());
    assert!(Asset::new("   ", "Doc A", "rss").validate().is_err());
    assert!(Asset::new("a1", "Doc A", "rss").validate().is_ok());
  }

  #[test]
  fn json_shape_matches_the_wire_format() {
    let asset = Asset::new("a1", "Doc A", "rss");
    let json = serde_json::to_value(&asset).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "id": "a1", "name": "Doc A", "source": "rss" })
    );
  }
}
