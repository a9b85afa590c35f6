//! The ordered chain of schema stages.
//!
//! | Stage | `assets` columns | Reads via | Writes |
//! |-------|------------------|-----------|--------|
//! | `v1` | id, name, source | `source` | `source` |
//! | `v2` | + source_id | `source` | `source` + `source_id` |
//! | `v3` | (backfilled) | `source_id` | `source` + `source_id` |
//! | `v4` | | `source_id` | `source_id` |
//! | `v5` | − source | `source_id` | `source_id` |
//!
//! Stages only ever advance. An operator moves a deployment forward by
//! restarting it with the next stage selected; `migrate` runs before traffic.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Stage {
  /// Baseline: free-text `source` column.
  V1,
  /// Expand: `source_id` column and `sources` table, dual-write.
  V2,
  /// Backfill `source_id`, read through the join.
  V3,
  /// Write `source_id` only.
  V4,
  /// Contract: drop the `source` column.
  V5,
}

impl Stage {
  pub const ALL: [Stage; 5] =
    [Stage::V1, Stage::V2, Stage::V3, Stage::V4, Stage::V5];

  pub fn number(self) -> u8 {
    match self {
      Stage::V1 => 1,
      Stage::V2 => 2,
      Stage::V3 => 3,
      Stage::V4 => 4,
      Stage::V5 => 5,
    }
  }

  pub fn next(self) -> Option<Stage> {
    Stage::ALL.get(usize::from(self.number())).copied()
  }

  /// Every stage from `V1` up to and including `self`, in order.
  pub fn up_to(self) -> impl Iterator<Item = Stage> {
    Stage::ALL.into_iter().take_while(move |s| *s <= self)
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "v{}", self.number())
  }
}

impl FromStr for Stage {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let digits = trimmed
      .strip_prefix('v')
      .or_else(|| trimmed.strip_prefix('V'))
      .unwrap_or(trimmed);
    match digits {
      "1" => Ok(Stage::V1),
      "2" => Ok(Stage::V2),
      "3" => Ok(Stage::V3),
      "4" => Ok(Stage::V4),
      "5" => Ok(Stage::V5),
      _ => Err(Error::UnknownStage(s.to_owned())),
    }
  }
}

impl TryFrom<String> for Stage {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Stage> for String {
  fn from(stage: Stage) -> Self { stage.to_string() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_prefixed_and_bare_identifiers() {
    assert_eq!("v1".parse::<Stage>().unwrap(), Stage::V1);
    assert_eq!("V3".parse::<Stage>().unwrap(), Stage::V3);
    assert_eq!("5".parse::<Stage>().unwrap(), Stage::V5);
    assert_eq!(" v4 ".parse::<Stage>().unwrap(), Stage::V4);
  }

  #[test]
  fn unknown_identifier_fails_with_description() {
    for bad in ["", "v0", "v6", "vv1", "latest"] {
      let err = bad.parse::<Stage>().unwrap_err();
      assert!(matches!(err, Error::UnknownStage(ref s) if s == bad));
      assert!(err.to_string().contains("expected one of"));
    }
  }

  #[test]
  fn display_round_trips_through_from_str() {
    for stage in Stage::ALL {
      assert_eq!(stage.to_string().parse::<Stage>().unwrap(), stage);
    }
  }

  #[test]
  fn chain_is_linear() {
    assert_eq!(Stage::V1.next(), Some(Stage::V2));
    assert_eq!(Stage::V4.next(), Some(Stage::V5));
    assert_eq!(Stage::V5.next(), None);
    assert_eq!(
      Stage::V3.up_to().collect::<Vec<_>>(),
      vec![Stage::V1, Stage::V2, Stage::V3]
    );
  }

  #[test]
  fn deserializes_from_config_strings() {
    let stage: Stage = serde_json::from_str("\"v2\"").unwrap();
    assert_eq!(stage, Stage::V2);
    assert!(serde_json::from_str::<Stage>("\"v9\"").is_err());
    assert_eq!(serde_json::to_string(&Stage::V5).unwrap(), "\"v5\"");
  }
}
