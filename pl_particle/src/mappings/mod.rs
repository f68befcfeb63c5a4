//! The mapping table. The host renames its internals in almost every release,
//! so instead of hard coding names, every class, method and field is looked
//! up through a symbolic name. The table in `resources/mappings.json` says
//! which concrete name each symbolic name has in each version window.
//!
//! Loading is done in two steps. [`Mappings`] selects one concrete name per
//! symbolic name for the detected version, and [`Symbols`] resolves all of
//! those names into host handles.

mod symbols;
mod versioned;

pub use symbols::Symbols;
pub use versioned::Versioned;

use pl_common::Version;
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// The mapping table that ships with this library.
pub const MAPPINGS_JSON: &str = include_str!("../../resources/mappings.json");

#[derive(Error, Debug)]
pub enum MappingError {
  #[error("invalid mapping table: {0}")]
  Json(#[from] serde_json::Error),
}

/// One entry in the mapping table: the rename history of a single symbolic
/// name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MappingEntry {
  pub name:     String,
  pub min:      Version,
  pub max:      Version,
  pub mappings: Vec<Mapping>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Mapping {
  pub from:  Version,
  pub value: String,
}

impl MappingEntry {
  /// Returns the concrete name for the given version. This is `None` if the
  /// version is outside of `min..=max`, or if no mapping starts at or before
  /// the version.
  pub fn select(&self, ver: Version) -> Option<&str> {
    if ver < self.min || ver > self.max {
      return None;
    }
    self
      .mappings
      .iter()
      .filter(|m| m.from <= ver)
      .max_by_key(|m| m.from)
      .map(|m| m.value.as_str())
  }
}

/// The concrete names selected for the detected version. This is built once
/// at startup, and never changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mappings {
  names: HashMap<String, String>,
}

impl Mappings {
  /// Parses a mapping table without selecting anything.
  pub fn parse(src: &str) -> Result<Vec<MappingEntry>, MappingError> {
    Ok(serde_json::from_str(src)?)
  }

  /// Parses the mapping table in `src`, and selects a name for every entry
  /// that covers `ver`.
  pub fn load(src: &str, ver: Version) -> Result<Mappings, MappingError> {
    Ok(Mappings::from_entries(&Mappings::parse(src)?, ver))
  }

  /// Loads the mapping table that ships with this library.
  pub fn embedded(ver: Version) -> Result<Mappings, MappingError> {
    Mappings::load(MAPPINGS_JSON, ver)
  }

  pub fn from_entries(entries: &[MappingEntry], ver: Version) -> Mappings {
    let mut names = HashMap::with_capacity(entries.len());
    for entry in entries {
      match entry.select(ver) {
        Some(value) => {
          names.insert(entry.name.clone(), value.to_string());
        }
        None => debug!("no mapping for {} in {ver}", entry.name),
      }
    }
    Mappings { names }
  }

  /// Returns the concrete name for the given symbolic name.
  pub fn get(&self, name: &str) -> Option<&str> { self.names.get(name).map(|s| s.as_str()) }

  pub fn len(&self) -> usize { self.names.len() }
  pub fn is_empty(&self) -> bool { self.names.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  const SRC: &str = r#"[
    {"name": "Block", "min": 8, "max": 20.4, "mappings": [
      {"from": 8, "value": "Block"},
      {"from": 17, "value": "world.level.block.Block"},
      {"from": 19.3, "value": "b"}
    ]},
    {"name": "EnumParticle", "min": 8, "max": 12.2, "mappings": [
      {"from": 8, "value": "EnumParticle"}
    ]}
  ]"#;

  #[test]
  fn select() {
    let entries = Mappings::parse(SRC).unwrap();
    let block = &entries[0];
    assert_eq!(block.min, Version::V1_8);
    assert_eq!(block.max, Version::new(20, 4));
    assert_eq!(block.select(Version::new(8, 8)), Some("Block"));
    assert_eq!(block.select(Version::new(16, 5)), Some("Block"));
    assert_eq!(block.select(Version::new(17, 0)), Some("world.level.block.Block"));
    assert_eq!(block.select(Version::new(19, 2)), Some("world.level.block.Block"));
    assert_eq!(block.select(Version::new(19, 3)), Some("b"));
    assert_eq!(block.select(Version::new(20, 4)), Some("b"));
    assert_eq!(block.select(Version::new(20, 5)), None);
    assert_eq!(block.select(Version::new(7, 10)), None);
  }

  #[test]
  fn load() {
    let m = Mappings::load(SRC, Version::new(12, 2)).unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("EnumParticle"), Some("EnumParticle"));
    let m = Mappings::load(SRC, Version::new(13, 0)).unwrap();
    assert_eq!(m.len(), 1);
    assert_eq!(m.get("EnumParticle"), None);
    let m = Mappings::load(SRC, Version::new(21, 0)).unwrap();
    assert!(m.is_empty());
  }

  #[test]
  fn invalid() {
    assert!(matches!(Mappings::load("{", Version::V1_8), Err(MappingError::Json(_))));
    assert!(Mappings::load(r#"[{"name": "A"}]"#, Version::V1_8).is_err());
  }

  #[test]
  fn embedded() {
    let m = Mappings::embedded(Version::new(19, 4)).unwrap();
    assert_eq!(m.get("Block"), Some("world.level.block.Block"));
    assert_eq!(m.get("BuiltInRegistries"), Some("core.registries.BuiltInRegistries"));
    assert_eq!(m.get("EntityPlayer.playerConnection"), Some("b"));
    assert_eq!(m.get("VibrationPath"), None);
    let m = Mappings::embedded(Version::new(8, 8)).unwrap();
    assert_eq!(m.get("EnumParticle"), Some("EnumParticle"));
    assert_eq!(m.get("EntityPlayer.playerConnection"), Some("playerConnection"));
    let m = Mappings::embedded(Version::new(20, 2)).unwrap();
    assert_eq!(m.get("PlayerConnection.sendPacket"), Some("b"));
    assert_eq!(m.get("ServerCommonPacketListenerImpl"), Some("server.network.ServerCommonPacketListenerImpl"));
  }
}
