use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use std::{fmt, num::ParseIntError, str::FromStr};
use thiserror::Error;

/// A host version. The leading `1.` of every Minecraft release is dropped, so
/// `1.19.4` is stored as major 19, minor 4. This is the only version value
/// used for gating anything, and it is detected once when the library starts.
///
/// Ordering is by major, then minor, so `20.10` is correctly newer than
/// `20.2`. [`as_f64`](Self::as_f64) gives the decimal form (`19.4`) for
/// logging and for comparing against old-style configs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
  maj: u32,
  min: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VersionError {
  #[error("version string `{0}` does not start with `1.`")]
  MissingPrefix(String),
  #[error("version string `{0}` has no major number")]
  MissingMajor(String),
  #[error("invalid number in version string `{0}`: {1}")]
  InvalidNumber(String, ParseIntError),
  #[error("craftbukkit package `{0}` has no version segment")]
  InvalidPackage(String),
}

impl Version {
  pub const V1_8: Version = Version::new(8, 0);
  pub const V1_9: Version = Version::new(9, 0);
  pub const V1_10: Version = Version::new(10, 0);
  pub const V1_11: Version = Version::new(11, 0);
  pub const V1_13: Version = Version::new(13, 0);
  pub const V1_14: Version = Version::new(14, 0);
  pub const V1_15: Version = Version::new(15, 0);
  pub const V1_16: Version = Version::new(16, 0);
  pub const V1_17: Version = Version::new(17, 0);
  pub const V1_18: Version = Version::new(18, 0);
  pub const V1_19: Version = Version::new(19, 0);
  pub const V1_19_3: Version = Version::new(19, 3);
  pub const V1_20: Version = Version::new(20, 0);
  pub const V1_20_2: Version = Version::new(20, 2);
  pub const V1_20_3: Version = Version::new(20, 3);
  pub const V1_20_5: Version = Version::new(20, 5);

  /// Creates a version for `1.maj.min`.
  pub const fn new(maj: u32, min: u32) -> Self { Version { maj, min } }

  /// Returns the major version. This is `19` for `1.19.4`.
  pub fn maj(&self) -> u32 { self.maj }
  /// Returns the minor version. This is `4` for `1.19.4`, and `0` for `1.8`.
  pub fn min(&self) -> u32 { self.min }

  /// Returns this version as a decimal, so `1.19.4` becomes `19.4`. Minor
  /// versions of 10 or more do not survive this conversion, so this should
  /// only be used for display.
  pub fn as_f64(&self) -> f64 {
    let digits = if self.min == 0 { 1 } else { self.min.to_string().len() as i32 };
    self.maj as f64 + self.min as f64 / 10f64.powi(digits)
  }

  /// Parses the version string advertised by the host (`Bukkit.getBukkitVersion()`).
  /// This looks something like `1.19.4-R0.1-SNAPSHOT` or `1.8-R0.1-SNAPSHOT`.
  /// Anything after the first `-` is ignored, and a missing patch number is
  /// treated as `0`.
  ///
  /// ```
  /// # use pl_common::Version;
  /// assert_eq!(Version::parse_bukkit("1.19.4-R0.1-SNAPSHOT").unwrap(), Version::new(19, 4));
  /// assert_eq!(Version::parse_bukkit("1.8-R0.1-SNAPSHOT").unwrap(), Version::new(8, 0));
  /// ```
  pub fn parse_bukkit(s: &str) -> Result<Self, VersionError> {
    let release = s.split('-').next().unwrap_or("").trim();
    let rest = release.strip_prefix("1.").ok_or_else(|| VersionError::MissingPrefix(s.into()))?;
    let mut sections = rest.split('.');
    let maj = match sections.next() {
      Some(v) if !v.is_empty() => v,
      _ => return Err(VersionError::MissingMajor(s.into())),
    };
    let maj = maj.parse().map_err(|e| VersionError::InvalidNumber(s.into(), e))?;
    let min = match sections.next() {
      Some(v) => v.parse().map_err(|e| VersionError::InvalidNumber(s.into(), e))?,
      None => 0,
    };
    Ok(Version { maj, min })
  }

  /// Parses a decimal version such as `19.3` or `8`. This is the format used
  /// in the mapping table.
  pub fn parse_decimal(s: &str) -> Result<Self, VersionError> {
    let mut sections = s.trim().split('.');
    let maj = match sections.next() {
      Some(v) if !v.is_empty() => v,
      _ => return Err(VersionError::MissingMajor(s.into())),
    };
    let maj = maj.parse().map_err(|e| VersionError::InvalidNumber(s.into(), e))?;
    let min = match sections.next() {
      Some(v) => v.parse().map_err(|e| VersionError::InvalidNumber(s.into(), e))?,
      None => 0,
    };
    Ok(Version { maj, min })
  }

  /// Returns the nms package version from a craftbukkit package name. For
  /// `org.bukkit.craftbukkit.v1_19_R3`, this returns `v1_19_R3`.
  pub fn nms_package(craftbukkit: &str) -> Result<&str, VersionError> {
    match craftbukkit.rsplit('.').next() {
      Some(v) if v.starts_with('v') => Ok(v),
      _ => Err(VersionError::InvalidPackage(craftbukkit.into())),
    }
  }
}

impl FromStr for Version {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Version::parse_decimal(s) }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.min == 0 {
      write!(f, "1.{}", self.maj)
    } else {
      write!(f, "1.{}.{}", self.maj, self.min)
    }
  }
}

struct VersionVisitor;

impl<'de> Visitor<'de> for VersionVisitor {
  type Value = Version;

  fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
    formatter.write_str("a decimal version, such as 19.3")
  }

  fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
    let maj = u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))?;
    Ok(Version::new(maj, 0))
  }
  fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
    let maj = u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))?;
    Ok(Version::new(maj, 0))
  }
  fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
    // `19.3` formats back to "19.3", which keeps the minor version intact.
    Version::parse_decimal(&v.to_string()).map_err(|_| E::invalid_value(Unexpected::Float(v), &self))
  }
  fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
    Version::parse_decimal(v).map_err(|_| E::invalid_value(Unexpected::Str(v), &self))
  }
}

impl<'de> Deserialize<'de> for Version {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    deserializer.deserialize_any(VersionVisitor)
  }
}
