use log::LevelFilter;
use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};


/// Runtime settings for the particle library. Every key has a default, so an
/// empty file (or no file at all) is a valid config.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
  /// Only show info logs by default. Can be any of `off`, `error`, `warn`,
  /// `info`, `debug` or `trace`.
  pub log_level: String,

  /// If set, particles are shown through the host's public `spawnParticle`
  /// api instead of through constructed packets. This ignores offsets, speed
  /// and particle data, so it should only be used if packets cannot be built
  /// on this host.
  ///
  /// Compiling with the `api` feature makes this default to true.
  pub use_api: bool,

  /// If set, packets are marked as long distance, so clients render them up
  /// to 65,000 blocks away instead of 256.
  pub long_distance: bool,

  /// Settings for the pool that sends packets to players.
  pub pool: PoolConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
  /// The number of worker threads. If this is 0, one worker is created for
  /// every logical core.
  pub workers: u32,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      log_level:     "info".into(),
      use_api:       cfg!(feature = "api"),
      long_distance: true,
      pool:          PoolConfig::default(),
    }
  }
}

impl Default for PoolConfig {
  fn default() -> Self { PoolConfig { workers: 0 } }
}

impl Config {
  /// Parses the given toml source. Any missing keys will use their default
  /// value.
  pub fn from_src(src: &str) -> Result<Self, toml::de::Error> { toml::from_str(src) }

  /// Loads the config at the given path. If the file cannot be read or is
  /// invalid, an error is logged, and the default config is returned.
  pub fn load(path: impl AsRef<Path>) -> Self {
    let path = path.as_ref();
    let src = match fs::read_to_string(path) {
      Ok(src) => src,
      Err(e) => {
        error!("error loading config at `{}`: {}", path.display(), e);
        return Config::default();
      }
    };
    Config::from_src(&src).unwrap_or_else(|e| {
      error!("error parsing config at `{}`: {}", path.display(), e);
      Config::default()
    })
  }

  /// Returns the parsed log level. An invalid level logs a warning and falls
  /// back to `info`.
  pub fn level(&self) -> LevelFilter {
    LevelFilter::from_str(&self.log_level).unwrap_or_else(|_| {
      warn!("invalid log level `{}`, expected one of off, error, warn, info, debug, trace", self.log_level);
      LevelFilter::Info
    })
  }

  /// Returns the number of send workers to spawn.
  pub fn workers(&self) -> u32 {
    if self.pool.workers == 0 {
      num_cpus::get() as u32
    } else {
      self.pool.workers
    }
  }
}
