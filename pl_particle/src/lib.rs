//! Displays particles on a host server, across every version from 1.8 to
//! 1.20.4.
//!
//! The host's internal particle packet has changed shape many times. This
//! library finds all of the host's internals by name at startup (through the
//! [mapping table](mappings)), and then builds the right packet for the
//! detected version whenever a particle is displayed.
//!
//! Everything starts with a [`ParticleLib`], which is created once from the
//! host's [`Reflector`] and [`Server`]:
//!
//! ```ignore
//! let lib = ParticleLib::new(reflector, server, &Config::default())?;
//! lib
//!   .builder(Effect::Redstone)
//!   .location(Location::new("world", 0.5, 65.0, 0.5))
//!   .color(Color::new(255, 0, 0))
//!   .display()?;
//! ```

#[macro_use]
extern crate log;

pub mod builder;
pub mod data;
pub mod display;
pub mod effect;
pub mod host;
pub mod mappings;
pub mod packet;
mod runtime;


pub use builder::{BuildError, ParticleBuilder};
pub use effect::{Effect, Property};
pub use runtime::Runtime;

use display::Delivery;
use host::{Introspect, Reflector, Server};
use mappings::{MappingError, Mappings, MAPPINGS_JSON};
use pl_common::{config::Config, util::ThreadPool, version::VersionError, Version};
use std::{fmt, sync::Arc};
use thiserror::Error;

/// An error while starting the library. After startup, the only error that
/// can be returned is [`BuildError`].
#[derive(Error, Debug)]
pub enum InitError {
  #[error("could not detect host version: {0}")]
  Version(#[from] VersionError),
  #[error(transparent)]
  Mapping(#[from] MappingError),
}

/// The particle library. This holds the detected version, all of the
/// resolved host symbols, and the pool used to send packets.
pub struct ParticleLib {
  rt:       Arc<Runtime>,
  delivery: Delivery,
}

impl fmt::Debug for ParticleLib {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ParticleLib")
      .field("version", &self.rt.version())
      .field("use_api", &self.delivery.use_api())
      .finish()
  }
}

impl ParticleLib {
  /// Starts the library with the mapping table that ships with it.
  pub fn new(
    reflector: Arc<dyn Reflector>,
    server: Arc<dyn Server>,
    config: &Config,
  ) -> Result<Self, InitError> {
    ParticleLib::with_mappings(reflector, server, config, MAPPINGS_JSON)
  }

  /// Starts the library with a custom mapping table. This detects the host
  /// version, and then resolves every symbol the library needs. Symbols that
  /// cannot be found are logged, and anything that needs them will simply
  /// not be displayed.
  pub fn with_mappings(
    reflector: Arc<dyn Reflector>,
    server: Arc<dyn Server>,
    config: &Config,
    mappings: &str,
  ) -> Result<Self, InitError> {
    let ver = Version::parse_bukkit(&server.bukkit_version())?;
    let package = server.craftbukkit_package();
    let nms_version = Version::nms_package(&package)?;
    info!("detected host version {ver} ({nms_version})");

    let mappings = Mappings::load(mappings, ver)?;
    info!("selected {} mappings for {ver}", mappings.len());

    let intro = Introspect::new(reflector, ver, &package, nms_version);
    let rt = Arc::new(Runtime::new(intro, mappings, ver, config.long_distance));
    let pool = ThreadPool::new_unbounded("particle-send", config.workers());
    if config.use_api {
      info!("sending particles through the host api");
    }
    Ok(ParticleLib { rt, delivery: Delivery::new(server, pool, config.use_api) })
  }

  pub fn version(&self) -> Version { self.rt.version() }
  pub fn runtime(&self) -> &Arc<Runtime> { &self.rt }
  pub fn delivery(&self) -> &Delivery { &self.delivery }

  /// Starts building a particle with the given effect.
  pub fn builder(&self, effect: Effect) -> ParticleBuilder<'_> { ParticleBuilder::new(self, effect) }

  /// Blocks until every queued packet has been sent.
  pub fn wait(&self) { self.delivery.wait() }
}
