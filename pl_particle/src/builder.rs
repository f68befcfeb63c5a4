use crate::{
  data::{ParticleData, PlainColor},
  effect::{Effect, Property},
  host::Player,
  packet::{Packet, ParticlePacket},
  ParticleLib,
};
use pl_common::{
  math::{Location, Vector},
  Color,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
  #[error("missing location of particle")]
  MissingLocation,
}

/// Builds a single particle display. All the setters consume the builder, so
/// they can be chained:
///
/// ```ignore
/// lib
///   .builder(Effect::Flame)
///   .location(Location::new("world", 0.0, 64.0, 0.0))
///   .offset(0.5, 0.5, 0.5)
///   .amount(10)
///   .display()?;
/// ```
///
/// Nothing is sent to the host until `to_packet` or one of the `display`
/// functions are called.
#[derive(Clone)]
pub struct ParticleBuilder<'a> {
  lib:      &'a ParticleLib,
  effect:   Effect,
  location: Option<Location>,
  offset:   [f32; 3],
  speed:    f32,
  amount:   u32,
  data:     Option<ParticleData>,
}

impl<'a> ParticleBuilder<'a> {
  pub fn new(lib: &'a ParticleLib, effect: Effect) -> Self {
    ParticleBuilder {
      lib,
      effect,
      location: None,
      offset: [0.0; 3],
      speed: 1.0,
      amount: 0,
      data: None,
    }
  }

  pub fn particle(mut self, effect: Effect) -> Self {
    self.effect = effect;
    self
  }
  pub fn location(mut self, location: Location) -> Self {
    self.location = Some(location);
    self
  }
  pub fn offset_x(mut self, x: f32) -> Self {
    self.offset[0] = x;
    self
  }
  pub fn offset_y(mut self, y: f32) -> Self {
    self.offset[1] = y;
    self
  }
  pub fn offset_z(mut self, z: f32) -> Self {
    self.offset[2] = z;
    self
  }
  pub fn offset(mut self, x: f32, y: f32, z: f32) -> Self {
    self.offset = [x, y, z];
    self
  }
  pub fn offset_vector(self, offset: Vector) -> Self {
    self.offset(offset.x as f32, offset.y as f32, offset.z as f32)
  }
  pub fn speed(mut self, speed: f32) -> Self {
    self.speed = speed;
    self
  }
  /// Sets the number of particles. An amount of 0 means a single particle,
  /// where the offsets are used as data (a direction, color or size,
  /// depending on the effect).
  pub fn amount(mut self, amount: u32) -> Self {
    self.amount = amount;
    self
  }
  pub fn data(mut self, data: impl Into<ParticleData>) -> Self {
    self.data = Some(data.into());
    self
  }
  /// Shorthand for attaching a [`PlainColor`]. This does nothing if the
  /// current effect is not colorable.
  pub fn color(mut self, color: Color) -> Self {
    if self.effect.has_property(Property::Colorable) {
      self.data = Some(PlainColor::from(color).into());
    }
    self
  }

  pub fn effect(&self) -> Effect { self.effect }
  pub fn get_location(&self) -> Option<&Location> { self.location.as_ref() }
  pub fn get_offset(&self) -> [f32; 3] { self.offset }
  pub fn get_speed(&self) -> f32 { self.speed }
  pub fn get_amount(&self) -> u32 { self.amount }
  pub fn get_data(&self) -> Option<&ParticleData> { self.data.as_ref() }

  fn location_or_err(&self) -> Result<&Location, BuildError> {
    self.location.as_ref().ok_or(BuildError::MissingLocation)
  }

  fn amount_i32(&self) -> i32 { i32::try_from(self.amount).unwrap_or(i32::MAX) }

  /// Builds the host packet. This returns `Ok(None)` if the particle cannot
  /// be displayed in this version, or with this data.
  pub fn to_packet(&self) -> Result<Option<Packet>, BuildError> {
    let loc = self.location_or_err()?;
    let rt = self.lib.runtime();
    let packet = ParticlePacket::new(
      self.effect,
      self.offset,
      self.speed,
      self.amount_i32(),
      self.data.clone(),
      rt.version(),
    );
    Ok(packet.create(loc, rt))
  }

  /// Displays this particle to every online player in the location's world.
  pub fn display(&self) -> Result<(), BuildError> {
    self.location_or_err()?;
    let players = self.lib.delivery().server().online_players();
    self.display_all(players)
  }

  /// Displays this particle to the given players. Players in other worlds
  /// are skipped.
  pub fn display_to(&self, players: &[Player]) -> Result<(), BuildError> {
    self.display_all(players.iter().cloned())
  }

  /// Displays this particle to every online player that matches `filter`.
  pub fn display_filter(&self, filter: impl Fn(&Player) -> bool) -> Result<(), BuildError> {
    self.location_or_err()?;
    let players = self.lib.delivery().server().online_players();
    self.display_all(players.into_iter().filter(|p| filter(p)))
  }

  /// Displays this particle to any collection of players. Players in other
  /// worlds are skipped. If no players are left, nothing is built.
  pub fn display_all(&self, players: impl IntoIterator<Item = Player>) -> Result<(), BuildError> {
    let loc = self.location_or_err()?;
    let players: Vec<Player> = players.into_iter().filter(|p| loc.same_world(&p.world)).collect();
    if players.is_empty() {
      return Ok(());
    }
    let delivery = self.lib.delivery();
    let packet = if delivery.use_api() { None } else { self.to_packet()? };
    delivery.display(self.lib.runtime(), packet, self.effect, loc, self.amount_i32(), players);
    Ok(())
  }
}
