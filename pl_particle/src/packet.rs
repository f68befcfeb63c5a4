use crate::{
  data::{BlockTexture, ParticleData},
  effect::{Effect, Property},
  host::{Material, Value},
  Runtime,
};
use pl_common::{math::Location, Version};

/// A particle packet, ready to be sent to players. This wraps the host's
/// packet object, which can't be modified once it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet(Value);

impl Packet {
  pub fn value(&self) -> &Value { &self.0 }
  pub fn into_value(self) -> Value { self.0 }
}

/// Everything needed to build a particle packet, apart from the location.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticlePacket {
  effect: Effect,
  offset: [f32; 3],
  speed:  f32,
  amount: i32,
  data:   Option<ParticleData>,
}

impl ParticlePacket {
  /// Creates a particle packet description. Barriers and lights stopped being
  /// separate particles after 1.17, so on those versions they are replaced
  /// with a block marker showing the same block.
  pub fn new(
    effect: Effect,
    offset: [f32; 3],
    speed: f32,
    amount: i32,
    data: Option<ParticleData>,
    ver: Version,
  ) -> Self {
    if ver > Version::V1_17 {
      let material = match effect {
        Effect::Barrier => Some(Material::barrier()),
        Effect::Light => Some(Material::light()),
        _ => None,
      };
      if let Some(material) = material {
        return ParticlePacket {
          effect: Effect::BlockMarker,
          offset,
          speed,
          amount,
          data: Some(BlockTexture::new(material).into()),
        };
      }
    }
    ParticlePacket { effect, offset, speed, amount, data }
  }

  pub fn effect(&self) -> Effect { self.effect }
  pub fn data(&self) -> Option<&ParticleData> { self.data.as_ref() }

  /// Builds the host packet at the given location. This returns `None` if the
  /// effect does not exist in this version, if the data doesn't fit the
  /// effect, or if anything fails on the host.
  pub fn create(&self, loc: &Location, rt: &Runtime) -> Option<Packet> {
    let ver = rt.version();
    let effect = self.effect;
    effect.field_name(ver)?;

    let data = match &self.data {
      Some(data) => data,
      None => {
        if effect.has_property(Property::RequiresBlock) || effect.has_property(Property::RequiresItem) {
          return None;
        }
        return self.build(rt, rt.native_handle(effect)?, loc, self.offset, self.speed, self.amount, Value::empty());
      }
    };
    if data.bound_effect(effect) != effect {
      return None;
    }
    let param = data.materialize(effect, rt)?;

    let generic = match data {
      ParticleData::Dust(_) | ParticleData::DustColorTransition(_) => ver >= Version::V1_13,
      ParticleData::Vibration(_) => ver >= Version::V1_17,
      ParticleData::SculkCharge(_) | ParticleData::Shriek(_) => ver >= Version::V1_19,
      ParticleData::PlainColor(_) => ver >= Version::V1_17 && effect.has_property(Property::Dust),
      _ => false,
    };
    if generic {
      return self.build(rt, param, loc, self.offset, self.speed, self.amount, Value::empty());
    }
    match data {
      ParticleData::BlockTexture(_) if effect.has_property(Property::RequiresBlock) => {
        self.textured(rt, param, loc)
      }
      ParticleData::ItemTexture(_) if effect.has_property(Property::RequiresItem) => {
        self.textured(rt, param, loc)
      }
      _ if effect.has_property(Property::Colorable) => self.colored(rt, data, param, loc),
      _ => None,
    }
  }

  /// Before 1.13, textures are sent as the effect's enum constant, with the
  /// texture in the data array. After, the texture is part of the parameter.
  fn textured(&self, rt: &Runtime, param: Value, loc: &Location) -> Option<Packet> {
    if rt.version() < Version::V1_13 {
      let handle = rt.native_handle(self.effect)?;
      self.build(rt, handle, loc, self.offset, self.speed, self.amount, param)
    } else {
      self.build(rt, param, loc, self.offset, self.speed, self.amount, Value::empty())
    }
  }

  /// Colors are sent through the offsets, apart from redstone on 1.13+,
  /// which has its own parameter.
  fn colored(&self, rt: &Runtime, data: &ParticleData, param: Value, loc: &Location) -> Option<Packet> {
    let effect = self.effect;
    if let ParticleData::NoteColor(note) = data {
      let handle = rt.native_handle(effect)?;
      return self.build(rt, handle, loc, [note.red(), 0.0, 0.0], self.speed, self.amount, Value::empty());
    }
    let color = data.color()?;
    if rt.version() < Version::V1_13 || effect != Effect::Redstone {
      // The client treats a red of 0 as 1 for redstone.
      let red = if effect == Effect::Redstone && color.color.r == 0 {
        f32::MIN_POSITIVE
      } else {
        color.red()
      };
      let handle = rt.native_handle(effect)?;
      self.build(rt, handle, loc, [red, color.green(), color.blue()], 1.0, 0, Value::empty())
    } else {
      self.build(rt, param, loc, self.offset, self.speed, self.amount, Value::empty())
    }
  }

  /// Calls the packet constructor. The constructor changed twice: before
  /// 1.13 it takes the legacy data array, and from 1.15 the position is sent
  /// as doubles instead of floats.
  #[allow(clippy::too_many_arguments)]
  fn build(
    &self,
    rt: &Runtime,
    param: Value,
    loc: &Location,
    offset: [f32; 3],
    speed: f32,
    amount: i32,
    data: Value,
  ) -> Option<Packet> {
    let ver = rt.version();
    let ctor = rt.symbols().packet_ctor.as_ref()?;
    // Every version takes an object here, so an empty marker means there is
    // nothing to send.
    param.as_object()?;

    let mut args = Vec::with_capacity(11);
    args.push(param);
    args.push(Value::Bool(rt.long_distance()));
    if ver < Version::V1_15 {
      args.extend([loc.x, loc.y, loc.z].map(|v| Value::Float(v as f32)));
    } else {
      args.extend([loc.x, loc.y, loc.z].map(Value::Double));
    }
    args.extend(offset.map(Value::Float));
    args.push(Value::Float(speed));
    args.push(Value::Int(amount));
    if ver < Version::V1_13 {
      args.push(data);
    }
    rt.intro().construct(ctor, &args).map(Packet)
  }
}
