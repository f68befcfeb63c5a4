use crate::{
  effect::Effect,
  host::{Entity, Value},
  Runtime,
};
use pl_common::{math::Location, Version};

/// Where a vibration travels to.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
  /// The block this location is inside of.
  Block(Location),
  Entity(Entity),
}

/// A vibration moving towards a block or an entity. Vibrations were added in
/// 1.17. The start is only used before 1.19, as newer clients start the
/// vibration at the packet's location.
#[derive(Debug, Clone, PartialEq)]
pub struct Vibration {
  pub start:       Option<Location>,
  pub destination: Destination,
  /// How long it takes the vibration to reach the destination.
  pub ticks:       i32,
}

impl Vibration {
  pub fn to_block(destination: Location, ticks: i32) -> Self {
    Vibration { start: None, destination: Destination::Block(destination), ticks }
  }
  pub fn to_entity(destination: Entity, ticks: i32) -> Self {
    Vibration { start: None, destination: Destination::Entity(destination), ticks }
  }
  pub fn between_blocks(start: Location, destination: Location, ticks: i32) -> Self {
    Vibration { start: Some(start), destination: Destination::Block(destination), ticks }
  }
  pub fn from_block_to_entity(start: Location, destination: Entity, ticks: i32) -> Self {
    Vibration { start: Some(start), destination: Destination::Entity(destination), ticks }
  }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    let ver = rt.version();
    if ver < Version::V1_17 || effect != Effect::Vibration {
      return None;
    }
    let intro = rt.intro();
    let sym = rt.symbols();
    let block_source = |loc: &Location| {
      let pos = rt.block_position(loc)?;
      intro.construct(sym.block_position_source_ctor.as_ref()?, &[pos])
    };
    if ver < Version::V1_19 {
      let source = match &self.destination {
        Destination::Block(loc) => block_source(loc)?,
        Destination::Entity(entity) => {
          intro.construct(sym.entity_position_source_ctor.as_ref()?, &[Value::Int(entity.id)])?
        }
      };
      let start = self.start.as_ref().and_then(|loc| rt.block_position(loc)).unwrap_or(Value::Null);
      let path = intro.construct(
        sym.vibration_path_ctor.as_ref()?,
        &[start, source, Value::Int(self.ticks)],
      )?;
      intro.construct(sym.param_vibration_ctor.as_ref()?, &[path])
    } else {
      let source = match &self.destination {
        Destination::Block(loc) => block_source(loc)?,
        Destination::Entity(entity) => {
          let handle = rt.entity_handle(entity)?;
          intro.construct(
            sym.entity_position_source_ctor.as_ref()?,
            &[handle, Value::Float(0.0)],
          )?
        }
      };
      intro.construct(sym.param_vibration_ctor.as_ref()?, &[source, Value::Int(self.ticks)])
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::fake::{self, Instance};
  use pretty_assertions::assert_eq;

  fn dest() -> Location { Location::new("world", 3.5, 64.0, -2.5) }

  #[test]
  fn before_17() {
    let (host, rt) = fake::runtime(Version::new(16, 5));
    let before = host.calls();
    let v = Vibration::to_block(dest(), 20);
    assert_eq!(v.materialize(Effect::Vibration, &rt), None);
    assert_eq!(host.calls(), before);
  }

  #[test]
  fn wrong_effect() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    assert_eq!(Vibration::to_block(dest(), 20).materialize(Effect::Flame, &rt), None);
  }

  #[test]
  fn path() {
    let (_, rt) = fake::runtime(Version::new(18, 2));
    let v = Vibration::between_blocks(Location::new("world", 0.0, 60.0, 0.0), dest(), 20);
    let param = v.materialize(Effect::Vibration, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "VibrationParticleOption");
    let path = Instance::of(&param.args[0]);
    assert_eq!(path.kind, "VibrationPath");
    assert_eq!(
      Instance::of(&path.args[0]),
      &Instance::new("BlockPosition", vec![Value::Double(0.0), Value::Double(60.0), Value::Double(0.0)])
    );
    let source = Instance::of(&path.args[1]);
    assert_eq!(source.kind, "BlockPositionSource");
    assert_eq!(
      Instance::of(&source.args[0]),
      &Instance::new("BlockPosition", vec![Value::Double(3.0), Value::Double(64.0), Value::Double(-3.0)])
    );
    assert_eq!(path.args[2], Value::Int(20));

    // No start is passed as null
    let param = Vibration::to_entity(fake::entity(&rt, 42), 10).materialize(Effect::Vibration, &rt).unwrap();
    let path = Instance::of(&Instance::of(&param).args[0]);
    assert_eq!(path.args[0], Value::Null);
    assert_eq!(Instance::of(&path.args[1]), &Instance::new("EntityPositionSource", vec![Value::Int(42)]));
  }

  #[test]
  fn source() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    let v = Vibration::from_block_to_entity(dest(), fake::entity(&rt, 42), 40);
    let param = v.materialize(Effect::Vibration, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.args.len(), 2);
    assert_eq!(param.args[1], Value::Int(40));
    let source = Instance::of(&param.args[0]);
    assert_eq!(source.kind, "EntityPositionSource");
    assert_eq!(Instance::of(&source.args[0]).kind, "Entity");
    assert_eq!(source.args[1], Value::Float(0.0));
  }

  #[test]
  fn foreign_entity() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    let entity = Entity { id: 7, handle: crate::host::Object::new("com.example.NotAnEntity", ()) };
    assert_eq!(Vibration::to_entity(entity, 40).materialize(Effect::Vibration, &rt), None);
  }
}
