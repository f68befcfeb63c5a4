use crate::{
  effect::{Effect, Property},
  host::Value,
  Runtime,
};
use pl_common::{Color, Version};
use rand::Rng;

/// A plain RGB color. On old versions, and for most colorable effects, this
/// is sent through the offsets of the packet. For redstone (and the dust
/// color transition) on 1.13+, this is sent as a dust parameter with a size
/// of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlainColor {
  pub color: Color,
}

impl From<Color> for PlainColor {
  fn from(color: Color) -> Self { PlainColor { color } }
}

impl PlainColor {
  /// Creates a color, clamping each channel into `0..=255`.
  pub fn new(r: i32, g: i32, b: i32) -> Self { PlainColor { color: Color::clamped(r, g, b) } }

  /// A random color. See [`Color::random`].
  pub fn random(high_saturation: bool) -> Self { Color::random(high_saturation).into() }
  /// A fully saturated color with the given hue, in degrees.
  pub fn from_hsv_hue(hue: u32) -> Self { Color::from_hue(hue).into() }

  pub fn red(&self) -> f32 { self.color.red() }
  pub fn green(&self) -> f32 { self.color.green() }
  pub fn blue(&self) -> f32 { self.color.blue() }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    let ver = rt.version();
    if ver < Version::V1_13 || !matches!(effect, Effect::Redstone | Effect::DustColorTransition) {
      return Some(Value::empty());
    }
    dust_param(rt, effect, self.color, self.color, 1.0)
  }
}

/// A note color. Notes are sent as `note / 24` in the x offset, so this never
/// has a parameter object. Note data is always bound to [`Effect::Note`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteColor {
  note: u8,
}

impl NoteColor {
  pub const MAX: u8 = 24;

  /// Creates a note color, clamping the note into `0..=24`.
  pub fn new(note: i32) -> Self { NoteColor { note: note.clamp(0, NoteColor::MAX as i32) as u8 } }

  pub fn random() -> Self { NoteColor::new(rand::thread_rng().gen_range(0..=NoteColor::MAX as i32)) }

  pub fn note(&self) -> u8 { self.note }
  /// The value sent in the x offset.
  pub fn red(&self) -> f32 { self.note as f32 / NoteColor::MAX as f32 }

  pub(super) fn materialize(&self, _effect: Effect, _rt: &Runtime) -> Option<Value> {
    Some(Value::empty())
  }
}

/// A colored dust particle with a size. The size should be within `0..=4`,
/// but this is not enforced here, as the client clamps it anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dust {
  pub color: Color,
  pub size:  f32,
}

impl Dust {
  pub fn new(color: Color, size: f32) -> Self { Dust { color, size } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if rt.version() < Version::V1_13 || !effect.has_property(Property::Dust) {
      return Some(Value::empty());
    }
    dust_param(rt, effect, self.color, self.color, self.size)
  }
}

/// A dust particle that fades from one color to another. This only has a
/// transition on 1.17+, with [`Effect::DustColorTransition`]. With
/// [`Effect::Redstone`], only the start color is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustColorTransition {
  pub from: Color,
  pub to:   Color,
  pub size: f32,
}

impl DustColorTransition {
  pub fn new(from: Color, to: Color, size: f32) -> Self { DustColorTransition { from, to, size } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if rt.version() < Version::V1_13 || !effect.has_property(Property::Dust) {
      return Some(Value::empty());
    }
    dust_param(rt, effect, self.from, self.to, self.size)
  }
}

/// Builds a dust parameter. Before 1.17, only redstone dust exists, and it
/// takes four floats. After, redstone takes a vector and a size, and the
/// transition takes two vectors and a size.
fn dust_param(rt: &Runtime, effect: Effect, from: Color, to: Color, size: f32) -> Option<Value> {
  let intro = rt.intro();
  let sym = rt.symbols();
  if rt.version() < Version::V1_17 {
    if effect != Effect::Redstone {
      return None;
    }
    return intro.construct(
      sym.param_redstone_ctor.as_ref()?,
      &[Value::Float(from.red()), Value::Float(from.green()), Value::Float(from.blue()), Value::Float(size)],
    );
  }
  let start = rt.vector3(from.red(), from.green(), from.blue())?;
  if effect == Effect::Redstone {
    intro.construct(sym.param_redstone_ctor.as_ref()?, &[start, Value::Float(size)])
  } else {
    let end = rt.vector3(to.red(), to.green(), to.blue())?;
    intro.construct(sym.param_dust_transition_ctor.as_ref()?, &[start, end, Value::Float(size)])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::fake::{self, Instance};
  use pretty_assertions::assert_eq;

  #[test]
  fn clamping() {
    assert_eq!(PlainColor::new(300, -20, 40).color, Color::new(255, 0, 40));
    assert_eq!(NoteColor::new(30).note(), 24);
    assert_eq!(NoteColor::new(-1).note(), 0);
    assert_eq!(NoteColor::new(12).red(), 0.5);
    for _ in 0..20 {
      assert!(NoteColor::random().note() <= 24);
    }
    assert_eq!(PlainColor::from_hsv_hue(120).color, Color::new(0, 255, 0));
  }

  #[test]
  fn plain_color() {
    let (_, rt) = fake::runtime(Version::new(12, 2));
    let red = PlainColor::new(255, 0, 0);
    assert_eq!(red.materialize(Effect::Redstone, &rt), Some(Value::empty()));

    let (_, rt) = fake::runtime(Version::new(13, 2));
    assert_eq!(red.materialize(Effect::SpellMob, &rt), Some(Value::empty()));
    let param = red.materialize(Effect::Redstone, &rt).unwrap();
    assert_eq!(
      Instance::of(&param),
      &Instance::new(
        "ParticleParamRedstone",
        vec![Value::Float(1.0), Value::Float(0.0), Value::Float(0.0), Value::Float(1.0)]
      )
    );
    // There is no transition before 1.17.
    assert_eq!(red.materialize(Effect::DustColorTransition, &rt), None);

    let (_, rt) = fake::runtime(Version::new(17, 1));
    let param = red.materialize(Effect::DustColorTransition, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "DustColorTransitionOptions");
    assert_eq!(Instance::of(&param.args[0]), Instance::of(&param.args[1]));
    assert_eq!(param.args[2], Value::Float(1.0));
  }

  #[test]
  fn dust() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    // Sizes above 4 are left for the client to clamp.
    let dust = Dust::new(Color::new(0, 0, 255), 10.0);
    let param = dust.materialize(Effect::Redstone, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "ParticleParamRedstone");
    assert_eq!(
      Instance::of(&param.args[0]),
      &Instance::new("Vector3f", vec![Value::Float(0.0), Value::Float(0.0), Value::Float(1.0)])
    );
    assert_eq!(param.args[1], Value::Float(10.0));

    // Flame has no dust property
    assert_eq!(dust.materialize(Effect::Flame, &rt), Some(Value::empty()));

    let (_, rt) = fake::runtime(Version::new(8, 8));
    assert_eq!(dust.materialize(Effect::Redstone, &rt), Some(Value::empty()));
  }

  #[test]
  fn transition() {
    let fade = DustColorTransition::new(Color::new(255, 0, 0), Color::new(0, 0, 255), 2.0);
    let (_, rt) = fake::runtime(Version::new(18, 2));
    let param = fade.materialize(Effect::DustColorTransition, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "DustColorTransitionOptions");
    assert_eq!(Instance::of(&param.args[0]).args[0], Value::Float(1.0));
    assert_eq!(Instance::of(&param.args[1]).args[2], Value::Float(1.0));
    assert_eq!(param.args[2], Value::Float(2.0));

    // Redstone only uses the start color.
    let param = fade.materialize(Effect::Redstone, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "ParticleParamRedstone");
    assert_eq!(param.args.len(), 2);

    let (_, rt) = fake::runtime(Version::new(16, 5));
    let param = fade.materialize(Effect::Redstone, &rt).unwrap();
    assert_eq!(Instance::of(&param).args.len(), 4);
  }

  #[test]
  fn note() {
    let (host, rt) = fake::runtime(Version::new(19, 4));
    let before = host.calls();
    assert_eq!(NoteColor::new(5).materialize(Effect::Note, &rt), Some(Value::empty()));
    assert_eq!(host.calls(), before);
  }
}
