use crate::{effect::Effect, host::Value, Runtime};
use pl_common::Version;

/// The roll of a sculk charge particle, in radians. Only used with
/// [`Effect::SculkCharge`], on 1.19+.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SculkCharge {
  pub roll: f32,
}

impl SculkCharge {
  pub fn new(roll: f32) -> Self { SculkCharge { roll } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if rt.version() < Version::V1_19 || effect != Effect::SculkCharge {
      return None;
    }
    rt.intro().construct(rt.symbols().param_sculk_charge_ctor.as_ref()?, &[Value::Float(self.roll)])
  }
}

/// The delay of a shriek particle, in ticks. Only used with
/// [`Effect::Shriek`], on 1.19+.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shriek {
  pub delay: i32,
}

impl Shriek {
  pub fn new(delay: i32) -> Self { Shriek { delay } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if rt.version() < Version::V1_19 || effect != Effect::Shriek {
      return None;
    }
    rt.intro().construct(rt.symbols().param_shriek_ctor.as_ref()?, &[Value::Int(self.delay)])
  }
}
