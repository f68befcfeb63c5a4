//! Extra data that can be attached to a particle.
//!
//! Every kind of data knows how to turn itself into the host's parameter
//! object for the detected version. Most of them only work with a few
//! effects: an effect's [`Property`](crate::effect::Property) set decides what
//! it accepts, and anything that doesn't match produces no packet.

mod color;
mod sculk;
mod texture;
mod vibration;

pub use color::{Dust, DustColorTransition, NoteColor, PlainColor};
pub use sculk::{SculkCharge, Shriek};
pub use texture::{BlockTexture, ItemTexture};
pub use vibration::{Destination, Vibration};

use crate::{effect::Effect, host::Value, Runtime};

/// One of the nine kinds of particle data.
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleData {
  PlainColor(PlainColor),
  NoteColor(NoteColor),
  Dust(Dust),
  DustColorTransition(DustColorTransition),
  BlockTexture(BlockTexture),
  ItemTexture(ItemTexture),
  Vibration(Vibration),
  SculkCharge(SculkCharge),
  Shriek(Shriek),
}

impl ParticleData {
  /// Returns the effect this data ends up bound to, when it is attached to a
  /// builder for `requested`. Note data always binds to [`Effect::Note`],
  /// which means it produces nothing when attached to any other effect.
  pub fn bound_effect(&self, requested: Effect) -> Effect {
    match self {
      ParticleData::NoteColor(_) => Effect::Note,
      _ => requested,
    }
  }

  /// Builds the host's parameter object for this data, bound to `effect`.
  ///
  /// This returns `Some(Value::empty())` for data that does not have a
  /// parameter object in this version. In that case, the packet assembler
  /// encodes the data into the offsets (for colors) or into the legacy data
  /// array (for textures, where this returns the array itself). `None` means
  /// this data cannot be displayed at all.
  pub fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    match self {
      ParticleData::PlainColor(v) => v.materialize(effect, rt),
      ParticleData::NoteColor(v) => v.materialize(effect, rt),
      ParticleData::Dust(v) => v.materialize(effect, rt),
      ParticleData::DustColorTransition(v) => v.materialize(effect, rt),
      ParticleData::BlockTexture(v) => v.materialize(effect, rt),
      ParticleData::ItemTexture(v) => v.materialize(effect, rt),
      ParticleData::Vibration(v) => v.materialize(effect, rt),
      ParticleData::SculkCharge(v) => v.materialize(effect, rt),
      ParticleData::Shriek(v) => v.materialize(effect, rt),
    }
  }

  /// Returns the color of this data, if it is one of the color kinds. Dust
  /// returns its color, and a transition returns its start color.
  pub fn color(&self) -> Option<PlainColor> {
    match self {
      ParticleData::PlainColor(v) => Some(*v),
      ParticleData::Dust(v) => Some(PlainColor::from(v.color)),
      ParticleData::DustColorTransition(v) => Some(PlainColor::from(v.from)),
      _ => None,
    }
  }
}

macro_rules! add_from {
  ( $( $name:ident ),* ) => {
    $(
      impl From<$name> for ParticleData {
        fn from(v: $name) -> Self { ParticleData::$name(v) }
      }
    )*
  };
}

add_from!(
  PlainColor,
  NoteColor,
  Dust,
  DustColorTransition,
  BlockTexture,
  ItemTexture,
  Vibration,
  SculkCharge,
  Shriek
);
