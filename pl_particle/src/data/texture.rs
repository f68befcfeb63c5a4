use crate::{
  effect::{Effect, Property},
  host::{ItemStack, Material, Value},
  Runtime,
};
use pl_common::Version;

/// Encodes a texture the way old clients expect it. Item cracks send the id
/// and damage separately, and everything else packs the data into the upper
/// bits of the id.
fn legacy_data(effect: Effect, id: i32, data: i8) -> Value {
  if effect == Effect::ItemCrack {
    Value::IntArray(vec![id, data.into()])
  } else {
    Value::IntArray(vec![id | (i32::from(data) << 12)])
  }
}

/// A block texture, for effects like [`Effect::BlockCrack`] and
/// [`Effect::BlockMarker`].
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTexture {
  pub material: Material,
  /// The legacy data value of the block. Only used before 1.13.
  pub data:     i8,
}

impl BlockTexture {
  pub fn new(material: Material) -> Self { BlockTexture { material, data: 0 } }
  pub fn with_data(material: Material, data: i8) -> Self { BlockTexture { material, data } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if !self.material.is_block() || !effect.has_property(Property::RequiresBlock) {
      return None;
    }
    if rt.version() < Version::V1_13 {
      return Some(legacy_data(effect, self.material.id, self.data));
    }
    let block = rt.block_data(&self.material)?;
    let handle = rt.native_handle(effect)?;
    rt.intro().construct(rt.symbols().param_block_ctor.as_ref()?, &[handle, block])
  }
}

/// An item texture, for [`Effect::ItemCrack`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemTexture {
  pub item: ItemStack,
}

impl ItemTexture {
  pub fn new(item: ItemStack) -> Self { ItemTexture { item } }

  pub(super) fn materialize(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if self.item.data < 0 || !effect.has_property(Property::RequiresItem) {
      return None;
    }
    if rt.version() < Version::V1_13 {
      return Some(legacy_data(effect, self.item.material.id, self.item.data));
    }
    let item = rt.nms_item(&self.item)?;
    let handle = rt.native_handle(effect)?;
    rt.intro().construct(rt.symbols().param_item_ctor.as_ref()?, &[handle, item])
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::host::fake::{self, Instance};
  use pretty_assertions::assert_eq;

  #[test]
  fn legacy() {
    let (_, rt) = fake::runtime(Version::new(8, 8));
    let stone = BlockTexture::with_data(Material::block("STONE", 1), 2);
    assert_eq!(
      stone.materialize(Effect::BlockCrack, &rt),
      Some(Value::IntArray(vec![1 | (2 << 12)]))
    );
    let item = ItemTexture::new(fake::item(Material::item("DIAMOND", 264), 3));
    assert_eq!(item.materialize(Effect::ItemCrack, &rt), Some(Value::IntArray(vec![264, 3])));
  }

  #[test]
  fn invalid() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    let stone = BlockTexture::new(Material::block("STONE", 1));
    assert_eq!(stone.materialize(Effect::Flame, &rt), None);
    assert_eq!(stone.materialize(Effect::ItemCrack, &rt), None);
    let diamond = BlockTexture::new(Material::item("DIAMOND", 264));
    assert_eq!(diamond.materialize(Effect::BlockCrack, &rt), None);
    let item = ItemTexture::new(fake::item(Material::item("DIAMOND", 264), 0));
    assert_eq!(item.materialize(Effect::BlockCrack, &rt), None);
  }

  #[test]
  fn block_before_17() {
    let (_, rt) = fake::runtime(Version::new(16, 5));
    let stone = BlockTexture::new(Material::block("STONE", 1));
    let param = stone.materialize(Effect::FallingDust, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "ParticleParamBlock");
    assert_eq!(Instance::of(&param.args[0]).kind, "RegistryEntry");
    let data = Instance::of(&param.args[1]);
    assert_eq!(data.kind, "BlockData");
    // Read from the static field on `Blocks`
    assert_eq!(Instance::of(&data.args[0]), &Instance::new("Block", vec![Value::Str("STONE".into())]));
  }

  #[test]
  fn block_registry() {
    let (_, rt) = fake::runtime(Version::new(19, 4));
    let stone = BlockTexture::new(Material::block("STONE", 1));
    let param = stone.materialize(Effect::BlockMarker, &rt).unwrap();
    let data = Instance::of(&Instance::of(&param).args[1]);
    let block = Instance::of(&data.args[0]);
    assert_eq!(block.kind, "RegistryEntry");
    assert_eq!(block.args[1], Value::Str("stone".into()));
  }

  #[test]
  fn item() {
    let (_, rt) = fake::runtime(Version::new(14, 0));
    let item = ItemTexture::new(fake::item(Material::item("DIAMOND", 264), 0));
    let param = item.materialize(Effect::ItemCrack, &rt).unwrap();
    let param = Instance::of(&param);
    assert_eq!(param.kind, "ParticleParamItem");
    assert_eq!(Instance::of(&param.args[1]).kind, "NmsItemStack");
  }
}
