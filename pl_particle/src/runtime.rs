use crate::{
  effect::{Effect, Handles},
  host::{Entity, Introspect, ItemStack, Material, Value},
  mappings::{Mappings, Symbols},
};
use pl_common::{math::Location, Version};

/// Everything that is decided once at startup: the detected version, the
/// selected mappings, and all the resolved host symbols. None of this changes
/// after it is created, apart from the lazily filled effect handle cache.
#[derive(Debug)]
pub struct Runtime {
  ver:           Version,
  intro:         Introspect,
  mappings:      Mappings,
  symbols:       Symbols,
  handles:       Handles,
  long_distance: bool,
}

impl Runtime {
  /// Resolves every symbol in `mappings`. This makes a lot of host calls, so
  /// it should only be done once.
  pub fn new(intro: Introspect, mappings: Mappings, ver: Version, long_distance: bool) -> Self {
    let symbols = Symbols::resolve(&intro, &mappings, ver);
    Runtime { ver, intro, mappings, symbols, handles: Handles::new(), long_distance }
  }

  pub fn version(&self) -> Version { self.ver }
  pub fn intro(&self) -> &Introspect { &self.intro }
  pub fn mappings(&self) -> &Mappings { &self.mappings }
  pub fn symbols(&self) -> &Symbols { &self.symbols }
  pub fn handles(&self) -> &Handles { &self.handles }
  pub fn long_distance(&self) -> bool { self.long_distance }

  /// Returns the host's object for this effect. This is an enum constant
  /// before 1.13, and a registry entry after.
  pub fn native_handle(&self, effect: Effect) -> Option<Value> { self.handles.get(effect, self) }

  /// Creates a block position for the block `loc` is inside of.
  pub fn block_position(&self, loc: &Location) -> Option<Value> {
    let pos = loc.block();
    self.intro.construct(
      self.symbols.block_position_ctor.as_ref()?,
      &[Value::Double(pos.x.into()), Value::Double(pos.y.into()), Value::Double(pos.z.into())],
    )
  }

  /// Creates a float vector. The class used for this changes twice across
  /// versions.
  pub fn vector3(&self, x: f32, y: f32, z: f32) -> Option<Value> {
    self.intro.construct(
      self.symbols.vector3f_ctor.as_ref()?,
      &[Value::Float(x), Value::Float(y), Value::Float(z)],
    )
  }

  pub fn minecraft_key(&self, key: &str) -> Option<Value> {
    self.intro.construct(self.symbols.minecraft_key_ctor.as_ref()?, &[Value::Str(key.into())])
  }

  /// Returns the internal entity behind a wrapper entity. This is `None` if
  /// the entity does not come from the craftbukkit package.
  pub fn entity_handle(&self, entity: &Entity) -> Option<Value> {
    let get = self.symbols.craft_entity_get_handle.as_ref()?;
    if !entity.handle.class().starts_with(self.intro.craft_root()) {
      debug!("entity {} is a {}, not a craftbukkit entity", entity.id, entity.handle.class());
      return None;
    }
    self.intro.invoke(get, Some(&Value::Object(entity.handle.clone())), &[])
  }

  /// Converts an item stack from the public api to the internal form.
  pub fn nms_item(&self, item: &ItemStack) -> Option<Value> {
    let as_nms = self.symbols.craft_item_stack_as_nms.as_ref()?;
    self.intro.invoke(as_nms, None, &[Value::Object(item.handle.clone())])
  }

  /// Returns the default block state of a block. Before 1.17 the block is
  /// read from a static field named after the material, and after it is
  /// looked up in the block registry.
  pub fn block_data(&self, material: &Material) -> Option<Value> {
    let block = if self.ver < Version::V1_17 {
      let field = self.intro.field_of(self.symbols.blocks.as_ref()?, &material.name, false)?;
      self.intro.read_static(&field)?
    } else {
      let (get, registry) = self.symbols.block_lookup()?;
      let key = self.minecraft_key(&material.name.to_lowercase())?;
      self.intro.invoke(get, Some(registry), &[key])?
    };
    self.intro.invoke(self.symbols.block_get_block_data.as_ref()?, Some(&block), &[])
  }
}
