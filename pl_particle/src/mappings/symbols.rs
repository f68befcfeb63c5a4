use super::{Mappings, Versioned};
use crate::host::{Class, Constructor, Field, Introspect, Method, Type, Value};
use pl_common::Version;

/// Every host handle the marshaller needs, resolved once at startup.
///
/// A symbol that cannot be resolved in the detected version is stored as
/// `None`, and is never looked up again. Anything that needs a missing symbol
/// simply produces no packet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Symbols {
  pub item_stack:                  Option<Class>,
  pub packet:                      Option<Class>,
  pub packet_play_out_particles:   Option<Class>,
  pub particle_enum:               Option<Class>,
  pub particle:                    Option<Class>,
  pub minecraft_key:               Option<Class>,
  pub vector3f:                    Option<Class>,
  pub registry:                    Option<Class>,
  pub built_in_registries:         Option<Class>,
  pub block:                       Option<Class>,
  pub block_position:              Option<Class>,
  pub block_data:                  Option<Class>,
  pub blocks:                      Option<Class>,
  pub position_source:             Option<Class>,
  pub block_position_source:       Option<Class>,
  pub entity_position_source:      Option<Class>,
  pub vibration_path:              Option<Class>,
  pub entity:                      Option<Class>,
  pub entity_player:               Option<Class>,
  pub player_connection:           Option<Class>,
  /// The class that declares the send method. This is the player connection
  /// before 1.20.2, and its common superclass after.
  pub send_listener:               Option<Class>,
  pub craft_entity:                Option<Class>,
  pub craft_player:                Option<Class>,
  pub craft_item_stack:            Option<Class>,
  pub param:                       Option<Class>,
  pub param_redstone:              Option<Class>,
  pub param_dust_transition:       Option<Class>,
  pub param_block:                 Option<Class>,
  pub param_item:                  Option<Class>,
  pub param_vibration:             Option<Class>,
  pub param_shriek:                Option<Class>,
  pub param_sculk_charge:          Option<Class>,

  pub registry_get:                Option<Method>,
  pub craft_entity_get_handle:     Option<Method>,
  pub craft_player_get_handle:     Option<Method>,
  pub block_get_block_data:        Option<Method>,
  pub craft_item_stack_as_nms:     Option<Method>,
  pub send_packet:                 Option<Method>,

  pub player_connection_field:     Option<Field>,

  pub packet_ctor:                 Option<Constructor>,
  pub minecraft_key_ctor:          Option<Constructor>,
  pub vector3f_ctor:               Option<Constructor>,
  pub block_position_ctor:         Option<Constructor>,
  pub block_position_source_ctor:  Option<Constructor>,
  pub entity_position_source_ctor: Option<Constructor>,
  pub vibration_path_ctor:         Option<Constructor>,
  pub param_redstone_ctor:         Option<Constructor>,
  pub param_dust_transition_ctor:  Option<Constructor>,
  pub param_block_ctor:            Option<Constructor>,
  pub param_item_ctor:             Option<Constructor>,
  pub param_vibration_ctor:        Option<Constructor>,
  pub param_shriek_ctor:           Option<Constructor>,
  pub param_sculk_charge_ctor:     Option<Constructor>,

  pub particle_registry:           Option<Value>,
  pub block_registry:              Option<Value>,
}

fn obj(class: &Option<Class>) -> Option<Type> { class.clone().map(Type::Object) }

/// Collects a parameter list, which is `None` if any of the classes in it
/// failed to resolve.
fn params<const N: usize>(types: [Option<Type>; N]) -> Option<Vec<Type>> {
  types.into_iter().collect()
}

struct Resolver<'a> {
  intro:    &'a Introspect,
  mappings: &'a Mappings,
  found:    usize,
  failed:   usize,
}

impl Resolver<'_> {
  fn track<T>(&mut self, what: &str, v: Option<T>) -> Option<T> {
    match v {
      Some(_) => self.found += 1,
      None => {
        warn!("could not resolve {what}");
        self.failed += 1;
      }
    }
    v
  }

  /// Resolves a mapped internal class.
  fn class(&mut self, name: &str) -> Option<Class> {
    let path = self.mappings.get(name)?;
    let class = self.intro.nms_class(path);
    self.track(name, class)
  }
  fn craft_class(&mut self, path: &str) -> Option<Class> {
    let class = self.intro.craft_class(path);
    self.track(path, class)
  }
  fn class_at(&mut self, name: &str) -> Option<Class> {
    let class = self.intro.class_of(name);
    self.track(name, class)
  }

  /// Resolves a mapped method or field name on the given class.
  fn method(&mut self, class: &Option<Class>, name: &str, params: &[Type]) -> Option<Method> {
    let concrete = self.mappings.get(name)?;
    let method = self.intro.method_of(class.as_ref()?, concrete, params);
    self.track(name, method)
  }
  fn method_named(&mut self, class: &Option<Class>, name: &str, params: &[Type]) -> Option<Method> {
    let method = self.intro.method_of(class.as_ref()?, name, params);
    self.track(name, method)
  }
  fn field(&mut self, class: &Option<Class>, name: &str) -> Option<Field> {
    let concrete = self.mappings.get(name)?;
    let field = self.intro.field_of(class.as_ref()?, concrete, false);
    self.track(name, field)
  }

  fn ctor(&mut self, class: &Option<Class>, params: Option<Vec<Type>>) -> Option<Constructor> {
    let class = class.as_ref()?;
    let ctor = self.intro.constructor_of(class, &params?);
    self.track(class.simple_name(), ctor)
  }
}

impl Symbols {
  /// Resolves every symbol for the given version. Anything without a mapping
  /// in this version is skipped silently, and anything that has a mapping but
  /// cannot be found on the host is logged as a warning.
  pub fn resolve(intro: &Introspect, mappings: &Mappings, ver: Version) -> Symbols {
    let mut r = Resolver { intro, mappings, found: 0, failed: 0 };
    let mut s = Symbols::default();

    s.item_stack = r.class("ItemStack");
    s.packet = r.class("Packet");
    s.packet_play_out_particles = r.class("PacketPlayOutWorldParticles");
    s.particle_enum = r.class("EnumParticle");
    s.particle = r.class("Particle");
    s.minecraft_key = r.class("MinecraftKey");
    s.vector3f = if ver < Version::V1_17 {
      r.class_at(&format!("{}.Vector3f", intro.nms_root()))
    } else {
      let name = Versioned::new(ver)
        .since(Version::V1_19_3, "org.joml.Vector3f")
        .or_else("com.mojang.math.Vector3fa");
      r.class_at(name)
    };
    s.registry = r.class("IRegistry");
    s.built_in_registries = r.class("BuiltInRegistries");
    s.block = r.class("Block");
    s.block_position = r.class("BlockPosition");
    s.block_data = r.class("IBlockData");
    s.blocks = r.class("Blocks");
    s.position_source = r.class("PositionSource");
    s.block_position_source = r.class("BlockPositionSource");
    s.entity_position_source = r.class("EntityPositionSource");
    s.vibration_path = r.class("VibrationPath");
    s.entity = r.class("Entity");
    s.entity_player = r.class("EntityPlayer");
    s.player_connection = r.class("PlayerConnection");
    s.send_listener = if ver >= Version::V1_20_2 {
      r.class("ServerCommonPacketListenerImpl")
    } else {
      s.player_connection.clone()
    };
    s.craft_entity = r.craft_class("entity.CraftEntity");
    s.craft_player = r.craft_class("entity.CraftPlayer");
    s.craft_item_stack = r.craft_class("inventory.CraftItemStack");
    s.param = r.class("ParticleParam");
    s.param_redstone = r.class("ParticleParamRedstone");
    s.param_dust_transition = r.class("ParticleParamDustColorTransition");
    s.param_block = r.class("ParticleParamBlock");
    s.param_item = r.class("ParticleParamItem");
    s.param_vibration = r.class("ParticleParamVibration");
    s.param_shriek = r.class("ParticleParamShriek");
    s.param_sculk_charge = r.class("ParticleParamSculkCharge");

    // Methods
    if let Some(key) = obj(&s.minecraft_key) {
      s.registry_get = r.method(&s.registry, "Registry.get", &[key]);
    }
    s.craft_entity_get_handle = r.method_named(&s.craft_entity, "getHandle", &[]);
    s.craft_player_get_handle = r.method_named(&s.craft_player, "getHandle", &[]);
    s.block_get_block_data = r.method(&s.block, "Block.getBlockData", &[]);
    let bukkit_stack = Type::Object(Class::new("org.bukkit.inventory.ItemStack"));
    s.craft_item_stack_as_nms =
      r.method_named(&s.craft_item_stack, "asNMSCopy", &[bukkit_stack]);
    if let Some(packet) = obj(&s.packet) {
      s.send_packet = r.method(&s.send_listener, "PlayerConnection.sendPacket", &[packet]);
    }

    // Fields
    s.player_connection_field = r.field(&s.entity_player, "EntityPlayer.playerConnection");

    // Constructors
    use Type::{Bool, Double, Float, Int, IntArray};
    let packet_params = if ver < Version::V1_13 {
      params([
        obj(&s.particle_enum),
        Some(Bool),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Int),
        Some(IntArray),
      ])
    } else if ver < Version::V1_15 {
      params([
        obj(&s.param),
        Some(Bool),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Int),
      ])
    } else {
      params([
        obj(&s.param),
        Some(Bool),
        Some(Double),
        Some(Double),
        Some(Double),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Float),
        Some(Int),
      ])
    };
    s.packet_ctor = r.ctor(&s.packet_play_out_particles, packet_params);
    s.minecraft_key_ctor = r.ctor(&s.minecraft_key, Some(vec![Type::Str]));
    s.vector3f_ctor = r.ctor(&s.vector3f, Some(vec![Float, Float, Float]));
    s.block_position_ctor = r.ctor(&s.block_position, Some(vec![Double, Double, Double]));

    if ver >= Version::V1_13 {
      s.param_redstone_ctor = if ver < Version::V1_17 {
        r.ctor(&s.param_redstone, Some(vec![Float, Float, Float, Float]))
      } else {
        r.ctor(&s.param_redstone, params([obj(&s.vector3f), Some(Float)]))
      };
      s.param_block_ctor =
        r.ctor(&s.param_block, params([obj(&s.particle), obj(&s.block_data)]));
      s.param_item_ctor = r.ctor(&s.param_item, params([obj(&s.particle), obj(&s.item_stack)]));
    }
    if ver >= Version::V1_17 {
      s.block_position_source_ctor =
        r.ctor(&s.block_position_source, params([obj(&s.block_position)]));
      s.param_dust_transition_ctor = r.ctor(
        &s.param_dust_transition,
        params([obj(&s.vector3f), obj(&s.vector3f), Some(Float)]),
      );
      if ver < Version::V1_19 {
        s.entity_position_source_ctor = r.ctor(&s.entity_position_source, Some(vec![Int]));
        s.vibration_path_ctor = r.ctor(
          &s.vibration_path,
          params([obj(&s.block_position), obj(&s.position_source), Some(Int)]),
        );
        s.param_vibration_ctor = r.ctor(&s.param_vibration, params([obj(&s.vibration_path)]));
      } else {
        s.entity_position_source_ctor =
          r.ctor(&s.entity_position_source, params([obj(&s.entity), Some(Float)]));
        s.param_vibration_ctor =
          r.ctor(&s.param_vibration, params([obj(&s.position_source), Some(Int)]));
      }
    }
    if ver >= Version::V1_19 {
      s.param_shriek_ctor = r.ctor(&s.param_shriek, Some(vec![Int]));
      s.param_sculk_charge_ctor = r.ctor(&s.param_sculk_charge, Some(vec![Float]));
    }

    // Registries
    let (holder, particles, blocks) = if ver < Version::V1_19_3 {
      (&s.registry, "Registry.ParticleTypeRegistry", "Registry.BlockRegistry")
    } else {
      (
        &s.built_in_registries,
        "BuiltInRegistries.ParticleTypeRegistry",
        "BuiltInRegistries.BlockRegistry",
      )
    };
    if let Some(field) = r.field(holder, particles) {
      s.particle_registry = intro.read_static(&field);
    }
    if let Some(field) = r.field(holder, blocks) {
      s.block_registry = intro.read_static(&field);
    }

    info!("resolved {} host symbols for {ver} ({} failed)", r.found, r.failed);
    s
  }

  /// Returns the registry lookup method and the particle registry, if both
  /// resolved.
  pub fn particle_lookup(&self) -> Option<(&Method, &Value)> {
    Some((self.registry_get.as_ref()?, self.particle_registry.as_ref()?))
  }
  /// Returns the registry lookup method and the block registry, if both
  /// resolved.
  pub fn block_lookup(&self) -> Option<(&Method, &Value)> {
    Some((self.registry_get.as_ref()?, self.block_registry.as_ref()?))
  }
}
