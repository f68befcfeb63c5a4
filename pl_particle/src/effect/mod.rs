//! Every particle effect this library knows about.
//!
//! Each effect has a name (the constant in the host's public api), a legacy
//! name (the constant on the internal particle enum, before 1.13), a registry
//! key (after 1.13), a version window, and a set of properties. The
//! properties decide which payloads an effect accepts.

mod handle;

pub use handle::Handles;

use pl_common::Version;
use std::{fmt, str::FromStr};

/// A property of an effect. These decide which kind of particle data can be
/// attached to the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
  /// The offsets are used as a direction when the amount is 0.
  Directional,
  /// The offsets are used as a color when the amount is 0.
  Colorable,
  RequiresBlock,
  RequiresItem,
  /// The particle only shows up underwater.
  RequiresWater,
  /// The offset x is used as a size when the amount is 0.
  Resizeable,
  /// The particle takes a dust payload (a color and a size).
  Dust,
}

#[derive(Debug)]
struct EffectInfo {
  name:   &'static str,
  legacy: Option<&'static str>,
  key:    Option<&'static str>,
  min:    Version,
  /// Exclusive.
  max:    Option<Version>,
  props:  &'static [Property],
}

macro_rules! max_version {
  () => {
    None
  };
  ($max:ident) => {
    Some(Version::$max)
  };
}

macro_rules! effects {
  (
    $(
      $variant:ident: $name:literal, $legacy:expr, $key:expr,
      $min:ident .. $( $max:ident )?, [$( $prop:ident ),*];
    )*
  ) => {
    /// A particle effect. Not every effect exists in every version, see
    /// [`is_supported`](Effect::is_supported).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum Effect {
      $( $variant, )*
    }

    impl Effect {
      /// Every effect, in declaration order.
      pub const ALL: &'static [Effect] = &[ $( Effect::$variant, )* ];

      fn info(self) -> &'static EffectInfo {
        match self {
          $(
            Effect::$variant => {
              const INFO: EffectInfo = EffectInfo {
                name:   $name,
                legacy: $legacy,
                key:    $key,
                min:    Version::$min,
                max:    max_version!($( $max )?),
                props:  &[$( Property::$prop ),*],
              };
              &INFO
            }
          )*
        }
      }
    }
  };
}

effects! {
  ExplosionNormal: "EXPLOSION_NORMAL", Some("EXPLOSION_NORMAL"), Some("poof"), V1_8.., [Directional];
  ExplosionLarge: "EXPLOSION_LARGE", Some("EXPLOSION_LARGE"), Some("explosion"), V1_8.., [Resizeable];
  ExplosionHuge: "EXPLOSION_HUGE", Some("EXPLOSION_HUGE"), Some("explosion_emitter"), V1_8.., [];
  FireworksSpark: "FIREWORKS_SPARK", Some("FIREWORKS_SPARK"), Some("firework"), V1_8.., [Directional];
  WaterBubble: "WATER_BUBBLE", Some("WATER_BUBBLE"), Some("bubble"), V1_8.., [Directional, RequiresWater];
  WaterSplash: "WATER_SPLASH", Some("WATER_SPLASH"), Some("splash"), V1_8.., [];
  WaterWake: "WATER_WAKE", Some("WATER_WAKE"), Some("fishing"), V1_8.., [Directional];
  Suspended: "SUSPENDED", Some("SUSPENDED"), Some("underwater"), V1_8.., [RequiresWater];
  SuspendedDepth: "SUSPENDED_DEPTH", Some("SUSPENDED_DEPTH"), None, V1_8..V1_13, [Directional];
  Crit: "CRIT", Some("CRIT"), Some("crit"), V1_8.., [Directional];
  CritMagic: "CRIT_MAGIC", Some("CRIT_MAGIC"), Some("enchanted_hit"), V1_8.., [Directional];
  SmokeNormal: "SMOKE_NORMAL", Some("SMOKE_NORMAL"), Some("smoke"), V1_8.., [Directional];
  SmokeLarge: "SMOKE_LARGE", Some("SMOKE_LARGE"), Some("large_smoke"), V1_8.., [Directional];
  Spell: "SPELL", Some("SPELL"), Some("effect"), V1_8.., [];
  SpellInstant: "SPELL_INSTANT", Some("SPELL_INSTANT"), Some("instant_effect"), V1_8.., [];
  SpellMob: "SPELL_MOB", Some("SPELL_MOB"), Some("entity_effect"), V1_8.., [Colorable];
  SpellMobAmbient: "SPELL_MOB_AMBIENT", Some("SPELL_MOB_AMBIENT"), Some("ambient_entity_effect"), V1_8.., [Colorable];
  SpellWitch: "SPELL_WITCH", Some("SPELL_WITCH"), Some("witch"), V1_8.., [];
  DripWater: "DRIP_WATER", Some("DRIP_WATER"), Some("dripping_water"), V1_8.., [];
  DripLava: "DRIP_LAVA", Some("DRIP_LAVA"), Some("dripping_lava"), V1_8.., [];
  VillagerAngry: "VILLAGER_ANGRY", Some("VILLAGER_ANGRY"), Some("angry_villager"), V1_8.., [];
  VillagerHappy: "VILLAGER_HAPPY", Some("VILLAGER_HAPPY"), Some("happy_villager"), V1_8.., [Directional];
  TownAura: "TOWN_AURA", Some("TOWN_AURA"), Some("mycelium"), V1_8.., [Directional];
  Note: "NOTE", Some("NOTE"), Some("note"), V1_8.., [Colorable];
  Portal: "PORTAL", Some("PORTAL"), Some("portal"), V1_8.., [Directional];
  EnchantmentTable: "ENCHANTMENT_TABLE", Some("ENCHANTMENT_TABLE"), Some("enchant"), V1_8.., [Directional];
  Flame: "FLAME", Some("FLAME"), Some("flame"), V1_8.., [Directional];
  Lava: "LAVA", Some("LAVA"), Some("lava"), V1_8.., [];
  Footstep: "FOOTSTEP", Some("FOOTSTEP"), None, V1_8..V1_13, [];
  Cloud: "CLOUD", Some("CLOUD"), Some("cloud"), V1_8.., [Directional];
  Redstone: "REDSTONE", Some("REDSTONE"), Some("dust"), V1_8.., [Colorable, Dust];
  Snowball: "SNOWBALL", Some("SNOWBALL"), Some("item_snowball"), V1_8.., [];
  SnowShovel: "SNOW_SHOVEL", Some("SNOW_SHOVEL"), None, V1_8..V1_13, [Directional];
  Slime: "SLIME", Some("SLIME"), Some("item_slime"), V1_8.., [];
  Heart: "HEART", Some("HEART"), Some("heart"), V1_8.., [];
  Barrier: "BARRIER", Some("BARRIER"), Some("barrier"), V1_8..V1_18, [];
  ItemCrack: "ITEM_CRACK", Some("ITEM_CRACK"), Some("item"), V1_8.., [Directional, RequiresItem];
  BlockCrack: "BLOCK_CRACK", Some("BLOCK_CRACK"), Some("block"), V1_8.., [RequiresBlock];
  BlockDust: "BLOCK_DUST", Some("BLOCK_DUST"), Some("block"), V1_8.., [Directional, RequiresBlock];
  WaterDrop: "WATER_DROP", Some("WATER_DROP"), Some("rain"), V1_8.., [];
  ItemTake: "ITEM_TAKE", Some("ITEM_TAKE"), None, V1_8..V1_13, [];
  MobAppearance: "MOB_APPEARANCE", Some("MOB_APPEARANCE"), Some("elder_guardian"), V1_8.., [];
  DragonBreath: "DRAGON_BREATH", Some("DRAGON_BREATH"), Some("dragon_breath"), V1_9.., [Directional];
  EndRod: "END_ROD", Some("END_ROD"), Some("end_rod"), V1_9.., [Directional];
  DamageIndicator: "DAMAGE_INDICATOR", Some("DAMAGE_INDICATOR"), Some("damage_indicator"), V1_9.., [Directional];
  SweepAttack: "SWEEP_ATTACK", Some("SWEEP_ATTACK"), Some("sweep_attack"), V1_9.., [Resizeable];
  FallingDust: "FALLING_DUST", Some("FALLING_DUST"), Some("falling_dust"), V1_10.., [RequiresBlock];
  Totem: "TOTEM", Some("TOTEM"), Some("totem_of_undying"), V1_11.., [Directional];
  Spit: "SPIT", Some("SPIT"), Some("spit"), V1_11.., [Directional];
  SquidInk: "SQUID_INK", None, Some("squid_ink"), V1_13.., [Directional];
  BubblePop: "BUBBLE_POP", None, Some("bubble_pop"), V1_13.., [Directional];
  CurrentDown: "CURRENT_DOWN", None, Some("current_down"), V1_13.., [RequiresWater];
  BubbleColumnUp: "BUBBLE_COLUMN_UP", None, Some("bubble_column_up"), V1_13.., [Directional, RequiresWater];
  Nautilus: "NAUTILUS", None, Some("nautilus"), V1_13.., [Directional];
  Dolphin: "DOLPHIN", None, Some("dolphin"), V1_13.., [];
  Sneeze: "SNEEZE", None, Some("sneeze"), V1_14.., [Directional];
  CampfireCosySmoke: "CAMPFIRE_COSY_SMOKE", None, Some("campfire_cosy_smoke"), V1_14.., [Directional];
  CampfireSignalSmoke: "CAMPFIRE_SIGNAL_SMOKE", None, Some("campfire_signal_smoke"), V1_14.., [Directional];
  Composter: "COMPOSTER", None, Some("composter"), V1_14.., [];
  Flash: "FLASH", None, Some("flash"), V1_14.., [];
  FallingLava: "FALLING_LAVA", None, Some("falling_lava"), V1_14.., [];
  LandingLava: "LANDING_LAVA", None, Some("landing_lava"), V1_14.., [];
  FallingWater: "FALLING_WATER", None, Some("falling_water"), V1_14.., [];
  DrippingHoney: "DRIPPING_HONEY", None, Some("dripping_honey"), V1_15.., [];
  FallingHoney: "FALLING_HONEY", None, Some("falling_honey"), V1_15.., [];
  LandingHoney: "LANDING_HONEY", None, Some("landing_honey"), V1_15.., [];
  FallingNectar: "FALLING_NECTAR", None, Some("falling_nectar"), V1_15.., [];
  Ash: "ASH", None, Some("ash"), V1_16.., [];
  CrimsonSpore: "CRIMSON_SPORE", None, Some("crimson_spore"), V1_16.., [];
  SoulFireFlame: "SOUL_FIRE_FLAME", None, Some("soul_fire_flame"), V1_16.., [Directional];
  Soul: "SOUL", None, Some("soul"), V1_16.., [Directional];
  DrippingObsidianTear: "DRIPPING_OBSIDIAN_TEAR", None, Some("dripping_obsidian_tear"), V1_16.., [];
  FallingObsidianTear: "FALLING_OBSIDIAN_TEAR", None, Some("falling_obsidian_tear"), V1_16.., [];
  LandingObsidianTear: "LANDING_OBSIDIAN_TEAR", None, Some("landing_obsidian_tear"), V1_16.., [];
  ReversePortal: "REVERSE_PORTAL", None, Some("reverse_portal"), V1_16.., [Directional];
  WarpedSpore: "WARPED_SPORE", None, Some("warped_spore"), V1_16.., [];
  WhiteAsh: "WHITE_ASH", None, Some("white_ash"), V1_16.., [];
  Light: "LIGHT", None, Some("light"), V1_17..V1_18, [];
  DustColorTransition: "DUST_COLOR_TRANSITION", None, Some("dust_color_transition"), V1_17.., [Colorable, Dust];
  Vibration: "VIBRATION", None, Some("vibration"), V1_17.., [];
  FallingSporeBlossom: "FALLING_SPORE_BLOSSOM", None, Some("falling_spore_blossom"), V1_17.., [];
  SporeBlossomAir: "SPORE_BLOSSOM_AIR", None, Some("spore_blossom_air"), V1_17.., [];
  SmallFlame: "SMALL_FLAME", None, Some("small_flame"), V1_17.., [Directional];
  Snowflake: "SNOWFLAKE", None, Some("snowflake"), V1_17.., [Directional];
  DrippingDripstoneLava: "DRIPPING_DRIPSTONE_LAVA", None, Some("dripping_dripstone_lava"), V1_17.., [];
  FallingDripstoneLava: "FALLING_DRIPSTONE_LAVA", None, Some("falling_dripstone_lava"), V1_17.., [];
  DrippingDripstoneWater: "DRIPPING_DRIPSTONE_WATER", None, Some("dripping_dripstone_water"), V1_17.., [];
  FallingDripstoneWater: "FALLING_DRIPSTONE_WATER", None, Some("falling_dripstone_water"), V1_17.., [];
  GlowSquidInk: "GLOW_SQUID_INK", None, Some("glow_squid_ink"), V1_17.., [Directional];
  Glow: "GLOW", None, Some("glow"), V1_17.., [Directional];
  WaxOn: "WAX_ON", None, Some("wax_on"), V1_17.., [Directional];
  WaxOff: "WAX_OFF", None, Some("wax_off"), V1_17.., [Directional];
  ElectricSpark: "ELECTRIC_SPARK", None, Some("electric_spark"), V1_17.., [Directional];
  Scrape: "SCRAPE", None, Some("scrape"), V1_17.., [Directional];
  BlockMarker: "BLOCK_MARKER", None, Some("block_marker"), V1_18.., [RequiresBlock];
  SonicBoom: "SONIC_BOOM", None, Some("sonic_boom"), V1_19.., [];
  SculkSoul: "SCULK_SOUL", None, Some("sculk_soul"), V1_19.., [Directional];
  SculkCharge: "SCULK_CHARGE", None, Some("sculk_charge"), V1_19.., [Directional];
  SculkChargePop: "SCULK_CHARGE_POP", None, Some("sculk_charge_pop"), V1_19.., [Directional];
  Shriek: "SHRIEK", None, Some("shriek"), V1_19.., [];
  CherryLeaves: "CHERRY_LEAVES", None, Some("cherry_leaves"), V1_20.., [];
  EggCrack: "EGG_CRACK", None, Some("egg_crack"), V1_20.., [Directional];
  DustPlume: "DUST_PLUME", None, Some("dust_plume"), V1_20_3.., [Directional];
  WhiteSmoke: "WHITE_SMOKE", None, Some("white_smoke"), V1_20_3.., [Directional];
  Gust: "GUST", None, Some("gust"), V1_20_3.., [];
}

impl Effect {
  /// The name of this effect in the host's public api, such as `REDSTONE`.
  pub fn bukkit_name(self) -> &'static str { self.info().name }

  /// Looks up an effect by its public name. This is case sensitive.
  pub fn from_name(name: &str) -> Option<Effect> {
    Effect::ALL.iter().copied().find(|e| e.bukkit_name() == name)
  }

  /// The first version this effect exists in.
  pub fn min_version(self) -> Version { self.info().min }
  /// The first version this effect no longer exists in, if it has been
  /// removed.
  pub fn max_version(self) -> Option<Version> { self.info().max }

  pub fn is_supported(self, ver: Version) -> bool {
    let info = self.info();
    ver >= info.min && info.max.map(|max| ver < max).unwrap_or(true)
  }

  pub fn has_property(self, prop: Property) -> bool { self.info().props.contains(&prop) }
  pub fn properties(self) -> &'static [Property] { self.info().props }

  /// Returns the name used to look this effect up on the host. Before 1.13,
  /// this is the constant on the internal particle enum. After, it is the
  /// registry key (without the `minecraft:` namespace). If the effect does
  /// not exist in the given version, this returns `None`.
  pub fn field_name(self, ver: Version) -> Option<&'static str> {
    if !self.is_supported(ver) {
      return None;
    }
    let info = self.info();
    if ver < Version::V1_13 {
      info.legacy
    } else {
      info.key
    }
  }
}

impl fmt::Display for Effect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(self.bukkit_name()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEffect(pub String);

impl fmt::Display for InvalidEffect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "invalid effect: {}", self.0) }
}

impl std::error::Error for InvalidEffect {}

impl FromStr for Effect {
  type Err = InvalidEffect;

  fn from_str(s: &str) -> Result<Self, InvalidEffect> {
    Effect::from_name(s).ok_or_else(|| InvalidEffect(s.into()))
  }
}
