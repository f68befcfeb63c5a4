use super::Effect;
use crate::{host::Value, Runtime};
use parking_lot::RwLock;
use pl_common::Version;
use std::collections::HashMap;

/// The host's own object for each effect, looked up the first time an effect
/// is used. A failed lookup is stored too, so it is never retried.
#[derive(Debug, Default)]
pub struct Handles {
  cache: RwLock<HashMap<Effect, Option<Value>>>,
}

impl Handles {
  pub fn new() -> Self { Handles::default() }

  /// Returns the native handle for this effect, looking it up if needed.
  pub fn get(&self, effect: Effect, rt: &Runtime) -> Option<Value> {
    if let Some(handle) = self.cache.read().get(&effect) {
      return handle.clone();
    }
    let handle = lookup(effect, rt);
    if handle.is_none() {
      debug!("effect {effect} has no native handle in {}", rt.version());
    }
    // Another thread may have looked this up at the same time. Both lookups
    // produce the same handle, so keeping the first one is fine.
    self.cache.write().entry(effect).or_insert(handle).clone()
  }

  /// The number of effects that have been looked up so far.
  pub fn len(&self) -> usize { self.cache.read().len() }
  pub fn is_empty(&self) -> bool { self.cache.read().is_empty() }
}

fn lookup(effect: Effect, rt: &Runtime) -> Option<Value> {
  let name = effect.field_name(rt.version())?;
  let intro = rt.intro();
  let sym = rt.symbols();
  if rt.version() < Version::V1_13 {
    let field = intro.field_of(sym.particle_enum.as_ref()?, name, false)?;
    intro.read_static(&field)
  } else {
    let (get, registry) = sym.particle_lookup()?;
    let key = rt.minecraft_key(&format!("minecraft:{name}"))?;
    intro.invoke(get, Some(registry), &[key])
  }
}
