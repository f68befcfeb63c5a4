//! An in-memory host, used for tests.
//!
//! Every class, method and field exists unless it has been marked as missing.
//! Constructors check their argument types, and then produce an [`Instance`],
//! which records the simple class name and the arguments. This makes it
//! possible to check the exact shape of everything the marshaller builds.

use super::{
  Class, Constructor, Entity, Field, HostError, ItemStack, Material, Method, Object, Player,
  Reflector, Server, Type, Value,
};
use crate::{mappings::Mappings, Runtime};
use parking_lot::Mutex;
use pl_common::{math::Location, Version};
use std::{
  collections::{HashMap, HashSet},
  sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  },
  thread,
  time::Duration,
};

/// An object built by the fake host.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
  pub kind: String,
  pub args: Vec<Value>,
}

impl Instance {
  pub fn new(kind: &str, args: Vec<Value>) -> Self { Instance { kind: kind.into(), args } }

  /// Returns the instance inside this value.
  ///
  /// # Panics
  ///
  /// Panics if the value is not an object created by the fake host.
  pub fn of(value: &Value) -> &Instance {
    value
      .as_object()
      .and_then(|o| o.downcast_ref::<Instance>())
      .unwrap_or_else(|| panic!("not a fake instance: {value:?}"))
  }
}

/// A registry, read from a static field.
#[derive(Debug)]
struct Registry {
  field: String,
}

/// A player's connection. Sending a packet on this records it.
#[derive(Debug)]
struct Connection {
  player: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
  pub player:   String,
  pub particle: String,
  pub location: Location,
  pub amount:   i32,
}

pub struct FakeHost {
  ver:         Version,
  missing:     Mutex<HashSet<String>>,
  fail_sends:  Mutex<HashSet<String>>,
  offline:     Mutex<HashSet<String>>,
  statics:     Mutex<HashMap<String, Object>>,
  entries:     Mutex<HashMap<(String, String), Object>>,
  players:     Mutex<Vec<Player>>,
  sent:        Mutex<Vec<(String, Value)>>,
  api_calls:   Mutex<Vec<ApiCall>>,
  calls:       AtomicUsize,
  send_delay:  Mutex<Duration>,
}

impl FakeHost {
  pub fn new(ver: Version) -> Self {
    FakeHost {
      ver,
      missing: Mutex::new(HashSet::new()),
      fail_sends: Mutex::new(HashSet::new()),
      offline: Mutex::new(HashSet::new()),
      statics: Mutex::new(HashMap::new()),
      entries: Mutex::new(HashMap::new()),
      players: Mutex::new(vec![]),
      sent: Mutex::new(vec![]),
      api_calls: Mutex::new(vec![]),
      calls: AtomicUsize::new(0),
      send_delay: Mutex::new(Duration::ZERO),
    }
  }

  pub fn nms_version(&self) -> String { format!("v1_{}_R1", self.ver.maj()) }
  pub fn craft_root(&self) -> String { format!("org.bukkit.craftbukkit.{}", self.nms_version()) }

  /// Marks a name as missing. This can be a fully qualified class name, a
  /// simple class name, `Class.member` for methods and fields (using the
  /// simple class name), or a registry key.
  pub fn remove(&self, name: &str) { self.missing.lock().insert(name.into()); }
  /// Makes every send to this player fail.
  pub fn fail_sends_to(&self, player: &str) { self.fail_sends.lock().insert(player.into()); }
  /// Makes this player have no connection.
  pub fn disconnect(&self, player: &str) { self.offline.lock().insert(player.into()); }
  /// Makes every send take this long, like a slow connection.
  pub fn slow_sends(&self, delay: Duration) { *self.send_delay.lock() = delay; }

  pub fn add_player(&self, name: &str, world: &str) -> Player {
    let player = player(&self.craft_root(), name, world);
    self.players.lock().push(player.clone());
    player
  }

  /// The number of calls made to this host so far.
  pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
  /// Every packet sent so far, along with the name of the player it was sent
  /// to.
  pub fn sent(&self) -> Vec<(String, Value)> { self.sent.lock().clone() }
  pub fn api_calls(&self) -> Vec<ApiCall> { self.api_calls.lock().clone() }

  fn is_missing(&self, name: &str) -> bool { self.missing.lock().contains(name) }
  fn call(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }

  fn cached_static(&self, key: String, f: impl FnOnce() -> Object) -> Object {
    self.statics.lock().entry(key).or_insert_with(f).clone()
  }
}

fn instance(class: &str, kind: &str, args: Vec<Value>) -> Value {
  Value::Object(Object::new(class, Instance::new(kind, args)))
}

fn player(craft_root: &str, name: &str, world: &str) -> Player {
  Player {
    name:   name.into(),
    world:  world.into(),
    handle: Object::new(
      format!("{craft_root}.entity.CraftPlayer"),
      Instance::new("CraftPlayer", vec![Value::Str(name.into())]),
    ),
  }
}

impl Reflector for FakeHost {
  fn find_class(&self, name: &str) -> Result<Class, HostError> {
    self.call();
    let class = Class::new(name);
    if self.is_missing(name) || self.is_missing(class.simple_name()) {
      return Err(HostError::ClassNotFound(name.into()));
    }
    Ok(class)
  }
  fn find_constructor(&self, class: &Class, params: &[Type]) -> Result<Constructor, HostError> {
    self.call();
    if self.is_missing(&format!("{}.<init>", class.simple_name())) {
      return Err(HostError::NoSuchConstructor(class.name().into()));
    }
    Ok(Constructor { class: class.clone(), params: params.to_vec() })
  }
  fn find_method(&self, class: &Class, name: &str, params: &[Type]) -> Result<Method, HostError> {
    self.call();
    if self.is_missing(&format!("{}.{name}", class.simple_name())) {
      return Err(HostError::NoSuchMethod(class.name().into(), name.into()));
    }
    Ok(Method { class: class.clone(), name: name.into(), params: params.to_vec() })
  }
  fn find_field(&self, class: &Class, name: &str, declared: bool) -> Result<Field, HostError> {
    self.call();
    if self.is_missing(&format!("{}.{name}", class.simple_name())) {
      return Err(HostError::NoSuchField(class.name().into(), name.into()));
    }
    Ok(Field { class: class.clone(), name: name.into(), declared })
  }

  fn get_field(&self, field: &Field, receiver: Option<&Value>) -> Result<Value, HostError> {
    self.call();
    let class = field.class.simple_name();
    match receiver {
      None => {
        let key = format!("{class}.{}", field.name);
        let obj = match class {
          "IRegistry" | "BuiltInRegistries" => self.cached_static(key, || {
            Object::new(field.class.name(), Registry { field: field.name.clone() })
          }),
          "Blocks" => self.cached_static(key, || {
            Object::new(
              field.class.name(),
              Instance::new("Block", vec![Value::Str(field.name.clone())]),
            )
          }),
          "EnumParticle" => self.cached_static(key, || {
            Object::new(
              field.class.name(),
              Instance::new("EnumParticle", vec![Value::Str(field.name.clone())]),
            )
          }),
          _ => return Err(HostError::Invocation(format!("no static value for {key}"))),
        };
        Ok(Value::Object(obj))
      }
      Some(receiver) => {
        let inst = receiver
          .as_object()
          .and_then(|o| o.downcast_ref::<Instance>())
          .filter(|i| i.kind == "EntityPlayer")
          .ok_or_else(|| HostError::WrongArguments(field.name.clone(), "not a player".into()))?;
        let name = match &inst.args[0] {
          Value::Str(name) => name.clone(),
          _ => unreachable!(),
        };
        if self.offline.lock().contains(&name) {
          return Ok(Value::Null);
        }
        Ok(Value::Object(Object::new("PlayerConnection", Connection { player: name })))
      }
    }
  }

  fn construct(&self, ctor: &Constructor, args: &[Value]) -> Result<Value, HostError> {
    self.call();
    let name = ctor.class.name();
    if args.len() != ctor.params.len() {
      return Err(HostError::WrongArguments(
        name.into(),
        format!("expected {} arguments, got {}", ctor.params.len(), args.len()),
      ));
    }
    for (ty, arg) in ctor.params.iter().zip(args) {
      if !ty.accepts(arg) {
        return Err(HostError::WrongArguments(name.into(), format!("{arg:?} is not a {ty:?}")));
      }
    }
    Ok(instance(name, ctor.class.simple_name(), args.to_vec()))
  }

  fn invoke(
    &self,
    method: &Method,
    receiver: Option<&Value>,
    args: &[Value],
  ) -> Result<Value, HostError> {
    self.call();
    let obj = receiver.and_then(|r| r.as_object());
    if let Some(registry) = obj.and_then(|o| o.downcast_ref::<Registry>()) {
      let key = match args.first().map(Instance::of) {
        Some(Instance { args, .. }) => match args.first() {
          Some(Value::Str(key)) => key.clone(),
          _ => return Err(HostError::WrongArguments(method.name.clone(), "bad key".into())),
        },
        None => return Err(HostError::WrongArguments(method.name.clone(), "no key".into())),
      };
      if self.is_missing(&key) {
        return Ok(Value::Null);
      }
      let entry = self
        .entries
        .lock()
        .entry((registry.field.clone(), key.clone()))
        .or_insert_with(|| {
          Object::new(
            "RegistryEntry",
            Instance::new("RegistryEntry", vec![Value::Str(registry.field.clone()), Value::Str(key)]),
          )
        })
        .clone();
      return Ok(Value::Object(entry));
    }
    if let Some(conn) = obj.and_then(|o| o.downcast_ref::<Connection>()) {
      if self.fail_sends.lock().contains(&conn.player) {
        return Err(HostError::Invocation("connection closed".into()));
      }
      let delay = *self.send_delay.lock();
      thread::sleep(delay);
      let packet = args.first().cloned().unwrap_or(Value::Null);
      self.sent.lock().push((conn.player.clone(), packet));
      return Ok(Value::Null);
    }
    let inst = obj.and_then(|o| o.downcast_ref::<Instance>());
    match (method.name.as_str(), inst) {
      ("getHandle", Some(inst)) if inst.kind == "CraftPlayer" => {
        Ok(instance("EntityPlayer", "EntityPlayer", inst.args.clone()))
      }
      ("getHandle", Some(inst)) if inst.kind == "CraftEntity" => {
        Ok(instance("Entity", "Entity", inst.args.clone()))
      }
      ("asNMSCopy", None) => Ok(instance("ItemStack", "NmsItemStack", args.to_vec())),
      (_, Some(inst)) if inst.kind == "Block" || inst.kind == "RegistryEntry" => {
        Ok(instance("IBlockData", "BlockData", vec![receiver.cloned().unwrap_or(Value::Null)]))
      }
      (name, _) => Err(HostError::Invocation(format!("unexpected call to {name}"))),
    }
  }
}

impl Server for FakeHost {
  fn bukkit_version(&self) -> String { format!("{}-R0.1-SNAPSHOT", self.ver) }
  fn craftbukkit_package(&self) -> String { self.craft_root() }
  fn online_players(&self) -> Vec<Player> {
    self.call();
    self.players.lock().clone()
  }
  fn spawn_particle(
    &self,
    player: &Player,
    particle: &str,
    location: &Location,
    amount: i32,
  ) -> Result<(), HostError> {
    self.call();
    self.api_calls.lock().push(ApiCall {
      player: player.name.clone(),
      particle: particle.into(),
      location: location.clone(),
      amount,
    });
    Ok(())
  }
}

/// Creates a fake host and a runtime for it, using the embedded mapping table.
pub fn runtime(ver: Version) -> (Arc<FakeHost>, Runtime) {
  let host = Arc::new(FakeHost::new(ver));
  let rt = runtime_for(&host);
  (host, rt)
}

/// Creates a runtime for an existing fake host. This is useful for marking
/// symbols as missing before they are resolved.
pub fn runtime_for(host: &Arc<FakeHost>) -> Runtime {
  let ver = host.ver;
  let mappings = Mappings::embedded(ver).unwrap();
  let intro = super::Introspect::new(host.clone(), ver, &host.craft_root(), &host.nms_version());
  Runtime::new(intro, mappings, ver, true)
}

/// Creates an entity that the runtime's host will accept.
pub fn entity(rt: &Runtime, id: i32) -> Entity {
  Entity {
    id,
    handle: Object::new(
      format!("{}.entity.CraftEntity", rt.intro().craft_root()),
      Instance::new("CraftEntity", vec![Value::Int(id)]),
    ),
  }
}

pub fn item(material: Material, data: i8) -> ItemStack {
  ItemStack {
    handle: Object::new(
      "org.bukkit.inventory.ItemStack",
      Instance::new("BukkitItemStack", vec![Value::Str(material.name.clone())]),
    ),
    material,
    data,
  }
}
