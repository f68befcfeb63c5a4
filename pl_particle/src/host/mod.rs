//! The boundary between this library and the host server.
//!
//! Everything the marshaller knows about the host goes through two traits.
//! [`Reflector`] is the raw reflective facility, which finds classes, methods,
//! fields and constructors by name, and calls them. [`Server`] is the host's
//! public scripting api, which is used to find players, detect the version,
//! and as a fallback for sending particles.
//!
//! Neither trait is used directly by the rest of the crate. Instead, all
//! lookups go through [`Introspect`], which turns every failure into `None`.

mod introspect;

#[cfg(test)]
pub mod fake;

pub use introspect::Introspect;

use pl_common::math::Location;
use std::{any::Any, fmt, sync::Arc};
use thiserror::Error;

/// An error from the host. None of these ever reach a caller of the builder.
/// They are logged (at debug level for lookups) and turned into `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
  #[error("class not found: {0}")]
  ClassNotFound(String),
  #[error("no such method {1} on {0}")]
  NoSuchMethod(String, String),
  #[error("no such field {1} on {0}")]
  NoSuchField(String, String),
  #[error("no matching constructor on {0}")]
  NoSuchConstructor(String),
  #[error("wrong arguments for {0}: {1}")]
  WrongArguments(String, String),
  #[error("invocation failed: {0}")]
  Invocation(String),
}

/// An opaque object that lives inside the host. This is cheap to clone, and
/// two objects are only equal if they point to the same host value.
///
/// Hosts store whatever they need inside of this, and get it back with
/// [`downcast_ref`](Self::downcast_ref).
#[derive(Clone)]
pub struct Object {
  class: Arc<str>,
  inner: Arc<dyn Any + Send + Sync>,
}

impl Object {
  pub fn new<T: Any + Send + Sync>(class: impl Into<Arc<str>>, value: T) -> Self {
    Object { class: class.into(), inner: Arc::new(value) }
  }

  /// The fully qualified class name of this object.
  pub fn class(&self) -> &str { &self.class }

  pub fn downcast_ref<T: Any>(&self) -> Option<&T> { self.inner.downcast_ref() }
}

impl PartialEq for Object {
  fn eq(&self, other: &Object) -> bool { Arc::ptr_eq(&self.inner, &other.inner) }
}

impl fmt::Debug for Object {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Object({})", self.class) }
}

/// A value passed to or returned from the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i32),
  Float(f32),
  Double(f64),
  IntArray(Vec<i32>),
  Str(String),
  Object(Object),
}

impl Value {
  /// The value used to mean "there is no native parameter, put the data
  /// somewhere else". This is an empty int array, which is also what old
  /// packets expect when a particle has no extra data.
  pub fn empty() -> Value { Value::IntArray(vec![]) }

  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  pub fn as_object(&self) -> Option<&Object> {
    match self {
      Value::Object(o) => Some(o),
      _ => None,
    }
  }
  pub fn as_int_array(&self) -> Option<&[i32]> {
    match self {
      Value::IntArray(v) => Some(v),
      _ => None,
    }
  }
}

impl From<Object> for Value {
  fn from(o: Object) -> Self { Value::Object(o) }
}

/// A parameter type, used to pick between overloaded methods and
/// constructors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
  Bool,
  Int,
  Float,
  Double,
  IntArray,
  Str,
  Object(Class),
}

impl Type {
  /// Returns true if the given value can be passed as this type. `Null` can be
  /// passed for any object type.
  pub fn accepts(&self, value: &Value) -> bool {
    match (self, value) {
      (Type::Bool, Value::Bool(_)) => true,
      (Type::Int, Value::Int(_)) => true,
      (Type::Float, Value::Float(_)) => true,
      (Type::Double, Value::Double(_)) => true,
      (Type::IntArray, Value::IntArray(_)) => true,
      (Type::Str, Value::Str(_)) => true,
      (Type::Object(_), Value::Object(_) | Value::Null) => true,
      _ => false,
    }
  }
}

/// A resolved class. Handles are plain descriptors: resolving the same name
/// twice produces two equal handles.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Class {
  name: Arc<str>,
}

impl Class {
  pub fn new(name: impl Into<Arc<str>>) -> Self { Class { name: name.into() } }
  pub fn name(&self) -> &str { &self.name }
  /// The class name without its package.
  pub fn simple_name(&self) -> &str { self.name.rsplit('.').next().unwrap_or(&self.name) }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constructor {
  pub class:  Class,
  pub params: Vec<Type>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Method {
  pub class:  Class,
  pub name:   String,
  pub params: Vec<Type>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
  pub class:    Class,
  pub name:     String,
  pub declared: bool,
}

/// The host's reflective facility. Every lookup either returns a handle that
/// is known to exist, or an error.
pub trait Reflector: Send + Sync {
  fn find_class(&self, name: &str) -> Result<Class, HostError>;
  fn find_constructor(&self, class: &Class, params: &[Type]) -> Result<Constructor, HostError>;
  fn find_method(&self, class: &Class, name: &str, params: &[Type]) -> Result<Method, HostError>;
  /// Finds a field. If `declared` is set, private fields declared directly on
  /// this class are included, and inherited fields are not.
  fn find_field(&self, class: &Class, name: &str, declared: bool) -> Result<Field, HostError>;

  /// Reads a field. `receiver` is `None` for static fields.
  fn get_field(&self, field: &Field, receiver: Option<&Value>) -> Result<Value, HostError>;
  fn construct(&self, ctor: &Constructor, args: &[Value]) -> Result<Value, HostError>;
  /// Calls a method. `receiver` is `None` for static methods. Methods that
  /// return nothing produce [`Value::Null`].
  fn invoke(
    &self,
    method: &Method,
    receiver: Option<&Value>,
    args: &[Value],
  ) -> Result<Value, HostError>;
}

/// A player on the host. `handle` is the host's wrapper object for this
/// player (a `CraftPlayer`).
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
  pub name:   String,
  pub world:  String,
  pub handle: Object,
}

/// An entity on the host. `handle` is the host's wrapper object (a
/// `CraftEntity`), and `id` is the network entity id.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
  pub id:     i32,
  pub handle: Object,
}

/// A material from the host's public api. `id` is the pre-1.13 numeric id,
/// which is only used on old versions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Material {
  pub name:  String,
  pub id:    i32,
  pub block: bool,
}

impl Material {
  pub fn new(name: impl Into<String>, id: i32, block: bool) -> Self {
    Material { name: name.into(), id, block }
  }
  pub fn block(name: impl Into<String>, id: i32) -> Self { Material::new(name, id, true) }
  pub fn item(name: impl Into<String>, id: i32) -> Self { Material::new(name, id, false) }

  pub fn barrier() -> Self { Material::block("BARRIER", 166) }
  /// Light blocks were added in 1.17, so they have no legacy id.
  pub fn light() -> Self { Material::block("LIGHT", 0) }

  pub fn is_block(&self) -> bool { self.block }
}

/// An item stack from the host's public api. `handle` is the host's object
/// for this stack, which is converted to the internal form when needed.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemStack {
  pub material: Material,
  /// The legacy damage value. Only used before 1.13.
  pub data:     i8,
  pub handle:   Object,
}

/// The host's public scripting api.
pub trait Server: Send + Sync {
  /// The version string of the host, such as `1.19.4-R0.1-SNAPSHOT`.
  fn bukkit_version(&self) -> String;
  /// The package of the host's wrapper classes, such as
  /// `org.bukkit.craftbukkit.v1_19_R3`.
  fn craftbukkit_package(&self) -> String;
  fn online_players(&self) -> Vec<Player>;
  /// Spawns a particle for a single player through the public api. `particle`
  /// is the name of the api's particle enum constant.
  fn spawn_particle(
    &self,
    player: &Player,
    particle: &str,
    location: &Location,
    amount: i32,
  ) -> Result<(), HostError>;
}
