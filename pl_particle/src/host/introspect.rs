use super::{Class, Constructor, Field, HostError, Method, Reflector, Type, Value};
use crate::mappings::Versioned;
use pl_common::Version;
use std::{fmt, sync::Arc};

/// A total wrapper around a [`Reflector`]. None of these functions fail: any
/// error from the host is logged and turned into `None`. This is the only way
/// the rest of the crate talks to host internals, so nothing else needs to
/// handle host errors.
///
/// This also knows the two package roots of the host. Internal classes live
/// under `net.minecraft.server.<nms version>` before 1.17, and under
/// `net.minecraft` after. Wrapper classes live under the craftbukkit package.
#[derive(Clone)]
pub struct Introspect {
  reflector:  Arc<dyn Reflector>,
  nms_root:   String,
  craft_root: String,
}

impl fmt::Debug for Introspect {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Introspect")
      .field("nms_root", &self.nms_root)
      .field("craft_root", &self.craft_root)
      .finish()
  }
}

impl Introspect {
  /// Creates a facade for the given host. `craft_root` is the craftbukkit
  /// package (something like `org.bukkit.craftbukkit.v1_19_R3`), and
  /// `nms_version` is the last segment of it (`v1_19_R3`).
  pub fn new(
    reflector: Arc<dyn Reflector>,
    ver: Version,
    craft_root: &str,
    nms_version: &str,
  ) -> Self {
    let nms_root = Versioned::new(ver)
      .since(Version::V1_17, "net.minecraft".to_string())
      .or_else(format!("net.minecraft.server.{nms_version}"));
    Introspect { reflector, nms_root, craft_root: craft_root.into() }
  }

  pub fn reflector(&self) -> &Arc<dyn Reflector> { &self.reflector }
  pub fn nms_root(&self) -> &str { &self.nms_root }
  pub fn craft_root(&self) -> &str { &self.craft_root }

  fn ok<T>(&self, what: fmt::Arguments, res: Result<T, HostError>) -> Option<T> {
    match res {
      Ok(v) => Some(v),
      Err(e) => {
        debug!("{what}: {e}");
        None
      }
    }
  }

  /// Finds a class by its fully qualified name.
  pub fn class_of(&self, name: &str) -> Option<Class> {
    self.ok(format_args!("looking up class {name}"), self.reflector.find_class(name))
  }
  /// Finds a class relative to the internal package root.
  pub fn nms_class(&self, path: &str) -> Option<Class> {
    self.class_of(&format!("{}.{path}", self.nms_root))
  }
  /// Finds a class relative to the craftbukkit package root.
  pub fn craft_class(&self, path: &str) -> Option<Class> {
    self.class_of(&format!("{}.{path}", self.craft_root))
  }

  pub fn constructor_of(&self, class: &Class, params: &[Type]) -> Option<Constructor> {
    self.ok(
      format_args!("looking up constructor on {}", class.name()),
      self.reflector.find_constructor(class, params),
    )
  }
  pub fn method_of(&self, class: &Class, name: &str, params: &[Type]) -> Option<Method> {
    self.ok(
      format_args!("looking up method {name} on {}", class.name()),
      self.reflector.find_method(class, name, params),
    )
  }
  pub fn field_of(&self, class: &Class, name: &str, declared: bool) -> Option<Field> {
    self.ok(
      format_args!("looking up field {name} on {}", class.name()),
      self.reflector.find_field(class, name, declared),
    )
  }

  /// Reads a static field. A `null` value is returned as `None`.
  pub fn read_static(&self, field: &Field) -> Option<Value> {
    self.read_field(field, None)
  }
  /// Reads a field on the given receiver (or a static field, if the receiver
  /// is `None`). A `null` value is returned as `None`.
  pub fn read_field(&self, field: &Field, receiver: Option<&Value>) -> Option<Value> {
    self
      .ok(
        format_args!("reading field {} on {}", field.name, field.class.name()),
        self.reflector.get_field(field, receiver),
      )
      .filter(|v| !v.is_null())
  }

  /// Calls a constructor. This never returns `Some(Value::Null)`.
  pub fn construct(&self, ctor: &Constructor, args: &[Value]) -> Option<Value> {
    self
      .ok(
        format_args!("constructing {}", ctor.class.name()),
        self.reflector.construct(ctor, args),
      )
      .filter(|v| !v.is_null())
  }
  /// Calls a method. A `null` return value is returned as `None`, so this
  /// should not be used for methods that return nothing.
  pub fn invoke(&self, method: &Method, receiver: Option<&Value>, args: &[Value]) -> Option<Value> {
    self
      .ok(
        format_args!("calling {} on {}", method.name, method.class.name()),
        self.reflector.invoke(method, receiver, args),
      )
      .filter(|v| !v.is_null())
  }
}
