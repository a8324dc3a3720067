//! The type catalog: the container's view of which types exist and how to
//! build them.
//!
//! Rust has no runtime reflection, so every buildable type is described up
//! front, either by implementing [`Injectable`] (usually through the
//! [`injectable!`](crate::injectable) macro) or by registering it through one of
//! the `TypeCatalog::register_*` helpers.

use crate::descriptor::{Arguments, Constructor, Parameter, TypeDescriptor, TypeOrigin};
use crate::error::{ContainerError, Result};
use crate::instance::Instance;

use dashmap::DashMap;
use std::any::Any;
use std::fmt;

/// A type the container can construct by resolving its constructor
/// parameters.
pub trait Injectable: Any + Send + Sync + Sized {
  /// The name the type is catalogued and auto-registered under.
  fn type_name() -> &'static str {
    std::any::type_name::<Self>()
  }

  fn origin() -> TypeOrigin {
    TypeOrigin::User
  }

  /// Constructor parameters in declaration order.
  fn parameters() -> Vec<Parameter> {
    Vec::new()
  }

  /// Builds the value from arguments resolved for `parameters()`.
  fn construct(args: &mut Arguments) -> Result<Self>;
}

fn construct_injectable<T: Injectable>(args: &mut Arguments) -> Result<Instance> {
  T::construct(args).map(Instance::new)
}

fn construct_default<T: Default + Any + Send + Sync>(_args: &mut Arguments) -> Result<Instance> {
  Ok(Instance::new(T::default()))
}

#[derive(Clone, Copy)]
struct Entry {
  origin: TypeOrigin,
  parameters: fn() -> Vec<Parameter>,
  constructor: Option<Constructor>,
}

/// A name-keyed registry of type descriptions.
#[derive(Default)]
pub struct TypeCatalog {
  entries: DashMap<String, Entry>,
}

impl TypeCatalog {
  /// Creates a new, empty `TypeCatalog`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Catalogues `T` under `T::type_name()`.
  pub fn register<T: Injectable>(&self) -> &Self {
    self.register_as::<T>(T::type_name())
  }

  /// Catalogues `T` under an explicit name.
  pub fn register_as<T: Injectable>(&self, name: impl Into<String>) -> &Self {
    self.insert(
      name.into(),
      Entry {
        origin: T::origin(),
        parameters: T::parameters,
        constructor: Some(construct_injectable::<T>),
      },
    )
  }

  /// Catalogues a parameterless type built through its `Default` impl.
  pub fn register_default<T: Default + Any + Send + Sync>(
    &self,
    name: impl Into<String>,
    origin: TypeOrigin,
  ) -> &Self {
    self.insert(
      name.into(),
      Entry {
        origin,
        parameters: Vec::new,
        constructor: Some(construct_default::<T>),
      },
    )
  }

  /// Catalogues a type that exists but cannot be instantiated directly,
  /// such as a trait or an abstract marker.
  pub fn register_abstract(&self, name: impl Into<String>, origin: TypeOrigin) -> &Self {
    self.insert(
      name.into(),
      Entry {
        origin,
        parameters: Vec::new,
        constructor: None,
      },
    )
  }

  fn insert(&self, name: String, entry: Entry) -> &Self {
    tracing::trace!(type_name = %name, instantiable = entry.constructor.is_some(), "catalogued type");
    self.entries.insert(name, entry);
    self
  }

  pub fn contains(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  /// `Some(instantiable)` for a known type, `None` otherwise.
  pub fn is_instantiable(&self, name: &str) -> Option<bool> {
    self.entries.get(name).map(|entry| entry.constructor.is_some())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Describes `name`.
  ///
  /// Fails with `DependencyClassDoesNotExist` for an unknown name and with
  /// `DependencyIsNotInstantiable` for an abstract one.
  pub fn describe(&self, name: &str) -> Result<TypeDescriptor> {
    // Copy the entry out so no shard lock is held while `parameters()` runs.
    let entry = *self
      .entries
      .get(name)
      .ok_or_else(|| ContainerError::DependencyClassDoesNotExist {
        type_name: name.to_owned(),
      })?;

    if entry.constructor.is_none() {
      return Err(ContainerError::DependencyIsNotInstantiable {
        type_name: name.to_owned(),
      });
    }

    Ok(TypeDescriptor {
      type_name: name.to_owned(),
      origin: entry.origin,
      parameters: (entry.parameters)(),
      constructor: entry.constructor,
    })
  }
}

impl fmt::Debug for TypeCatalog {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeCatalog")
      .field("types", &self.entries.len())
      .finish()
  }
}
