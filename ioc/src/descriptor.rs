//! Constructor metadata produced by the type catalog.

use crate::catalog::Injectable;
use crate::error::{ContainerError, Result};
use crate::instance::Instance;

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a type comes from: the application, or a library the application
/// links against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeOrigin {
  User,
  Library,
}

/// How a constructor parameter is typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
  /// A type the catalog can build. Always resolved through the container.
  Class { type_name: String, origin: TypeOrigin },
  /// A built-in value type. Filled from its default, if any.
  Primitive { type_name: &'static str },
  /// No declared type. Treated like a primitive.
  Untyped,
}

/// A single constructor parameter.
#[derive(Clone)]
pub struct Parameter {
  name: String,
  kind: ParameterKind,
  default: Option<Instance>,
}

impl Parameter {
  /// A class-typed parameter referring to `type_name` in the catalog.
  pub fn class(name: impl Into<String>, type_name: impl Into<String>, origin: TypeOrigin) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Class {
        type_name: type_name.into(),
        origin,
      },
      default: None,
    }
  }

  /// A class-typed parameter for an `Injectable` type.
  pub fn object<T: Injectable>(name: impl Into<String>) -> Self {
    Self::class(name, T::type_name(), T::origin())
  }

  /// A primitive parameter of type `T`.
  pub fn primitive<T: Any>(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Primitive {
        type_name: type_name::<T>(),
      },
      default: None,
    }
  }

  /// A parameter with no declared type.
  pub fn untyped(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: ParameterKind::Untyped,
      default: None,
    }
  }

  /// Declares a default value. Class-typed parameters ignore it; they are
  /// always resolved.
  pub fn with_default<T: Any + Send + Sync>(mut self, value: T) -> Self {
    self.default = Some(Instance::new(value));
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn kind(&self) -> &ParameterKind {
    &self.kind
  }

  /// The declared type name, or `None` for an untyped parameter.
  pub fn declared_type(&self) -> Option<&str> {
    match &self.kind {
      ParameterKind::Class { type_name, .. } => Some(type_name),
      ParameterKind::Primitive { type_name } => Some(type_name),
      ParameterKind::Untyped => None,
    }
  }

  /// `true` for primitive and untyped parameters.
  pub fn is_builtin(&self) -> bool {
    !matches!(self.kind, ParameterKind::Class { .. })
  }

  /// The origin of a class-typed parameter.
  pub fn origin(&self) -> Option<TypeOrigin> {
    match self.kind {
      ParameterKind::Class { origin, .. } => Some(origin),
      _ => None,
    }
  }

  pub fn has_default(&self) -> bool {
    self.default.is_some()
  }

  pub fn default_value(&self) -> Option<&Instance> {
    self.default.as_ref()
  }
}

impl fmt::Debug for Parameter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Parameter")
      .field("name", &self.name)
      .field("kind", &self.kind)
      .field("has_default", &self.has_default())
      .finish()
  }
}

/// Builds an instance from its resolved arguments.
pub type Constructor = fn(&mut Arguments) -> Result<Instance>;

/// Everything the resolver needs to know about a catalogued type.
///
/// A descriptor is built fresh by every `TypeCatalog::describe` call.
#[derive(Clone)]
pub struct TypeDescriptor {
  pub(crate) type_name: String,
  pub(crate) origin: TypeOrigin,
  pub(crate) parameters: Vec<Parameter>,
  pub(crate) constructor: Option<Constructor>,
}

impl TypeDescriptor {
  pub fn type_name(&self) -> &str {
    &self.type_name
  }

  pub fn origin(&self) -> TypeOrigin {
    self.origin
  }

  pub fn is_instantiable(&self) -> bool {
    self.constructor.is_some()
  }

  /// Constructor parameters in declaration order.
  pub fn parameters(&self) -> &[Parameter] {
    &self.parameters
  }

  /// Calls the constructor with positional arguments.
  pub fn instantiate(&self, arguments: Vec<Instance>) -> Result<Instance> {
    let constructor = self
      .constructor
      .ok_or_else(|| ContainerError::DependencyIsNotInstantiable {
        type_name: self.type_name.clone(),
      })?;
    constructor(&mut Arguments::new(self.type_name.clone(), arguments))
  }
}

impl fmt::Debug for TypeDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("TypeDescriptor")
      .field("type_name", &self.type_name)
      .field("origin", &self.origin)
      .field("instantiable", &self.is_instantiable())
      .field("parameters", &self.parameters)
      .finish()
  }
}

/// The ordered argument list handed to a constructor.
///
/// Arguments are consumed front to back in the order the parameters were
/// declared.
pub struct Arguments {
  owner: String,
  values: std::vec::IntoIter<Instance>,
  index: usize,
}

impl Arguments {
  pub fn new(owner: impl Into<String>, values: Vec<Instance>) -> Self {
    Self {
      owner: owner.into(),
      values: values.into_iter(),
      index: 0,
    }
  }

  /// The type being constructed.
  pub fn owner(&self) -> &str {
    &self.owner
  }

  pub fn remaining(&self) -> usize {
    self.values.len()
  }

  /// Takes the next argument without inspecting its type.
  pub fn next_instance(&mut self) -> Result<Instance> {
    let index = self.index;
    let value = self.values.next().ok_or_else(|| ContainerError::MissingArgument {
      owner: self.owner.clone(),
      index,
    })?;
    self.index += 1;
    Ok(value)
  }

  /// Takes the next argument as a shared `T`.
  pub fn object<T: ?Sized + Any + Send + Sync>(&mut self) -> Result<Arc<T>> {
    let index = self.index;
    let instance = self.next_instance()?;
    instance
      .downcast::<T>()
      .ok_or_else(|| ContainerError::TypeMismatch {
        identifier: format!("{}#{}", self.owner, index),
        expected: type_name::<T>(),
        found: instance.type_name(),
      })
  }

  /// Takes the next argument as an owned `T`.
  pub fn value<T: Clone + Any + Send + Sync>(&mut self) -> Result<T> {
    self.object::<T>().map(|shared| (*shared).clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn classification_follows_the_declared_kind() {
    let class = Parameter::class("db", "Database", TypeOrigin::User);
    assert!(!class.is_builtin());
    assert_eq!(class.declared_type(), Some("Database"));
    assert_eq!(class.origin(), Some(TypeOrigin::User));

    let primitive = Parameter::primitive::<u32>("retries").with_default(3u32);
    assert!(primitive.is_builtin());
    assert_eq!(primitive.declared_type(), Some("u32"));
    assert!(primitive.has_default());
    assert_eq!(primitive.origin(), None);

    let untyped = Parameter::untyped("anything");
    assert!(untyped.is_builtin());
    assert_eq!(untyped.declared_type(), None);
    assert!(!untyped.has_default());
  }

  #[test]
  fn arguments_are_consumed_in_order() {
    let mut args = Arguments::new(
      "Pair",
      vec![Instance::new(7u8), Instance::new(String::from("seven"))],
    );

    assert_eq!(args.value::<u8>().unwrap(), 7);
    assert_eq!(args.value::<String>().unwrap(), "seven");
    assert_eq!(args.remaining(), 0);
    assert_eq!(
      args.next_instance().unwrap_err(),
      ContainerError::MissingArgument {
        owner: "Pair".into(),
        index: 2
      }
    );
  }

  #[test]
  fn wrong_argument_type_is_reported() {
    let mut args = Arguments::new("Holder", vec![Instance::new(1i64)]);
    let err = args.value::<String>().unwrap_err();
    assert_eq!(
      err,
      ContainerError::TypeMismatch {
        identifier: "Holder#0".into(),
        expected: type_name::<String>(),
        found: type_name::<i64>(),
      }
    );
  }
}
