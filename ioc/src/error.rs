//! Errors raised while registering or resolving dependencies.

use thiserror::Error;

/// The error type for every fallible container operation.
///
/// The first four variants are the resolution failures proper. The rest
/// cover situations a statically typed host adds on top of them (checked
/// downcasts, cycle detection, keyless façade writes).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
  /// `get` was called for an identifier with no binding.
  #[error("dependency {identifier} is not registered")]
  DependencyNotRegistered { identifier: String },

  /// A binding points at a type name the catalog does not know.
  #[error("{type_name} does not exist")]
  DependencyClassDoesNotExist { type_name: String },

  /// A binding points at an abstract type (trait, interface marker).
  #[error("dependency {type_name} is not instantiable")]
  DependencyIsNotInstantiable { type_name: String },

  /// A primitive or untyped constructor parameter has no default value.
  #[error("dependency {parameter} of {owner} can't be instantiated and yet has no default value")]
  DependencyHasNoDefaultValue { parameter: String, owner: String },

  /// An identifier was requested while it was already being resolved
  /// further up the same call stack.
  #[error("circular dependency detected: {}", .chain.join(" -> "))]
  CircularDependency { chain: Vec<String> },

  /// The resolved value is not of the type the caller asked for.
  #[error("dependency {identifier} resolved to {found}, not {expected}")]
  TypeMismatch {
    identifier: String,
    expected: &'static str,
    found: &'static str,
  },

  /// A constructor consumed more arguments than its descriptor declares.
  #[error("constructor of {owner} requested argument #{index}, which was not supplied")]
  MissingArgument { owner: String, index: usize },

  /// An index-style write carried neither a key nor a string-like value
  /// from which one could be derived.
  #[error("a binding without a key must be a type name")]
  KeylessBinding,
}

impl ContainerError {
  /// Returns `true` for the "nothing is registered under this identifier"
  /// failure, as opposed to a failure while building a registered entry.
  pub fn is_not_found(&self) -> bool {
    matches!(self, ContainerError::DependencyNotRegistered { .. })
  }

  pub(crate) fn not_registered(identifier: &str) -> Self {
    ContainerError::DependencyNotRegistered {
      identifier: identifier.to_owned(),
    }
  }
}

/// A specialized `Result` type for container operations.
pub type Result<T, E = ContainerError> = std::result::Result<T, E>;
