//! Core data structures shared by the registry and the resolver.

use crate::container::Container;
use crate::error::{ContainerError, Result};
use crate::instance::Instance;

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

thread_local! {
  // Identifiers currently being resolved on this thread, outermost first,
  // tagged with the id of the container resolving them.
  static RESOLVING_STACK: RefCell<Vec<(u64, String)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard that detects circular dependencies.
///
/// Entering pushes the identifier on the thread-local resolution stack, or
/// fails if it is already there for the same container. Dropping the guard
/// pops it again.
pub(crate) struct ResolutionGuard {
  container_id: u64,
}

impl ResolutionGuard {
  pub(crate) fn enter(container_id: u64, identifier: &str) -> Result<Self> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      let in_progress = stack
        .iter()
        .position(|(id, name)| *id == container_id && name == identifier);

      if let Some(start) = in_progress {
        let mut chain: Vec<String> = stack[start..]
          .iter()
          .filter(|(id, _)| *id == container_id)
          .map(|(_, name)| name.clone())
          .collect();
        chain.push(identifier.to_owned());
        return Err(ContainerError::CircularDependency { chain });
      }

      stack.push((container_id, identifier.to_owned()));
      Ok(Self { container_id })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(pos) = stack.iter().rposition(|(id, _)| *id == self.container_id) {
        stack.remove(pos);
      }
    });
  }
}

/// A factory closure. It receives the container so it can resolve other
/// bindings.
pub type Factory = Arc<dyn Fn(&Container) -> Result<Instance> + Send + Sync>;

/// What an identifier is bound to.
#[derive(Clone)]
pub enum Binding {
  /// The identifier is itself the type name to build.
  SelfRef,
  /// The identifier stands for another type name.
  Alias(String),
  /// A closure produces the value on every resolution.
  Factory(Factory),
  /// A prebuilt value, handed out unchanged.
  Value(Instance),
}

impl Binding {
  /// Wraps a typed factory.
  pub fn factory<T, F>(factory: F) -> Self
  where
    T: std::any::Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    Binding::Factory(Arc::new(move |container: &Container| factory(container).map(Instance::new)))
  }

  /// Wraps a factory returning a shared value, e.g. an `Arc<dyn Trait>`.
  pub fn shared_factory<T, F>(factory: F) -> Self
  where
    T: ?Sized + std::any::Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<T>> + Send + Sync + 'static,
  {
    Binding::Factory(Arc::new(move |container: &Container| factory(container).map(Instance::from_arc)))
  }

  /// Wraps a prebuilt value.
  pub fn value<T: std::any::Any + Send + Sync>(value: T) -> Self {
    Binding::Value(Instance::new(value))
  }

  /// The type name this binding points at when bound under `identifier`,
  /// or `None` for factories and values.
  pub fn target<'a>(&'a self, identifier: &'a str) -> Option<&'a str> {
    match self {
      Binding::SelfRef => Some(identifier),
      Binding::Alias(type_name) => Some(type_name),
      Binding::Factory(_) | Binding::Value(_) => None,
    }
  }
}

impl From<&str> for Binding {
  fn from(type_name: &str) -> Self {
    Binding::Alias(type_name.to_owned())
  }
}

impl From<String> for Binding {
  fn from(type_name: String) -> Self {
    Binding::Alias(type_name)
  }
}

impl From<Instance> for Binding {
  fn from(instance: Instance) -> Self {
    Binding::Value(instance)
  }
}

impl fmt::Debug for Binding {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Binding::SelfRef => write!(f, "SelfRef"),
      Binding::Alias(type_name) => f.debug_tuple("Alias").field(type_name).finish(),
      Binding::Factory(_) => write!(f, "Factory(..)"),
      Binding::Value(instance) => f.debug_tuple("Value").field(instance).finish(),
    }
  }
}
