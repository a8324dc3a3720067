//! The main `Container` struct and its associated methods.

use crate::catalog::TypeCatalog;
use crate::config::{ContainerBuilder, ContainerConfig};
use crate::core::{Binding, ResolutionGuard};
use crate::descriptor::{Parameter, ParameterKind};
use crate::error::{ContainerError, Result};
use crate::instance::Instance;
use crate::registry::Registry;
use crate::singleton::Memoizer;

use std::any::{type_name, Any};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// The Inversion of Control (IoC) container.
///
/// Identifiers are bound to a type name, a factory or a prebuilt value.
/// Resolving an identifier bound to a type name builds that type from the
/// catalog, resolving each class-typed constructor parameter through the
/// container in turn and registering it on the fly if nothing is bound to
/// it yet.
///
/// The container is `Send + Sync`. No lock is held while a factory or a
/// constructor runs, so factories may call back into the container.
pub struct Container {
  id: u64,
  registry: Registry,
  catalog: Arc<TypeCatalog>,
  config: ContainerConfig,
  // Singletons built by type name, and by identifier for factories.
  types: Memoizer,
  factories: Memoizer,
}

impl Default for Container {
  fn default() -> Self {
    Self::new()
  }
}

impl Container {
  /// Creates an empty container backed by the global type catalog.
  pub fn new() -> Self {
    ContainerBuilder::new().build()
  }

  /// Creates an empty container backed by `catalog`.
  pub fn with_catalog(catalog: Arc<TypeCatalog>) -> Self {
    ContainerBuilder::new().catalog(catalog).build()
  }

  pub fn builder() -> ContainerBuilder {
    ContainerBuilder::new()
  }

  pub(crate) fn from_parts(catalog: Arc<TypeCatalog>, config: ContainerConfig) -> Self {
    Self {
      id: NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed),
      registry: Registry::default(),
      catalog,
      config,
      types: Memoizer::default(),
      factories: Memoizer::default(),
    }
  }

  pub fn catalog(&self) -> &Arc<TypeCatalog> {
    &self.catalog
  }

  pub fn config(&self) -> &ContainerConfig {
    &self.config
  }

  // --- Registration ---

  /// Binds `identifier` to itself: resolving it builds the type of the
  /// same name.
  pub fn set(&self, identifier: &str) {
    self.bind(identifier, Binding::SelfRef);
  }

  /// Binds `identifier`, replacing any previous binding.
  pub fn bind(&self, identifier: &str, binding: impl Into<Binding>) {
    let binding = binding.into();
    trace!(identifier, ?binding, "binding");
    self.factories.forget(identifier);
    self.registry.set(identifier, Some(binding));
  }

  /// Binds `identifier` to another type name.
  pub fn alias(&self, identifier: &str, type_name: impl Into<String>) {
    self.bind(identifier, Binding::Alias(type_name.into()));
  }

  /// Binds `identifier` to a factory called on every resolution.
  pub fn set_factory<T, F>(&self, identifier: &str, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    self.bind(identifier, Binding::factory(factory));
  }

  /// Binds `identifier` to a prebuilt value.
  pub fn set_value<T: Any + Send + Sync>(&self, identifier: &str, value: T) {
    self.bind(identifier, Binding::value(value));
  }

  /// Returns `true` if something is bound to `identifier`.
  ///
  /// This does not mean `get` will succeed, only that it will not fail
  /// with `DependencyNotRegistered`.
  pub fn has(&self, identifier: &str) -> bool {
    self.registry.has(identifier)
  }

  /// Removes the binding for `identifier`, if any, along with a value
  /// memoized by `singletonize_with`.
  pub fn unset(&self, identifier: &str) {
    trace!(identifier, "unbinding");
    self.factories.forget(identifier);
    self.registry.unset(identifier);
  }

  /// Number of bound identifiers, including implicitly registered ones.
  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.len() == 0
  }

  /// All bound identifiers, in no particular order.
  pub fn identifiers(&self) -> Vec<String> {
    self.registry.identifiers()
  }

  // --- Singletons ---

  /// Binds `identifier` to a single shared instance of `type_name`.
  ///
  /// The instance is built now, once per type name for the lifetime of the
  /// container: singletonizing the same type under several identifiers
  /// shares one instance. A failed build is not cached.
  pub fn singletonize(&self, identifier: &str, type_name: &str) -> Result<()> {
    let instance = self
      .types
      .get_or_try_init(type_name, || self.concretize_instance(type_name))?;
    debug!(identifier, type_name, "singleton bound");
    self.factories.forget(identifier);
    self.registry.set(identifier, Some(Binding::Value(instance)));
    Ok(())
  }

  /// Binds `identifier` to a factory whose first successful result is
  /// returned on every resolution.
  ///
  /// The factory runs lazily, on the first `get`. Two threads entering a
  /// cycle of such factories from opposite ends get `CircularDependency`
  /// rather than waiting on each other.
  pub fn singletonize_with<T, F>(&self, identifier: &str, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T> + Send + Sync + 'static,
  {
    let key = identifier.to_owned();
    self.bind(
      identifier,
      Binding::Factory(Arc::new(move |container: &Container| {
        container
          .factories
          .get_or_try_init(&key, || factory(container).map(Instance::new))
      })),
    );
  }

  // --- Resolution ---

  /// Resolves `identifier` and downcasts the result to `T`.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, identifier: &str) -> Result<Arc<T>> {
    let instance = self.get_instance(identifier)?;
    downcast(identifier, &instance)
  }

  /// Resolves `identifier`.
  ///
  /// Factories are invoked with the container, prebuilt values are returned
  /// as they are, and type names are concretized. The first failure
  /// anywhere in the object graph aborts the whole call.
  #[tracing::instrument(level = "trace", skip(self), fields(container = self.id))]
  pub fn get_instance(&self, identifier: &str) -> Result<Instance> {
    let binding = self
      .registry
      .lookup(identifier)
      .ok_or_else(|| ContainerError::not_registered(identifier))?;

    let _guard = self.guard(identifier)?;

    match binding {
      Binding::Factory(factory) => factory(self),
      Binding::Value(instance) => Ok(instance),
      Binding::SelfRef => self.concretize_instance(identifier),
      Binding::Alias(type_name) => self.concretize_instance(&type_name),
    }
  }

  /// Builds `type_name` and downcasts the result to `T`.
  pub fn concretize<T: ?Sized + Any + Send + Sync>(&self, type_name: &str) -> Result<Arc<T>> {
    let instance = self.concretize_instance(type_name)?;
    downcast(type_name, &instance)
  }

  /// Builds a fresh instance of `type_name`, resolving its constructor
  /// parameters in declaration order.
  ///
  /// Class-typed parameters that nothing is bound to are registered as
  /// self-references (subject to `ContainerConfig::auto_register`) before
  /// being resolved. Those registrations stay in place even if the build
  /// fails later on.
  pub fn concretize_instance(&self, type_name: &str) -> Result<Instance> {
    let descriptor = self.catalog.describe(type_name)?;

    if descriptor.parameters().is_empty() {
      return descriptor.instantiate(Vec::new());
    }

    let arguments = descriptor
      .parameters()
      .iter()
      .map(|parameter| self.resolve_parameter(parameter, descriptor.type_name()))
      .collect::<Result<Vec<_>>>()?;

    descriptor.instantiate(arguments)
  }

  /// Produces the argument for a single constructor parameter of `owner`.
  pub fn resolve_parameter(&self, parameter: &Parameter, owner: &str) -> Result<Instance> {
    match parameter.kind() {
      ParameterKind::Class { type_name, origin } => {
        if self.config.auto_register.allows(*origin) && self.registry.insert_if_absent(type_name) {
          debug!(type_name = %type_name, owner, "auto-registered dependency");
        }
        self.get_instance(type_name)
      }
      ParameterKind::Primitive { .. } | ParameterKind::Untyped => parameter
        .default_value()
        .cloned()
        .ok_or_else(|| ContainerError::DependencyHasNoDefaultValue {
          parameter: parameter.name().to_owned(),
          owner: owner.to_owned(),
        }),
    }
  }

  fn guard(&self, identifier: &str) -> Result<Option<ResolutionGuard>> {
    if !self.config.detect_cycles {
      return Ok(None);
    }
    ResolutionGuard::enter(self.id, identifier).map(Some)
  }
}

fn downcast<T: ?Sized + Any + Send + Sync>(identifier: &str, instance: &Instance) -> Result<Arc<T>> {
  instance
    .downcast::<T>()
    .ok_or_else(|| ContainerError::TypeMismatch {
      identifier: identifier.to_owned(),
      expected: type_name::<T>(),
      found: instance.type_name(),
    })
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("id", &self.id)
      .field("bindings", &self.registry.len())
      .field("catalog", &self.catalog)
      .field("config", &self.config)
      .finish()
  }
}
