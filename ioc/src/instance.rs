//! The type-erased value handed out by the container.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A resolved value.
///
/// The payload is stored as a boxed `Arc<T>` (so `T` may be a trait object),
/// and cloning an `Instance` shares that `Arc`. Downcasting the same
/// instance twice yields pointer-equal `Arc`s, which is what singleton
/// bindings rely on.
#[derive(Clone)]
pub struct Instance {
  inner: Arc<dyn Any + Send + Sync>,
  type_name: &'static str,
}

impl Instance {
  /// Wraps an owned value.
  pub fn new<T: Any + Send + Sync>(value: T) -> Self {
    Self::from_arc(Arc::new(value))
  }

  /// Wraps an already shared value. `T` may be unsized, e.g. `dyn Trait`.
  pub fn from_arc<T: ?Sized + Any + Send + Sync>(value: Arc<T>) -> Self {
    Self {
      inner: Arc::new(value),
      type_name: type_name::<T>(),
    }
  }

  /// Returns the shared value if it was stored as `T`.
  pub fn downcast<T: ?Sized + Any + Send + Sync>(&self) -> Option<Arc<T>> {
    self.inner.downcast_ref::<Arc<T>>().cloned()
  }

  /// Returns `true` if the value was stored as `T`.
  pub fn is<T: ?Sized + Any + Send + Sync>(&self) -> bool {
    self.inner.is::<Arc<T>>()
  }

  /// The Rust type name of the stored value.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// Returns `true` if both instances share the same allocation.
  pub fn ptr_eq(&self, other: &Instance) -> bool {
    Arc::ptr_eq(&self.inner, &other.inner)
  }
}

impl fmt::Debug for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Instance")
      .field("type_name", &self.type_name)
      .finish_non_exhaustive()
  }
}
