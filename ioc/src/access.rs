//! Array-style access to a container.
//!
//! Rust's `Index` traits cannot fail or hand out owned values, so the
//! bracket operations are spelled out as methods: `container[key]` is
//! `offset_get`, `container[key] = value` is `offset_set`, `key in container`
//! is `offset_exists` and deleting a key is `offset_unset`.

use crate::container::Container;
use crate::core::Binding;
use crate::error::{ContainerError, Result};
use crate::instance::Instance;

pub trait IndexAccess {
  fn offset_exists(&self, key: &str) -> bool;

  fn offset_get(&self, key: &str) -> Result<Instance>;

  /// Binds `binding` under `key`.
  ///
  /// With no key, the binding must name a type; that type name becomes the
  /// key and the entry is bound to itself. Anything else fails with
  /// `KeylessBinding`.
  fn offset_set(&self, key: Option<&str>, binding: Binding) -> Result<()>;

  fn offset_unset(&self, key: &str);
}

impl IndexAccess for Container {
  fn offset_exists(&self, key: &str) -> bool {
    self.has(key)
  }

  fn offset_get(&self, key: &str) -> Result<Instance> {
    self.get_instance(key)
  }

  fn offset_set(&self, key: Option<&str>, binding: Binding) -> Result<()> {
    match (key, binding) {
      (Some(key), binding) => self.bind(key, binding),
      (None, Binding::Alias(type_name)) => self.set(&type_name),
      (None, _) => return Err(ContainerError::KeylessBinding),
    }
    Ok(())
  }

  fn offset_unset(&self, key: &str) {
    self.unset(key);
  }
}
