//! The binding registry: identifier to binding, nothing more.

use crate::core::Binding;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

#[derive(Default)]
pub(crate) struct Registry {
  bindings: DashMap<String, Binding>,
}

impl Registry {
  /// Inserts or overwrites. `None` binds the identifier to itself.
  pub(crate) fn set(&self, identifier: &str, binding: Option<Binding>) {
    self
      .bindings
      .insert(identifier.to_owned(), binding.unwrap_or(Binding::SelfRef));
  }

  /// Inserts a self-reference unless the identifier is already bound.
  /// Returns `true` if it inserted.
  pub(crate) fn insert_if_absent(&self, identifier: &str) -> bool {
    match self.bindings.entry(identifier.to_owned()) {
      Entry::Occupied(_) => false,
      Entry::Vacant(vacant) => {
        vacant.insert(Binding::SelfRef);
        true
      }
    }
  }

  pub(crate) fn has(&self, identifier: &str) -> bool {
    self.bindings.contains_key(identifier)
  }

  pub(crate) fn unset(&self, identifier: &str) {
    self.bindings.remove(identifier);
  }

  /// A copy of the binding. The shard lock is released before returning,
  /// so the caller may re-enter the registry while evaluating it.
  pub(crate) fn lookup(&self, identifier: &str) -> Option<Binding> {
    self.bindings.get(identifier).map(|entry| entry.value().clone())
  }

  pub(crate) fn len(&self) -> usize {
    self.bindings.len()
  }

  pub(crate) fn identifiers(&self) -> Vec<String> {
    self.bindings.iter().map(|entry| entry.key().clone()).collect()
  }
}
