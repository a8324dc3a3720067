//! The process-wide type catalog.

use crate::catalog::TypeCatalog;
use crate::descriptor::TypeOrigin;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;

// Created and seeded on first access, exactly once.
static GLOBAL_CATALOG: Lazy<Arc<TypeCatalog>> = Lazy::new(|| {
  tracing::debug!("initializing global type catalog");
  let catalog = TypeCatalog::new();
  seed_library_types(&catalog);
  Arc::new(catalog)
});

/// Library types every catalog built by the loader knows about.
fn seed_library_types(catalog: &TypeCatalog) {
  catalog
    .register_default::<HashMap<String, String>>("HashMap", TypeOrigin::Library)
    .register_default::<Vec<String>>("Vec", TypeOrigin::Library);
}

/// Provides the global type catalog.
///
/// `Container::new()` goes through this function, so types registered here
/// are visible to every default container.
///
/// # Examples
///
/// ```
/// use autowire_ioc::{global_catalog, injectable, Container};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Clock;
/// injectable!(Clock);
///
/// global_catalog().register::<Clock>();
///
/// let container = Container::new();
/// container.set("Clock");
/// assert_eq!(*container.get::<Clock>("Clock").unwrap(), Clock);
/// ```
pub fn global_catalog() -> Arc<TypeCatalog> {
  Arc::clone(&GLOBAL_CATALOG)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn loader_runs_once_and_is_shared() {
    let a = global_catalog();
    let b = global_catalog();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.contains("HashMap"));
    assert_eq!(a.is_instantiable("Vec"), Some(true));
  }
}
