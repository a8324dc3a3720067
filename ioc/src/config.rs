//! Container configuration and its builder.

use crate::catalog::TypeCatalog;
use crate::container::Container;
use crate::descriptor::TypeOrigin;
use crate::global::global_catalog;

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which unregistered class-typed constructor parameters the resolver
/// registers on the fly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AutoRegister {
  /// Every class-typed parameter.
  #[default]
  Always,
  /// Only types of `TypeOrigin::Library`; application types must be
  /// registered explicitly.
  LibraryOnly,
  /// None. An unregistered parameter type fails with
  /// `DependencyNotRegistered`.
  Never,
}

impl AutoRegister {
  pub(crate) fn allows(self, origin: TypeOrigin) -> bool {
    match self {
      AutoRegister::Always => true,
      AutoRegister::LibraryOnly => origin == TypeOrigin::Library,
      AutoRegister::Never => false,
    }
  }
}

/// Tunable resolver behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
  pub auto_register: AutoRegister,
  /// Fail with `CircularDependency` instead of recursing without bound.
  pub detect_cycles: bool,
}

impl Default for ContainerConfig {
  fn default() -> Self {
    Self {
      auto_register: AutoRegister::Always,
      detect_cycles: true,
    }
  }
}

/// A builder for `Container` instances.
#[derive(Default)]
pub struct ContainerBuilder {
  config: ContainerConfig,
  catalog: Option<Arc<TypeCatalog>>,
}

impl ContainerBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Uses `catalog` instead of the global one.
  pub fn catalog(mut self, catalog: Arc<TypeCatalog>) -> Self {
    self.catalog = Some(catalog);
    self
  }

  pub fn auto_register(mut self, policy: AutoRegister) -> Self {
    self.config.auto_register = policy;
    self
  }

  pub fn detect_cycles(mut self, enabled: bool) -> Self {
    self.config.detect_cycles = enabled;
    self
  }

  /// Replaces every setting at once.
  pub fn config(mut self, config: ContainerConfig) -> Self {
    self.config = config;
    self
  }

  pub fn build(self) -> Container {
    let catalog = self.catalog.unwrap_or_else(global_catalog);
    Container::from_parts(catalog, self.config)
  }
}

impl fmt::Debug for ContainerBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContainerBuilder")
      .field("config", &self.config)
      .field("custom_catalog", &self.catalog.is_some())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn policy_filters_by_origin() {
    assert!(AutoRegister::Always.allows(TypeOrigin::User));
    assert!(AutoRegister::LibraryOnly.allows(TypeOrigin::Library));
    assert!(!AutoRegister::LibraryOnly.allows(TypeOrigin::User));
    assert!(!AutoRegister::Never.allows(TypeOrigin::Library));
  }

  #[test]
  fn builder_applies_settings() {
    let container = ContainerBuilder::new()
      .auto_register(AutoRegister::Never)
      .detect_cycles(false)
      .build();
    assert_eq!(
      container.config(),
      &ContainerConfig {
        auto_register: AutoRegister::Never,
        detect_cycles: false,
      }
    );
  }

  #[cfg(feature = "serde")]
  #[test]
  fn config_round_trips_through_serde() {
    let config = ContainerConfig {
      auto_register: AutoRegister::LibraryOnly,
      detect_cycles: false,
    };

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"auto_register":"library_only","detect_cycles":false}"#);
    assert_eq!(serde_json::from_str::<ContainerConfig>(&json).unwrap(), config);

    let origin = serde_json::to_string(&TypeOrigin::Library).unwrap();
    assert_eq!(origin, r#""Library""#);
    assert_eq!(serde_json::from_str::<TypeOrigin>(&origin).unwrap(), TypeOrigin::Library);
    assert_eq!(serde_json::from_str::<AutoRegister>(r#""never""#).unwrap(), AutoRegister::Never);
  }

  #[cfg(feature = "serde")]
  #[test]
  fn partial_config_falls_back_to_defaults() {
    let partial: ContainerConfig = serde_json::from_str(r#"{"detect_cycles":false}"#).unwrap();
    assert_eq!(
      partial,
      ContainerConfig {
        auto_register: AutoRegister::Always,
        detect_cycles: false,
      }
    );

    let empty: ContainerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, ContainerConfig::default());
  }
}
