//! # Autowire IoC
//!
//! An auto-wiring Inversion of Control (IoC) container for Rust.
//!
//! Identifiers are bound to type names, factories or prebuilt values. When
//! an identifier bound to a type name is resolved, the container looks the
//! type up in its [`TypeCatalog`], resolves every class-typed constructor
//! parameter through itself (registering it on the fly if nothing is bound
//! to it yet), fills primitive parameters from their declared defaults and
//! calls the constructor.
//!
//! ## Core Concepts
//!
//! - **Container**: holds the bindings and resolves identifiers.
//! - **Type catalog**: describes, ahead of time, how each type is built.
//!   The [`injectable!`] macro writes those descriptions for you.
//! - **Global catalog**: a process-wide catalog used by `Container::new()`,
//!   accessible via [`global_catalog()`].
//! - **Bindings**: a type name (self or alias), a factory receiving the
//!   container, or a prebuilt value. Singletons are prebuilt values produced
//!   once.
//!
//! ## Quick Start
//!
//! ```
//! use autowire_ioc::{injectable, Container, TypeCatalog};
//! use std::sync::Arc;
//!
//! struct Config;
//! injectable!(Config);
//!
//! struct Mailer {
//!   config: Arc<Config>,
//!   retries: u8,
//! }
//! injectable!(Mailer {
//!   inject config: Config,
//!   value retries: u8 = 3,
//! });
//!
//! let catalog = Arc::new(TypeCatalog::new());
//! catalog.register::<Config>().register::<Mailer>();
//! let container = Container::with_catalog(catalog);
//!
//! // Bind the identifier to the type of the same name...
//! container.set("Mailer");
//! let mailer = container.get::<Mailer>("Mailer").unwrap();
//! assert_eq!(mailer.retries, 3);
//!
//! // ...and `Config` was registered along the way.
//! assert!(container.has("Config"));
//!
//! // Factories take over when automatic wiring is not enough.
//! container.set_factory("mailer.urgent", |c| {
//!   Ok(Mailer { config: c.get("Config")?, retries: 10 })
//! });
//! assert_eq!(container.get::<Mailer>("mailer.urgent").unwrap().retries, 10);
//! ```

mod access;
mod catalog;
mod config;
mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod instance;
mod macros;
mod registry;
mod singleton;

pub use access::IndexAccess;
pub use catalog::{Injectable, TypeCatalog};
pub use config::{AutoRegister, ContainerBuilder, ContainerConfig};
pub use container::Container;
pub use crate::core::{Binding, Factory};
pub use descriptor::{Arguments, Constructor, Parameter, ParameterKind, TypeDescriptor, TypeOrigin};
pub use error::{ContainerError, Result};
pub use global::global_catalog;
pub use instance::Instance;
