//! Declarative macros for describing injectable types and resolving them.

/// Implements [`Injectable`](crate::Injectable) from a constructor signature.
///
/// Each parameter is written as `<kind> <field>: <type>`, in constructor
/// order:
///
/// - `inject field: Type` resolves `Type` through the container. The field
///   must be an `Arc<Type>` and `Type` must itself be `Injectable`.
/// - `inject field: dyn Trait as "Name"` resolves the identifier `Name` and
///   expects the binding to produce an `Arc<dyn Trait>`.
/// - `value field: Type` is a primitive with no default. Resolution fails
///   with `DependencyHasNoDefaultValue` unless a factory is bound instead.
/// - `value field: Type = expr` is a primitive filled from `expr`.
///
/// The type is catalogued under its own name, or under the name given after
/// `as`. The name is not module-qualified: two types with the same name
/// registered in one catalog replace each other, so give one of them an
/// explicit `as` name.
///
/// Types are `TypeOrigin::User` unless `in Library` follows the name. The
/// same suffix on a `dyn Trait as "Name"` parameter marks the named binding
/// as a library type, which matters under `AutoRegister::LibraryOnly`:
///
/// ```
/// use autowire_ioc::{injectable, Injectable, TypeOrigin};
///
/// struct Pool;
/// injectable!(Pool as "db.Pool" in Library);
///
/// assert_eq!(Pool::type_name(), "db.Pool");
/// assert_eq!(Pool::origin(), TypeOrigin::Library);
/// ```
///
/// # Examples
///
/// ```
/// use autowire_ioc::{injectable, Container, TypeCatalog};
/// use std::sync::Arc;
///
/// #[derive(Debug, PartialEq)]
/// struct Database;
/// injectable!(Database);
///
/// struct Repository {
///   db: Arc<Database>,
///   page_size: usize,
/// }
/// injectable!(Repository {
///   inject db: Database,
///   value page_size: usize = 50,
/// });
///
/// let catalog = Arc::new(TypeCatalog::new());
/// catalog.register::<Database>().register::<Repository>();
///
/// let container = Container::with_catalog(catalog);
/// container.set("Repository");
///
/// let repo = container.get::<Repository>("Repository").unwrap();
/// assert_eq!(repo.page_size, 50);
/// assert_eq!(*repo.db, Database);
/// assert!(container.has("Database"));
/// ```
#[macro_export]
macro_rules! injectable {
  // A type whose constructor takes no parameters.
  ($type:ident $(as $name:literal)? $(in $origin:ident)?) => {
    $crate::injectable!($type $(as $name)? $(in $origin)? {});
  };

  ($type:ident $(as $name:literal)? $(in $origin:ident)? {
    $( $kind:ident $field:ident : $ty:ty $(as $dep:literal $(in $dep_origin:ident)?)? $(= $default:expr)? ),* $(,)?
  }) => {
    impl $crate::Injectable for $type {
      fn type_name() -> &'static str {
        $crate::__injectable_name!($type $(, $name)?)
      }

      $(
        fn origin() -> $crate::TypeOrigin {
          $crate::TypeOrigin::$origin
        }
      )?

      fn parameters() -> ::std::vec::Vec<$crate::Parameter> {
        ::std::vec![
          $( $crate::__injectable_parameter!($kind $field : $ty $(as $dep $(in $dep_origin)?)? $(= $default)?) ),*
        ]
      }

      #[allow(unused_variables)]
      fn construct(args: &mut $crate::Arguments) -> $crate::Result<Self> {
        ::std::result::Result::Ok($type {
          $( $field: $crate::__injectable_argument!(args, $kind $ty), )*
        })
      }
    }
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __injectable_name {
  ($type:ident) => {
    stringify!($type)
  };
  ($type:ident, $name:literal) => {
    $name
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __injectable_parameter {
  (inject $field:ident : $ty:ty) => {
    $crate::Parameter::object::<$ty>(stringify!($field))
  };
  (inject $field:ident : $ty:ty as $dep:literal) => {
    $crate::Parameter::class(stringify!($field), $dep, $crate::TypeOrigin::User)
  };
  (inject $field:ident : $ty:ty as $dep:literal in $origin:ident) => {
    $crate::Parameter::class(stringify!($field), $dep, $crate::TypeOrigin::$origin)
  };
  (value $field:ident : $ty:ty) => {
    $crate::Parameter::primitive::<$ty>(stringify!($field))
  };
  (value $field:ident : $ty:ty = $default:expr) => {
    $crate::Parameter::primitive::<$ty>(stringify!($field)).with_default::<$ty>($default)
  };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __injectable_argument {
  ($args:ident, inject $ty:ty) => {
    $args.object::<$ty>()?
  };
  ($args:ident, value $ty:ty) => {
    $args.value::<$ty>()?
  };
}

/// Resolves a dependency from a container, panicking if it cannot be
/// resolved.
///
/// `resolve!(container, Type)` resolves the identifier
/// `<Type as Injectable>::type_name()`; `resolve!(container, Type, "id")`
/// resolves `"id"`. For a version that does not panic, call
/// `Container::get` directly.
///
/// # Examples
///
/// ```
/// use autowire_ioc::{resolve, Container};
///
/// let container = Container::new();
/// container.set_value("greeting", String::from("hello"));
///
/// let greeting = resolve!(container, String, "greeting");
/// assert_eq!(*greeting, "hello");
/// ```
#[macro_export]
macro_rules! resolve {
  ($container:expr, $type:ty, $identifier:expr) => {
    match $identifier {
      identifier => match $container.get::<$type>(identifier) {
        ::std::result::Result::Ok(value) => value,
        ::std::result::Result::Err(err) => panic!(
          "Failed to resolve required service '{}' as {}: {}",
          identifier,
          ::std::any::type_name::<$type>(),
          err
        ),
      },
    }
  };

  ($container:expr, $type:ty) => {
    $crate::resolve!(
      $container,
      $type,
      <$type as $crate::Injectable>::type_name()
    )
  };
}
