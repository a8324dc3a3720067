use autowire_ioc::{
  injectable, Arguments, Binding, Container, ContainerError, Injectable, Parameter, TypeCatalog,
  TypeOrigin,
};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Fixtures ---

#[derive(Debug, Default, PartialEq)]
struct Plain;
injectable!(Plain);

#[derive(Debug, PartialEq)]
struct ConstructorLess;
injectable!(ConstructorLess);

#[derive(Debug, PartialEq)]
struct WithInjected {
  plain: Arc<Plain>,
  other: Arc<ConstructorLess>,
}
injectable!(WithInjected {
  inject plain: Plain,
  inject other: ConstructorLess,
});

#[derive(Debug, PartialEq)]
struct WithPrimitive {
  count: i64,
  other: Arc<ConstructorLess>,
}
injectable!(WithPrimitive {
  value count: i64 = 3,
  inject other: ConstructorLess,
});

#[allow(dead_code)]
#[derive(Debug)]
struct WithoutDefault {
  count: i64,
}
injectable!(WithoutDefault { value count: i64 });

// Untyped parameters, described by hand.
#[derive(Debug, PartialEq)]
struct Loose {
  v: i32,
}

impl Injectable for Loose {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::untyped("v").with_default(9i32)]
  }
  fn construct(args: &mut Arguments) -> autowire_ioc::Result<Self> {
    Ok(Loose { v: args.value()? })
  }
}

#[allow(dead_code)]
#[derive(Debug)]
struct Bare {
  x: i32,
}

impl Injectable for Bare {
  fn parameters() -> Vec<Parameter> {
    vec![Parameter::untyped("x")]
  }
  fn construct(args: &mut Arguments) -> autowire_ioc::Result<Self> {
    Ok(Bare { x: args.value()? })
  }
}

fn container() -> Container {
  let catalog = Arc::new(TypeCatalog::new());
  catalog
    .register::<Plain>()
    .register::<ConstructorLess>()
    .register::<WithInjected>()
    .register::<WithPrimitive>()
    .register::<WithoutDefault>()
    .register_as::<Loose>("Loose")
    .register_as::<Bare>("Bare")
    .register_abstract("Repository", TypeOrigin::User);
  Container::with_catalog(catalog)
}

// --- Basic Tests ---

#[test]
fn test_unregistered_identifier_is_not_found() {
  let container = container();

  assert!(!container.has("Plain"));
  let err = container.get::<Plain>("Plain").unwrap_err();
  assert_eq!(
    err,
    ContainerError::DependencyNotRegistered {
      identifier: "Plain".into()
    }
  );
  assert!(err.is_not_found());
}

#[test]
fn test_self_binding_builds_a_fresh_instance() {
  // Arrange
  let container = container();
  container.set("ConstructorLess");

  // Act
  let built = container.get::<ConstructorLess>("ConstructorLess").unwrap();

  // Assert
  assert_eq!(*built, ConstructorLess);
}

#[test]
fn test_alias_binding_builds_the_target_type() {
  let container = container();
  container.alias("dummy", "Plain");

  assert_eq!(*container.get::<Plain>("dummy").unwrap(), Plain);
  // The alias does not register the target itself.
  assert!(!container.has("Plain"));
}

#[test]
fn test_type_bindings_build_a_new_instance_every_time() {
  let container = container();
  container.set("Plain");

  let a = container.get::<Plain>("Plain").unwrap();
  let b = container.get::<Plain>("Plain").unwrap();
  assert_eq!(a, b);
  assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_class_dependencies_are_registered_on_the_fly() {
  // Arrange: only the top-level type is bound.
  let container = container();
  container.set("WithInjected");

  // Act
  let built = container.get::<WithInjected>("WithInjected").unwrap();

  // Assert
  assert_eq!(
    *built,
    WithInjected {
      plain: Arc::new(Plain),
      other: Arc::new(ConstructorLess),
    }
  );
  assert!(container.has("Plain"));
  assert!(container.has("ConstructorLess"));
}

#[test]
fn test_registered_dependencies_are_used_as_bound() {
  // Arrange: `ConstructorLess` is overridden by a factory that counts calls.
  let container = container();
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  container.set("WithInjected");
  container.set_factory("ConstructorLess", move |_| {
    counter.fetch_add(1, Ordering::SeqCst);
    Ok(ConstructorLess)
  });

  // Act
  container.get::<WithInjected>("WithInjected").unwrap();

  // Assert
  assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_primitive_parameters_take_their_default() {
  let container = container();
  container.set("WithPrimitive");

  let built = container.get::<WithPrimitive>("WithPrimitive").unwrap();

  assert_eq!(
    *built,
    WithPrimitive {
      count: 3,
      other: Arc::new(ConstructorLess),
    }
  );
}

#[test]
fn test_primitive_parameter_without_default_fails() {
  let container = container();
  container.set("WithoutDefault");

  let err = container.get::<WithoutDefault>("WithoutDefault").unwrap_err();

  assert_eq!(
    err,
    ContainerError::DependencyHasNoDefaultValue {
      parameter: "count".into(),
      owner: "WithoutDefault".into(),
    }
  );
}

#[test]
fn test_untyped_parameter_takes_its_default() {
  let container = container();
  container.set("Loose");

  let built = container.get::<Loose>("Loose").unwrap();

  assert_eq!(*built, Loose { v: 9 });
}

#[test]
fn test_untyped_parameter_without_default_fails() {
  let container = container();
  container.set("Bare");

  let err = container.get::<Bare>("Bare").unwrap_err();

  assert_eq!(
    err,
    ContainerError::DependencyHasNoDefaultValue {
      parameter: "x".into(),
      owner: "Bare".into(),
    }
  );
}

#[test]
fn test_factory_receives_the_container_on_every_call() {
  // Arrange
  let container = container();
  let calls = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&calls);
  container.set_value("greeting", String::from("hello"));
  container.set_factory("message", move |c| {
    counter.fetch_add(1, Ordering::SeqCst);
    let greeting = c.get::<String>("greeting")?;
    Ok(format!("{greeting}, world"))
  });

  // Act
  let first = container.get::<String>("message").unwrap();
  let second = container.get::<String>("message").unwrap();

  // Assert
  assert_eq!(*first, "hello, world");
  assert_eq!(first, second);
  assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_factories_compose() {
  // Arrange: a chain of factories, each resolving the next.
  let container = container();
  container.set_factory("factory.plain", |_| Ok(Plain));
  container.set_factory("factory.constructor_less", |_| Ok(ConstructorLess));
  container.set_factory("factory.composed", |c| {
    Ok(WithInjected {
      plain: c.get("factory.plain")?,
      other: c.get("factory.constructor_less")?,
    })
  });

  // Act
  let composed = container.get::<WithInjected>("factory.composed").unwrap();

  // Assert
  assert_eq!(
    *composed,
    WithInjected {
      plain: Arc::new(Plain),
      other: Arc::new(ConstructorLess),
    }
  );
}

#[test]
fn test_factories_sharing_a_dependency_see_the_same_value() {
  // Arrange: both branches resolve the same singleton.
  let container = container();
  container.singletonize("shared", "Plain").unwrap();
  container.bind("left", Binding::shared_factory(|c| c.get::<Plain>("shared")));
  container.bind("right", Binding::shared_factory(|c| c.get::<Plain>("shared")));
  container.set_factory("both", |c| {
    let left = c.get::<Plain>("left")?;
    let right = c.get::<Plain>("right")?;
    Ok(Arc::ptr_eq(&left, &right))
  });

  // Act & Assert
  assert!(*container.get::<bool>("both").unwrap());
}

#[test]
fn test_singletonize_returns_the_identical_instance() {
  let container = container();
  container.singletonize("plain.single", "Plain").unwrap();

  let a = container.get::<Plain>("plain.single").unwrap();
  let b = container.get::<Plain>("plain.single").unwrap();

  assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_prebuilt_values_are_returned_unchanged() {
  let container = container();
  container.set_value("port", 8080u16);

  assert_eq!(*container.get::<u16>("port").unwrap(), 8080);
}

#[test]
fn test_unset_removes_the_binding() {
  // Arrange
  let container = container();
  container.alias("dummy", "Plain");
  assert!(container.has("dummy"));
  assert_eq!(*container.get::<Plain>("dummy").unwrap(), Plain);

  // Act
  container.unset("dummy");

  // Assert
  assert!(!container.has("dummy"));
  assert!(container.get::<Plain>("dummy").unwrap_err().is_not_found());

  // Unsetting again is a no-op.
  container.unset("dummy");
}

#[test]
fn test_overwriting_a_binding_replaces_it() {
  let container = container();
  container.set_value("setting", String::from("first"));
  container.set_value("setting", String::from("second"));

  assert_eq!(*container.get::<String>("setting").unwrap(), "second");
  assert_eq!(container.len(), 1);
}

#[test]
fn test_unknown_type_name_fails() {
  let container = container();
  container.set("dummyDependency");

  let err = container.get::<Plain>("dummyDependency").unwrap_err();

  assert_eq!(
    err,
    ContainerError::DependencyClassDoesNotExist {
      type_name: "dummyDependency".into()
    }
  );
}

#[test]
fn test_abstract_type_is_not_instantiable() {
  let container = container();
  container.alias("repository", "Repository");

  let err = container.get_instance("repository").unwrap_err();

  assert_eq!(
    err,
    ContainerError::DependencyIsNotInstantiable {
      type_name: "Repository".into()
    }
  );
}

#[test]
fn test_concretize_builds_without_a_binding() {
  let container = container();

  let plain = container.concretize::<Plain>("Plain").unwrap();

  assert_eq!(*plain, Plain::default());
  assert!(!container.has("Plain"));
}

#[test]
fn test_resolve_parameter_follows_the_classification() {
  // Arrange
  let container = container();
  let descriptor = container.catalog().describe("WithPrimitive").unwrap();
  let parameters = descriptor.parameters();

  // Act
  let count = container.resolve_parameter(&parameters[0], "WithPrimitive").unwrap();
  let other = container.resolve_parameter(&parameters[1], "WithPrimitive").unwrap();

  // Assert
  assert_eq!(*count.downcast::<i64>().unwrap(), 3);
  assert_eq!(*other.downcast::<ConstructorLess>().unwrap(), ConstructorLess);
}
