use autowire_ioc::{injectable, resolve, Container, ContainerError, TypeCatalog};
use std::panic;
use std::sync::Arc;

struct UnregisteredService;
injectable!(UnregisteredService);

#[allow(dead_code)]
struct NeedsPort {
  port: u16,
}
injectable!(NeedsPort { value port: u16 });

fn main() {
  let catalog = Arc::new(TypeCatalog::new());
  catalog
    .register::<UnregisteredService>()
    .register::<NeedsPort>();
  let container = Container::with_catalog(catalog);

  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    // This line will panic!
    let _service = resolve!(container, UnregisteredService);
  }));

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `get()` method ---
  println!("\nNow, attempting to resolve using the fallible `get()` method...");

  match container.get::<UnregisteredService>("UnregisteredService") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) => println!("Correctly received an error: {err}"),
  }

  // A registered type can still fail to build.
  container.set("NeedsPort");
  match container.get::<NeedsPort>("NeedsPort") {
    Err(err @ ContainerError::DependencyHasNoDefaultValue { .. }) => {
      println!("Registered but unbuildable: {err}")
    }
    other => panic!("unexpected outcome: {:?}", other.map(|_| ())),
  }

  // A factory supplies what the constructor signature cannot.
  container.set_factory("NeedsPort", |_| Ok(NeedsPort { port: 8080 }));
  assert!(container.get::<NeedsPort>("NeedsPort").is_ok());
  println!("Factory binding resolved NeedsPort.");
}
