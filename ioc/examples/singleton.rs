use autowire_ioc::{injectable, Container, TypeCatalog};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

impl RequestTracker {
  fn new() -> Self {
    println!("Creating RequestTracker...");
    Self {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  }
}

impl autowire_ioc::Injectable for RequestTracker {
  fn type_name() -> &'static str {
    "RequestTracker"
  }
  fn construct(_args: &mut autowire_ioc::Arguments) -> autowire_ioc::Result<Self> {
    Ok(Self::new())
  }
}

struct Handler {
  tracker: Arc<RequestTracker>,
}
injectable!(Handler {
  inject tracker: RequestTracker as "tracker.singleton",
});

fn main() -> autowire_ioc::Result<()> {
  let catalog = Arc::new(TypeCatalog::new());
  catalog.register::<RequestTracker>().register::<Handler>();
  let container = Container::with_catalog(catalog);

  // --- Singleton Binding ---
  // The tracker is built once, right here.
  container.singletonize("tracker.singleton", "RequestTracker")?;

  // --- Type Binding ---
  // Resolving a type name builds a fresh tracker every time.
  container.set("RequestTracker");

  println!("--- Resolving Singletons ---");
  let s1 = container.get::<RequestTracker>("tracker.singleton")?;
  let s2 = container.get::<RequestTracker>("tracker.singleton")?;
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Fresh Instances ---");
  let t1 = container.get::<RequestTracker>("RequestTracker")?;
  let t2 = container.get::<RequestTracker>("RequestTracker")?;
  println!("Fresh 1 ID: {}, Fresh 2 ID: {}", t1.id, t2.id);
  assert!(!Arc::ptr_eq(&t1, &t2), "Fresh instances should be different");

  println!("--- Injecting the Singleton ---");
  container.set("Handler");
  let handler = container.get::<Handler>("Handler")?;
  assert!(Arc::ptr_eq(&handler.tracker, &s1));
  println!("Handler received singleton tracker {}.", handler.tracker.id);
  Ok(())
}
