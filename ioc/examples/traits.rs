use autowire_ioc::{injectable, Binding, Container, TypeCatalog, TypeOrigin};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
injectable!(ConsoleLogger);

impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}
injectable!(ReportService {
  inject logger: dyn Logger as "Logger",
});

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    // ... logic to generate report ...
    self.logger.log("Finished report generation.");
  }
}

fn main() -> autowire_ioc::Result<()> {
  let catalog = Arc::new(TypeCatalog::new());
  catalog
    .register::<ConsoleLogger>()
    .register::<ReportService>()
    .register_abstract("Logger", TypeOrigin::User);
  let container = Container::with_catalog(catalog);

  // --- Registration ---

  // `Logger` is abstract, so a factory decides which implementation backs it.
  container.bind(
    "Logger",
    Binding::shared_factory(|c| {
      let logger: Arc<dyn Logger> = c.concretize::<ConsoleLogger>("ConsoleLogger")?;
      Ok(logger)
    }),
  );

  // ReportService itself needs no factory: its constructor signature says
  // what it needs.
  container.set("ReportService");

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = container.get::<ReportService>("ReportService")?;

  println!("Using the service...");
  report_service.generate_report();
  Ok(())
}
