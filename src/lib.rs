pub mod diagnostics;
pub mod error;
pub mod example_module;
pub mod report;

pub use diagnostics::DiagnosticSink;
pub use error::{ModuleError, Result};
pub use example_module::{AnyClass, ExampleModule, INIT_MESSAGE, LOAD_MESSAGE, any_function, module};
pub use report::SurfaceReport;
