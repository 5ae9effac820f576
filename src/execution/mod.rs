//! Pipeline execution

pub mod engine;
pub mod executor;

pub use engine::{EventHandler, ExecutionEvent, InstallEngine, RunResult};
pub use executor::StepExecutor;
