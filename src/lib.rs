//! scm-installer - one-shot Linux installer for SnailyCAD Manager

pub mod cli;
pub mod core;
pub mod execution;
pub mod runner;

// Re-export commonly used types
pub use crate::core::platform::{Platform, PlatformError};
pub use crate::core::profile::{InstallProfile, LaunchMode};
pub use crate::core::{
    ExecutionStatus, InstallContext, Pipeline, RunState, Step, StepAction, StepState,
};
pub use crate::execution::{ExecutionEvent, InstallEngine, RunResult, StepExecutor};
pub use crate::runner::{CommandOutput, CommandRunner, CommandSpec, StepError, SystemRunner};
