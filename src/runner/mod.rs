//! Subprocess boundary - external binaries adapted to the step contract

pub mod command;
pub mod outcome;

pub use command::{CommandRunner, CommandSpec, SystemRunner};
pub use outcome::{CommandOutput, StepError};
