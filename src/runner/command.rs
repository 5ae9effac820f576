//! System command runner - spawns external binaries and waits for exit

use crate::runner::{CommandOutput, StepError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Description of one subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name, resolved via PATH
    pub program: String,

    /// Fixed argument list
    pub args: Vec<String>,

    /// Working directory, if the command runs inside the install root
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[String]) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: PathBuf) -> Self {
        self.cwd = Some(cwd);
        self
    }

    /// One-line rendering for logs and error messages
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Trait for running external commands - allows mocking in tests
///
/// The contract is uniform across all steps: run the command to
/// completion and return a structured result. The exit code is the sole
/// success signal; a non-zero exit is a `StepError::CommandFailed`.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, StepError>;
}

/// Runner that spawns real subprocesses with tokio
///
/// No timeout is applied: a hung child hangs the whole run. The installer
/// accepts this, there is nothing sensible to do with a half-finished
/// install anyway.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, StepError> {
        debug!("Spawning `{}`", spec.display());

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).kill_on_drop(true);
        if let Some(cwd) = &spec.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await.map_err(|e| StepError::Spawn {
            program: spec.program.clone(),
            source: e,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            warn!("`{}` exited with code {}", spec.display(), code);
            return Err(StepError::CommandFailed {
                program: spec.program.clone(),
                code,
                stderr,
            });
        }

        debug!(
            "`{}` succeeded ({} bytes of output)",
            spec.display(),
            stdout.len()
        );

        Ok(CommandOutput { stdout, stderr })
    }
}
