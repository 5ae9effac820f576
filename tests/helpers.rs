//! Test utilities shared by the scenario tests

use async_trait::async_trait;
use scm_installer::{CommandOutput, CommandRunner, CommandSpec, InstallProfile, StepError};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Mock command runner that records every invocation instead of spawning
/// processes, and can be scripted to fail a specific command.
pub struct MockRunner {
    fail_on: Option<(String, i32)>,
    invocations: Arc<Mutex<Vec<String>>>,
}

impl MockRunner {
    /// Runner where every command succeeds
    pub fn succeeding() -> Self {
        Self {
            fail_on: None,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Runner that fails the first command whose rendered command line
    /// contains the given fragment
    pub fn failing_on(fragment: &str, code: i32) -> Self {
        Self {
            fail_on: Some((fragment.to_string(), code)),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle onto the recorded command lines, usable after the runner has
    /// been moved into the engine
    pub fn invocations(&self) -> Arc<Mutex<Vec<String>>> {
        self.invocations.clone()
    }
}

#[async_trait]
impl CommandRunner for MockRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, StepError> {
        let line = spec.display();
        self.invocations.lock().unwrap().push(line.clone());

        if let Some((fragment, code)) = &self.fail_on {
            if line.contains(fragment) {
                return Err(StepError::CommandFailed {
                    program: spec.program.clone(),
                    code: *code,
                    stderr: String::new(),
                });
            }
        }

        Ok(CommandOutput::default())
    }
}

/// Stock profile pointed at a temporary systemd unit directory so tests
/// never touch /etc
pub fn profile_in(unit_dir: &Path) -> InstallProfile {
    InstallProfile {
        unit_dir: unit_dir.to_path_buf(),
        ..InstallProfile::default()
    }
}
