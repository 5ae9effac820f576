//! Step outcome and error types

use std::path::PathBuf;
use thiserror::Error;

/// Error raised by a step
///
/// Every variant is terminal for the run: the pipeline has no transient
/// error class, no retry, and no rollback.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("`{program}` exited with code {code}{}", format_stderr(.stderr))]
    CommandFailed {
        program: String,
        code: i32,
        stderr: String,
    },

    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing context value `{0}` (produced by an earlier step)")]
    MissingContextValue(&'static str),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Captured output of a finished subprocess
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}
