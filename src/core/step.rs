//! Step domain model

use std::path::PathBuf;

/// A single step in the installation pipeline
///
/// Steps are immutable once defined; runtime progress lives in the
/// pipeline's state, not here.
#[derive(Debug, Clone)]
pub struct Step {
    /// Unique step identifier
    pub id: String,

    /// Human-readable label shown while the step runs
    pub label: String,

    /// The action this step performs
    pub action: StepAction,
}

impl Step {
    pub fn new(id: &str, label: &str, action: StepAction) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            action,
        }
    }
}

/// The one external action a step wraps
///
/// Every variant runs to completion and reports a structured result; the
/// executor treats subprocess invocations and file writes through the same
/// success/failure contract.
#[derive(Debug, Clone)]
pub enum StepAction {
    /// Create the installation root if it does not exist
    EnsureInstallDir,

    /// Fetch the release archive into the install root and record its path
    DownloadArchive { url: String, file_name: String },

    /// Unpack the archive recorded by the download step
    ExtractArchive,

    /// Invoke an external binary and treat its exit code as the outcome
    RunCommand {
        program: String,
        args: Vec<String>,
        in_install_dir: bool,
    },

    /// Write the systemd unit file to the configured unit directory
    WriteServiceUnit { unit_path: PathBuf, contents: String },

    /// Write an executable start script into the install root
    ///
    /// The write is flushed and the executable bit set before the step
    /// reports success; the permission change is sequenced strictly after
    /// the write.
    WriteStartScript { file_name: String, contents: String },
}
