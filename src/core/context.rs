//! Install context - per-run state shared across steps

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Context key for the downloaded archive file name
pub const ARCHIVE_FILE: &str = "archive_file";

/// Execution context for one installer run
///
/// Created fresh at run start, owned by the engine for the duration of the
/// run, and discarded at process exit. Steps read it; steps that produce
/// artifacts record them here for later steps. Access is strictly
/// sequential, so no locking is needed.
#[derive(Debug, Clone)]
pub struct InstallContext {
    /// Resolved installation root (absolute path)
    install_dir: PathBuf,

    /// Values produced by earlier steps (e.g. the downloaded archive)
    values: HashMap<String, String>,
}

impl InstallContext {
    /// Create a context rooted at the given installation directory
    pub fn new(install_dir: PathBuf) -> Self {
        Self {
            install_dir,
            values: HashMap::new(),
        }
    }

    /// The installation root
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Resolve a file name relative to the installation root
    pub fn path_in_install_dir(&self, file_name: &str) -> PathBuf {
        self.install_dir.join(file_name)
    }

    /// Record a value for later steps
    pub fn set_value(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    /// Look up a value recorded by an earlier step
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
