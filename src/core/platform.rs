//! Installation directory resolution per platform

use std::path::PathBuf;
use thiserror::Error;

/// Operating system the installer is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Windows,
    MacOs,
    Unknown,
}

impl Platform {
    /// Detect the platform the process is running on
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS identifier to a platform
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "windows" => Platform::Windows,
            "macos" => Platform::MacOs,
            _ => Platform::Unknown,
        }
    }
}

/// Errors that prevent resolving an installation directory
///
/// Every variant is fatal: no step can run without a valid install root,
/// so the binary exits immediately when resolution fails.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Windows is not supported by this installer yet.")]
    WindowsUnsupported,

    #[error("macOS is not supported by SnailyCAD Manager.")]
    MacOsUnsupported,

    #[error("unknown platform")]
    UnknownPlatform,

    #[error("could not determine the home directory")]
    NoHomeDirectory,
}

/// Directory name under the invoking user's home
pub const INSTALL_DIR_NAME: &str = ".snailycad-manager";

/// Resolve the absolute installation root for the given platform
///
/// Pure computation: the directory is not created here, that is the
/// pipeline's first step.
pub fn install_dir(platform: Platform) -> Result<PathBuf, PlatformError> {
    let home = match platform {
        Platform::Linux => dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)?,
        Platform::Windows => return Err(PlatformError::WindowsUnsupported),
        Platform::MacOs => return Err(PlatformError::MacOsUnsupported),
        Platform::Unknown => return Err(PlatformError::UnknownPlatform),
    };

    Ok(home.join(INSTALL_DIR_NAME))
}
