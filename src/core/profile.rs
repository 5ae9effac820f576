//! Install profile loaded from YAML
//!
//! The upstream installer shipped as three near-identical script revisions
//! that differed only in which steps were included. The profile replaces
//! those forks: one step catalog, with the optional steps (firewall rule,
//! global CLI link, start-script launch) switched on here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::Result;

/// How the installed service is launched by systemd
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchMode {
    /// `ExecStart` invokes the globally linked manager CLI (`scm start`)
    ManagerCli,
    /// `ExecStart` invokes a generated start script inside the install root
    StartScript,
}

impl Default for LaunchMode {
    fn default() -> Self {
        LaunchMode::ManagerCli
    }
}

/// Configuration for one installer run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallProfile {
    /// Service name registered with systemd (also the unit file stem)
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Release archive URL
    #[serde(default = "default_download_url")]
    pub download_url: String,

    /// File name the archive is downloaded to inside the install root
    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    /// Directory the systemd unit file is written to
    #[serde(default = "default_unit_dir")]
    pub unit_dir: PathBuf,

    /// Launch variant
    #[serde(default)]
    pub launch: LaunchMode,

    /// Open the manager's UI port with ufw
    #[serde(default)]
    pub open_firewall: bool,

    /// Port for the firewall rule
    #[serde(default = "default_firewall_port")]
    pub firewall_port: u16,

    /// Link the manager CLI globally with pnpm
    #[serde(default)]
    pub link_cli: bool,
}

fn default_service_name() -> String {
    "snailycad-manager".to_string()
}

fn default_download_url() -> String {
    "https://github.com/SnailyCAD-Manager/v3/releases/latest/download/linux.tar.gz".to_string()
}

fn default_archive_name() -> String {
    "linux.tar.gz".to_string()
}

fn default_unit_dir() -> PathBuf {
    PathBuf::from("/etc/systemd/system")
}

fn default_firewall_port() -> u16 {
    60120
}

impl Default for InstallProfile {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            download_url: default_download_url(),
            archive_name: default_archive_name(),
            unit_dir: default_unit_dir(),
            launch: LaunchMode::default(),
            open_firewall: false,
            firewall_port: default_firewall_port(),
            link_cli: false,
        }
    }
}

impl InstallProfile {
    /// Load a profile from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a profile from a YAML string
    ///
    /// An empty document yields the stock profile.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let profile: InstallProfile = if yaml.trim().is_empty() {
            InstallProfile::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Validate the profile
    pub fn validate(&self) -> Result<()> {
        if self.service_name.is_empty() {
            anyhow::bail!("service_name must not be empty");
        }
        if !self
            .service_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            anyhow::bail!(
                "service_name '{}' contains characters systemd will reject",
                self.service_name
            );
        }
        if !self.download_url.starts_with("https://") {
            anyhow::bail!("download_url must be an https:// URL");
        }
        if self.archive_name.is_empty() || self.archive_name.contains('/') {
            anyhow::bail!("archive_name must be a bare file name");
        }
        if self.open_firewall && self.firewall_port == 0 {
            anyhow::bail!("firewall_port must be non-zero");
        }
        Ok(())
    }

    /// Path of the systemd unit file this profile installs
    pub fn unit_path(&self) -> PathBuf {
        self.unit_dir.join(format!("{}.service", self.service_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_upstream() {
        let profile = InstallProfile::default();
        assert_eq!(profile.service_name, "snailycad-manager");
        assert!(profile.download_url.ends_with("linux.tar.gz"));
        assert_eq!(profile.archive_name, "linux.tar.gz");
        assert_eq!(profile.launch, LaunchMode::ManagerCli);
        assert!(!profile.open_firewall);
        assert!(!profile.link_cli);
        assert_eq!(
            profile.unit_path(),
            PathBuf::from("/etc/systemd/system/snailycad-manager.service")
        );
    }

    #[test]
    fn test_empty_yaml_is_the_stock_profile() {
        let profile = InstallProfile::from_yaml("").unwrap();
        assert_eq!(profile.service_name, "snailycad-manager");
    }

    #[test]
    fn test_parse_full_profile() {
        let yaml = r#"
service_name: "snailycad-manager"
launch: start-script
open_firewall: true
firewall_port: 60120
link_cli: true
"#;
        let profile = InstallProfile::from_yaml(yaml).unwrap();
        assert_eq!(profile.launch, LaunchMode::StartScript);
        assert!(profile.open_firewall);
        assert!(profile.link_cli);
    }

    #[test]
    fn test_rejects_http_url() {
        let yaml = r#"
download_url: "http://example.com/linux.tar.gz"
"#;
        assert!(InstallProfile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_bad_service_name() {
        let yaml = r#"
service_name: "snaily cad"
"#;
        assert!(InstallProfile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_archive_name_with_path() {
        let yaml = r#"
archive_name: "../linux.tar.gz"
"#;
        assert!(InstallProfile::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let yaml = r#"
service_nmae: "typo"
"#;
        assert!(InstallProfile::from_yaml(yaml).is_err());
    }
}
