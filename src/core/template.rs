//! Generated artifact templates
//!
//! The unit file and start script are opaque text formats as far as the
//! pipeline is concerned; they are rendered once at pipeline construction
//! and written verbatim by the corresponding steps.

use crate::core::profile::{InstallProfile, LaunchMode};
use std::path::Path;

/// File name of the generated start script inside the install root
pub const START_SCRIPT_NAME: &str = "start.sh";

/// Render the systemd unit file for this profile
pub fn service_unit(profile: &InstallProfile, install_dir: &Path) -> String {
    let exec_start = match profile.launch {
        LaunchMode::ManagerCli => "scm start".to_string(),
        LaunchMode::StartScript => install_dir.join(START_SCRIPT_NAME).display().to_string(),
    };

    format!(
        "[Unit]\n\
         Description=SnailyCAD Manager Service\n\
         Wants=network.target\n\
         After=syslog.target network-online.target\n\
         \n\
         [Service]\n\
         Type=simple\n\
         WorkingDirectory={working_dir}\n\
         ExecStart={exec_start}\n\
         Restart=on-failure\n\
         RestartSec=10\n\
         KillMode=process\n\
         \n\
         [Install]\n\
         WantedBy=multi-user.target\n",
        working_dir = install_dir.display(),
        exec_start = exec_start,
    )
}

/// Render the start script: shebang, cd into the install root, start
pub fn start_script(install_dir: &Path) -> String {
    format!(
        "#!/bin/bash\n\
         cd \"{dir}\"\n\
         exec pnpm start\n",
        dir = install_dir.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn install_dir() -> PathBuf {
        PathBuf::from("/home/x/.snailycad-manager")
    }

    #[test]
    fn test_unit_has_all_sections() {
        let unit = service_unit(&InstallProfile::default(), &install_dir());
        assert!(unit.starts_with("[Unit]\n"));
        assert!(unit.contains("\n[Service]\n"));
        assert!(unit.contains("\n[Install]\n"));
        assert!(unit.contains("WantedBy=multi-user.target"));
    }

    #[test]
    fn test_unit_exec_start_for_manager_cli() {
        let unit = service_unit(&InstallProfile::default(), &install_dir());
        assert!(unit.contains("ExecStart=scm start\n"));
        assert!(unit.contains("WorkingDirectory=/home/x/.snailycad-manager\n"));
    }

    #[test]
    fn test_unit_exec_start_for_start_script() {
        let profile = InstallProfile {
            launch: LaunchMode::StartScript,
            ..InstallProfile::default()
        };
        let unit = service_unit(&profile, &install_dir());
        assert!(unit.contains("ExecStart=/home/x/.snailycad-manager/start.sh\n"));
    }

    #[test]
    fn test_start_script_shape() {
        let script = start_script(&install_dir());
        assert!(script.starts_with("#!/bin/bash\n"));
        assert!(script.contains("cd \"/home/x/.snailycad-manager\"\n"));
        assert!(script.ends_with("exec pnpm start\n"));
    }
}
