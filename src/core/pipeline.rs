//! Pipeline domain model
//!
//! A pipeline is a statically ordered list of steps built once from the
//! install profile. The `Vec` order is the execution order: the engine
//! never reorders, skips, or parallelizes.

use crate::core::{
    profile::{InstallProfile, LaunchMode},
    state::{RunState, StepState},
    step::{Step, StepAction},
    template,
};
use std::path::Path;

/// A pipeline definition plus its run state
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name (the service being installed)
    pub name: String,

    /// Ordered steps; position in the list is the execution order
    pub steps: Vec<Step>,

    /// Runtime state per step, indexed like `steps`
    pub states: Vec<StepState>,

    /// Run state
    pub state: RunState,
}

impl Pipeline {
    /// Build the step catalog for a profile
    ///
    /// Optional steps (start script, firewall rule, CLI link) are included
    /// or left out here; once built, the list is fixed for the run.
    pub fn from_profile(profile: &InstallProfile, install_dir: &Path) -> Self {
        let mut steps = Vec::new();

        steps.push(Step::new(
            "prepare-directory",
            "Preparing installation directory",
            StepAction::EnsureInstallDir,
        ));

        steps.push(Step::new(
            "download-archive",
            "Downloading files",
            StepAction::DownloadArchive {
                url: profile.download_url.clone(),
                file_name: profile.archive_name.clone(),
            },
        ));

        steps.push(Step::new(
            "extract-archive",
            "Extracting files",
            StepAction::ExtractArchive,
        ));

        steps.push(Step::new(
            "install-dependencies",
            "Installing dependencies",
            StepAction::RunCommand {
                program: "pnpm".to_string(),
                args: vec!["install".to_string(), "--prod=false".to_string()],
                in_install_dir: true,
            },
        ));

        if profile.launch == LaunchMode::StartScript {
            steps.push(Step::new(
                "write-start-script",
                "Writing start script",
                StepAction::WriteStartScript {
                    file_name: template::START_SCRIPT_NAME.to_string(),
                    contents: template::start_script(install_dir),
                },
            ));
        }

        steps.push(Step::new(
            "write-service-unit",
            "Creating service",
            StepAction::WriteServiceUnit {
                unit_path: profile.unit_path(),
                contents: template::service_unit(profile, install_dir),
            },
        ));

        steps.push(Step::new(
            "reload-service-manager",
            "Reloading services",
            StepAction::RunCommand {
                program: "systemctl".to_string(),
                args: vec!["daemon-reload".to_string()],
                in_install_dir: false,
            },
        ));

        steps.push(Step::new(
            "enable-service",
            "Enabling service",
            StepAction::RunCommand {
                program: "systemctl".to_string(),
                args: vec!["enable".to_string(), profile.service_name.clone()],
                in_install_dir: false,
            },
        ));

        steps.push(Step::new(
            "start-service",
            "Starting service",
            StepAction::RunCommand {
                program: "systemctl".to_string(),
                args: vec!["start".to_string(), profile.service_name.clone()],
                in_install_dir: false,
            },
        ));

        if profile.open_firewall {
            steps.push(Step::new(
                "open-firewall-port",
                "Opening firewall port",
                StepAction::RunCommand {
                    program: "ufw".to_string(),
                    args: vec!["allow".to_string(), profile.firewall_port.to_string()],
                    in_install_dir: false,
                },
            ));
        }

        if profile.link_cli {
            steps.push(Step::new(
                "link-cli",
                "Linking manager CLI",
                StepAction::RunCommand {
                    program: "pnpm".to_string(),
                    args: vec!["link".to_string(), "--global".to_string()],
                    in_install_dir: true,
                },
            ));
        }

        let states = vec![StepState::Pending; steps.len()];

        Pipeline {
            name: profile.service_name.clone(),
            steps,
            states,
            state: RunState::new(),
        }
    }

    /// Runtime state of the step at the given position
    pub fn step_state(&self, index: usize) -> Option<&StepState> {
        self.states.get(index)
    }

    /// Number of steps in the pipeline
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The ordered (id, label) plan for display
    pub fn plan(&self) -> Vec<(String, String)> {
        self.steps
            .iter()
            .map(|s| (s.id.clone(), s.label.clone()))
            .collect()
    }
}
