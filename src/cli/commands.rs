//! CLI command definitions

use crate::core::profile::{InstallProfile, LaunchMode};
use clap::Args;
use std::path::PathBuf;

/// Optional-step switches shared by `install` and `plan`
///
/// These mirror what used to be three forked script revisions: the same
/// pipeline with the firewall, CLI-link, and start-script steps toggled.
#[derive(Debug, Args, Clone, Default)]
pub struct StepToggles {
    /// Open the manager's UI port with ufw
    #[arg(long)]
    pub firewall: bool,

    /// Link the manager CLI globally with pnpm
    #[arg(long)]
    pub link_cli: bool,

    /// Launch the service through a generated start script instead of the
    /// linked CLI
    #[arg(long)]
    pub start_script: bool,
}

impl StepToggles {
    /// Apply the switches on top of a loaded profile
    pub fn apply(&self, profile: &mut InstallProfile) {
        if self.firewall {
            profile.open_firewall = true;
        }
        if self.link_cli {
            profile.link_cli = true;
        }
        if self.start_script {
            profile.launch = LaunchMode::StartScript;
        }
    }
}

/// Run the installation pipeline
#[derive(Debug, Args, Clone)]
pub struct InstallCommand {
    /// Path to a profile YAML file (defaults to the stock profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    #[command(flatten)]
    pub toggles: StepToggles,

    /// Directory the systemd unit is written to
    #[arg(long)]
    pub unit_dir: Option<PathBuf>,
}

/// Print the ordered step list without executing anything
#[derive(Debug, Args, Clone)]
pub struct PlanCommand {
    /// Path to a profile YAML file (defaults to the stock profile)
    #[arg(short, long)]
    pub profile: Option<String>,

    #[command(flatten)]
    pub toggles: StepToggles,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a profile file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to the profile YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output the parsed profile in JSON format
    #[arg(long)]
    pub json: bool,
}
