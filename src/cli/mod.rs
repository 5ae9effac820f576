//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{InstallCommand, PlanCommand, ValidateCommand};
use std::ffi::OsString;

/// SnailyCAD Manager installer
#[derive(Debug, Parser, Clone)]
#[command(name = "scm-installer")]
#[command(version = "0.1.0")]
#[command(about = "One-shot Linux installer for SnailyCAD Manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the installation pipeline
    Install(InstallCommand),

    /// Show the steps an installation would run
    Plan(PlanCommand),

    /// Validate a profile file
    Validate(ValidateCommand),
}

impl Cli {
    /// Parse CLI arguments from the environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
