use anyhow::{Context, Result};
use scm_installer::cli::commands::{InstallCommand, PlanCommand, ValidateCommand};
use scm_installer::cli::output::{style, ConsoleReporter, CHECK, CROSS, INFO};
use scm_installer::cli::{Cli, Command};
use scm_installer::core::platform::{self, Platform};
use scm_installer::{InstallContext, InstallEngine, InstallProfile, Pipeline, RunResult, SystemRunner};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; progress output goes through the console
    // reporter, so tracing stays quiet unless asked for.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Install(cmd) => run_install(cmd).await?,
        Command::Plan(cmd) => show_plan(cmd)?,
        Command::Validate(cmd) => validate_profile(cmd)?,
    }

    Ok(())
}

/// Resolve the install root, or stop the process on an unsupported platform
///
/// A hard stop by design: no step can succeed without a valid path.
fn resolve_install_dir() -> PathBuf {
    match platform::install_dir(Platform::current()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    }
}

fn load_profile(path: &Option<String>) -> Result<InstallProfile> {
    match path {
        Some(path) => InstallProfile::from_file(path)
            .with_context(|| format!("Failed to load profile {}", path)),
        None => Ok(InstallProfile::default()),
    }
}

async fn run_install(cmd: &InstallCommand) -> Result<()> {
    let install_dir = resolve_install_dir();

    let mut profile = load_profile(&cmd.profile)?;
    cmd.toggles.apply(&mut profile);
    if let Some(unit_dir) = &cmd.unit_dir {
        profile.unit_dir = unit_dir.clone();
    }
    profile.validate()?;

    // Clear the terminal when the installer starts
    let _ = console::Term::stdout().clear_screen();

    let mut pipeline = Pipeline::from_profile(&profile, &install_dir);
    let mut ctx = InstallContext::new(install_dir);

    let engine = InstallEngine::new(SystemRunner::new());
    let reporter = Arc::new(ConsoleReporter::new());
    engine.add_event_handler(move |event| reporter.handle(&event));

    match engine.execute(&mut pipeline, &mut ctx).await {
        RunResult::Completed => {
            println!(
                "\n{}",
                style("SnailyCAD Manager has been successfully installed on your system.")
                    .green()
            );
            Ok(())
        }
        RunResult::Aborted {
            step_number,
            step_id,
            reason,
        } => {
            println!(
                "\n{} Installation aborted at step {} ({}): {}",
                CROSS,
                style(step_number).bold(),
                style(&step_id).cyan(),
                style(&reason).red()
            );
            std::process::exit(1);
        }
    }
}

fn show_plan(cmd: &PlanCommand) -> Result<()> {
    let install_dir = resolve_install_dir();

    let mut profile = load_profile(&cmd.profile)?;
    cmd.toggles.apply(&mut profile);
    profile.validate()?;

    let pipeline = Pipeline::from_profile(&profile, &install_dir);

    if cmd.json {
        let steps: Vec<_> = pipeline
            .plan()
            .into_iter()
            .enumerate()
            .map(|(i, (id, label))| {
                serde_json::json!({ "number": i + 1, "id": id, "label": label })
            })
            .collect();
        let data = serde_json::json!({ "pipeline": pipeline.name, "steps": steps });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!(
        "{} {} would run {} steps into {}:",
        INFO,
        style(&pipeline.name).bold(),
        style(pipeline.len()).cyan(),
        style(install_dir.display()).dim()
    );
    for (i, (id, label)) in pipeline.plan().into_iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            style(label).bold(),
            style(format!("({})", id)).dim()
        );
    }

    Ok(())
}

fn validate_profile(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating profile...", INFO);

    match InstallProfile::from_file(&cmd.file) {
        Ok(profile) => {
            println!("{} Profile is valid!", CHECK);
            println!("  Service: {}", style(&profile.service_name).bold());
            println!("  Launch: {:?}", profile.launch);
            println!(
                "  Optional steps: firewall={} link-cli={}",
                style(profile.open_firewall).cyan(),
                style(profile.link_cli).cyan()
            );

            if cmd.json {
                let json = serde_json::to_string_pretty(&profile)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}
