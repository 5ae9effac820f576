//! CLI output formatting

use crate::execution::ExecutionEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✔ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✘ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create the spinner shown while a step is in flight
pub fn step_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Console reporter for execution events
///
/// Keeps at most one live spinner: the engine guarantees at most one step
/// is in flight, so the spinner always belongs to the current step.
pub struct ConsoleReporter {
    active: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(None),
        }
    }

    pub fn handle(&self, event: &ExecutionEvent) {
        match event {
            ExecutionEvent::RunStarted {
                pipeline_name,
                total_steps,
                ..
            } => {
                println!(
                    "{} Installing {} ({} steps)\n",
                    ROCKET,
                    style(pipeline_name).bold(),
                    style(total_steps).cyan()
                );
            }
            ExecutionEvent::StepStarted {
                step_number,
                total_steps,
                label,
                ..
            } => {
                let spinner = step_spinner(format!(
                    "[{}/{}] {}...",
                    step_number, total_steps, label
                ));
                *self.active.lock().unwrap() = Some(spinner);
            }
            ExecutionEvent::StepCompleted { label, .. } => {
                self.clear_spinner();
                println!("{} {}", CHECK, style(label).green());
            }
            ExecutionEvent::StepFailed { label, error, .. } => {
                self.clear_spinner();
                println!("{} {}: {}", CROSS, style(label).red(), style(error).dim());
            }
            ExecutionEvent::RunCompleted { .. } => {}
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.active.lock().unwrap().take() {
            spinner.finish_and_clear();
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
