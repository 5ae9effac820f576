//! Install engine - orchestrates the entire pipeline run
//!
//! The engine is a linear state machine: steps execute strictly in
//! declared order, at most one in flight, and the first failure aborts
//! the run. Side effects of already-completed steps are deliberately
//! left in place; the installer performs no rollback.

use crate::{
    core::{ExecutionStatus, InstallContext, Pipeline, StepState},
    execution::StepExecutor,
    runner::CommandRunner,
};
use std::sync::{Arc, Mutex};
use tracing::{error, info};
use uuid::Uuid;

/// Events that occur during a pipeline run
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        run_id: Uuid,
        pipeline_name: String,
        total_steps: usize,
    },
    StepStarted {
        step_number: usize,
        total_steps: usize,
        step_id: String,
        label: String,
    },
    StepCompleted {
        step_number: usize,
        step_id: String,
        label: String,
    },
    StepFailed {
        step_number: usize,
        step_id: String,
        label: String,
        error: String,
    },
    RunCompleted {
        run_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Outcome of one pipeline run
///
/// All-or-nothing per invocation: there is no partial-success state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Every step succeeded
    Completed,
    /// A step failed; no later step ran
    Aborted {
        /// 1-indexed position of the failed step
        step_number: usize,
        step_id: String,
        reason: String,
    },
}

impl RunResult {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunResult::Completed)
    }
}

/// Main pipeline engine
pub struct InstallEngine<R> {
    executor: StepExecutor<R>,
    event_handlers: Mutex<Vec<EventHandler>>,
}

impl<R: CommandRunner> InstallEngine<R> {
    pub fn new(runner: R) -> Self {
        Self {
            executor: StepExecutor::new(runner),
            event_handlers: Mutex::new(Vec::new()),
        }
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.lock().unwrap().push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit(&self, event: ExecutionEvent) {
        let handlers = self.event_handlers.lock().unwrap();
        for handler in handlers.iter() {
            handler(event.clone());
        }
    }

    /// Execute the pipeline against the context
    pub async fn execute(&self, pipeline: &mut Pipeline, ctx: &mut InstallContext) -> RunResult {
        let run_id = pipeline.state.run_id;
        let total_steps = pipeline.len();

        info!(
            "Starting install run: {} ({}), {} steps",
            pipeline.name, run_id, total_steps
        );
        self.emit(ExecutionEvent::RunStarted {
            run_id,
            pipeline_name: pipeline.name.clone(),
            total_steps,
        });

        pipeline.state.start(total_steps);

        for index in 0..pipeline.steps.len() {
            let step = pipeline.steps[index].clone();
            let step_number = index + 1;
            let started_at = chrono::Utc::now();

            pipeline.states[index] = StepState::Running { started_at };
            self.emit(ExecutionEvent::StepStarted {
                step_number,
                total_steps,
                step_id: step.id.clone(),
                label: step.label.clone(),
            });

            match self.executor.execute(&step, ctx).await {
                Ok(()) => {
                    pipeline.states[index] = StepState::Completed {
                        started_at,
                        completed_at: chrono::Utc::now(),
                    };
                    pipeline.state.completed_steps += 1;
                    self.emit(ExecutionEvent::StepCompleted {
                        step_number,
                        step_id: step.id.clone(),
                        label: step.label.clone(),
                    });
                }
                Err(e) => {
                    let reason = e.to_string();
                    error!("Step {} failed: {}", step.id, reason);

                    pipeline.states[index] = StepState::Failed {
                        error: reason.clone(),
                        failed_at: chrono::Utc::now(),
                    };
                    pipeline.state.abort();

                    self.emit(ExecutionEvent::StepFailed {
                        step_number,
                        step_id: step.id.clone(),
                        label: step.label.clone(),
                        error: reason.clone(),
                    });
                    self.emit(ExecutionEvent::RunCompleted {
                        run_id,
                        status: ExecutionStatus::Aborted,
                    });

                    return RunResult::Aborted {
                        step_number,
                        step_id: step.id,
                        reason,
                    };
                }
            }
        }

        pipeline.state.complete();
        info!("Install run finished: {} - Completed", pipeline.name);
        self.emit(ExecutionEvent::RunCompleted {
            run_id,
            status: ExecutionStatus::Completed,
        });

        RunResult::Completed
    }
}
