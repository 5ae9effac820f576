//! Execution state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall run status
///
/// The run is a linear state machine: it only moves forward on step
/// success or jumps to Aborted on the first failure. Completed and
/// Aborted are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Run has not started
    Pending,
    /// Run is currently executing steps
    Running,
    /// All steps completed successfully
    Completed,
    /// A step failed and the run stopped
    Aborted,
}

/// State of a single step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StepState {
    /// Step has not started
    Pending,
    /// Step is currently running
    Running { started_at: DateTime<Utc> },
    /// Step completed successfully
    Completed {
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    /// Step failed, aborting the run
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

/// Overall run state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run ID
    pub run_id: Uuid,

    /// Current run status
    pub status: ExecutionStatus,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the run completed or aborted
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of steps
    pub total_steps: usize,

    /// Number of completed steps
    pub completed_steps: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            total_steps: 0,
            completed_steps: 0,
        }
    }

    /// Mark the run as started
    pub fn start(&mut self, total_steps: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
    }

    /// Mark the run as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark the run as aborted
    pub fn abort(&mut self) {
        self.status = ExecutionStatus::Aborted;
        self.completed_at = Some(Utc::now());
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_records_total_and_timestamp() {
        let mut state = RunState::new();
        state.start(8);
        assert_eq!(state.status, ExecutionStatus::Running);
        assert_eq!(state.total_steps, 8);
        assert!(state.started_at.is_some());
    }

    #[test]
    fn test_abort_is_terminal_with_timestamp() {
        let mut state = RunState::new();
        state.start(3);
        state.abort();
        assert_eq!(state.status, ExecutionStatus::Aborted);
        assert!(state.completed_at.is_some());
    }
}
