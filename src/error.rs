//! Error taxonomy for scheduling runs.
//!
//! Errors fall into three groups:
//! - **Input errors** (`InvalidJob`, `InvalidCalendar`, `CycleDetected`,
//!   `UnknownJob`): caller-fixable, reported before any scheduling starts.
//! - **Infeasibility** (`Infeasible`): the constraint system admits no
//!   solution. Surfaced as-is, never retried by the engine.
//! - **Solver failure** (`SolverError`): the LP backend failed internally.
//!   Safe to retry with the same input; the engine itself never retries.
//!
//! A swarm run that leaves some jobs unscheduled is *not* an error — see
//! [`SwarmOutcome`](crate::solver::SwarmOutcome).

use thiserror::Error;

/// Any failure produced by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// A job violates a structural invariant (duration bounds, window order,
    /// duplicate resource demands).
    #[error("invalid job '{id}': {reason}")]
    InvalidJob {
        /// Offending job ID.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A calendar period set is malformed (empty period or overlap).
    #[error("invalid calendar: {reason}")]
    InvalidCalendar {
        /// What is wrong with it.
        reason: String,
    },

    /// The dependency graph contains a cycle. `path` names the offending
    /// cycle in edge order, first node repeated at the end.
    #[error("dependency cycle: {}", .path.join(" -> "))]
    CycleDetected {
        /// The cycle, in traversal order.
        path: Vec<String>,
    },

    /// A job lists a dependency that does not exist in the job set.
    #[error("unknown job '{id}' referenced as a dependency")]
    UnknownJob {
        /// The missing job ID.
        id: String,
    },

    /// The exact solver proved that no feasible assignment exists.
    #[error("no feasible assignment satisfies the constraints")]
    Infeasible,

    /// The LP backend failed for an internal reason.
    #[error("solver failure: {0}")]
    SolverError(String),
}

impl ScheduleError {
    /// Whether this error is caller-fixable bad input (as opposed to an
    /// infeasibility proof or a backend failure).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidJob { .. }
                | ScheduleError::InvalidCalendar { .. }
                | ScheduleError::CycleDetected { .. }
                | ScheduleError::UnknownJob { .. }
        )
    }
}
