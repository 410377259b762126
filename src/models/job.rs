//! Production job model.
//!
//! A job is a unit of production work with a duration (fixed or uncertain),
//! resource demands, precedence dependencies, and optional deadline and
//! start-window constraints. Jobs carry their schedule outputs
//! (`start_time`/`end_time`) which stay unset until a solver commits them.
//!
//! # Duration Model
//!
//! Duration is a tagged type selected by pattern match:
//! - [`DurationModel::Fixed`] — deterministic processing time.
//! - [`DurationModel::Range`] — uncertain time with `[min, max]` bounds;
//!   the realized duration is the midpoint.

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Job identifier.
pub type JobId = String;

/// Processing-time model for a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DurationModel {
    /// Deterministic duration (hours).
    Fixed(f64),
    /// Uncertain duration bounded by `[min, max]` (hours).
    Range {
        /// Shortest plausible duration.
        min: f64,
        /// Longest plausible duration.
        max: f64,
    },
}

impl DurationModel {
    /// Point estimate used by the exact formulation: the fixed value, or the
    /// midpoint of an uncertain range.
    pub fn estimate(&self) -> f64 {
        match *self {
            DurationModel::Fixed(d) => d,
            DurationModel::Range { min, max } => (min + max) / 2.0,
        }
    }

    /// Upper bound on the duration; defines the swarm search space.
    pub fn upper_bound(&self) -> f64 {
        match *self {
            DurationModel::Fixed(d) => d,
            DurationModel::Range { max, .. } => max,
        }
    }

    /// Lower bound on the duration.
    pub fn lower_bound(&self) -> f64 {
        match *self {
            DurationModel::Fixed(d) => d,
            DurationModel::Range { min, .. } => min,
        }
    }

    /// Whether no usable duration has been provided yet (candidates for
    /// prediction from historical records).
    pub fn is_unspecified(&self) -> bool {
        match *self {
            DurationModel::Fixed(d) => d <= 0.0,
            DurationModel::Range { .. } => false,
        }
    }
}

impl Default for DurationModel {
    fn default() -> Self {
        DurationModel::Fixed(0.0)
    }
}

/// A demand for a quantity of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDemand {
    /// Demanded resource ID.
    pub resource_id: String,
    /// Units needed simultaneously.
    pub quantity: u32,
}

impl ResourceDemand {
    /// Creates a demand for `quantity` units of a resource.
    pub fn new(resource_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            resource_id: resource_id.into(),
            quantity,
        }
    }
}

/// The allowed start interval for a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartWindow {
    /// Earliest allowed start (hours).
    pub earliest: f64,
    /// Latest allowed start (hours).
    pub latest: f64,
}

impl StartWindow {
    /// Creates a start window.
    pub fn new(earliest: f64, latest: f64) -> Self {
        Self { earliest, latest }
    }

    /// Whether a timestamp is an allowed start.
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest && time <= self.latest
    }
}

/// A job to be scheduled.
///
/// Dependencies are references by ID — a job does not own its prerequisites.
/// `level` is computed by the dependency graph, not supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Human-readable name.
    pub name: String,
    /// Depth in the dependency DAG (0 = no dependencies). Computed.
    pub level: i32,
    /// Processing-time model.
    pub duration: DurationModel,
    /// Realized duration; 0 until a solver commits the job.
    pub actual_duration: f64,
    /// Resource demands (resource IDs unique).
    pub demands: Vec<ResourceDemand>,
    /// IDs of jobs that must complete before this one starts.
    pub dependencies: Vec<JobId>,
    /// Latest completion time (hours). `None` = no deadline.
    pub deadline: Option<f64>,
    /// Allowed start interval. `None` = unconstrained.
    pub window: Option<StartWindow>,
    /// Resources that may substitute for the primary demand.
    pub alternatives: Vec<String>,
    /// Committed start time. `None` until scheduled.
    pub start_time: Option<f64>,
    /// Committed end time. `None` until scheduled.
    pub end_time: Option<f64>,
}

impl Job {
    /// Creates a new job with the given ID.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            level: 0,
            duration: DurationModel::default(),
            actual_duration: 0.0,
            demands: Vec::new(),
            dependencies: Vec::new(),
            deadline: None,
            window: None,
            alternatives: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets a deterministic duration (hours).
    pub fn with_duration(mut self, hours: f64) -> Self {
        self.duration = DurationModel::Fixed(hours);
        self
    }

    /// Sets an uncertain duration bounded by `[min, max]` (hours).
    pub fn with_duration_range(mut self, min: f64, max: f64) -> Self {
        self.duration = DurationModel::Range { min, max };
        self
    }

    /// Adds a resource demand.
    pub fn with_demand(mut self, resource_id: impl Into<String>, quantity: u32) -> Self {
        self.demands.push(ResourceDemand::new(resource_id, quantity));
        self
    }

    /// Adds a dependency on another job.
    pub fn with_dependency(mut self, job_id: impl Into<JobId>) -> Self {
        self.dependencies.push(job_id.into());
        self
    }

    /// Sets the deadline (latest completion, hours).
    pub fn with_deadline(mut self, deadline: f64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the allowed start window.
    pub fn with_window(mut self, earliest: f64, latest: f64) -> Self {
        self.window = Some(StartWindow::new(earliest, latest));
        self
    }

    /// Adds an acceptable substitute resource.
    pub fn with_alternative(mut self, resource_id: impl Into<String>) -> Self {
        self.alternatives.push(resource_id.into());
        self
    }

    /// Checks the structural invariants of this job.
    ///
    /// Fails with [`ScheduleError::InvalidJob`] if:
    /// - an uncertain duration has `min > max`,
    /// - a fixed duration is negative,
    /// - the start window has `earliest > latest`,
    /// - the deadline falls before the window opens (the job could never
    ///   both start legally and meet its deadline),
    /// - two demands name the same resource.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let invalid = |reason: String| ScheduleError::InvalidJob {
            id: self.id.clone(),
            reason,
        };

        match self.duration {
            DurationModel::Fixed(d) if d < 0.0 => {
                return Err(invalid(format!("negative duration {d}")));
            }
            DurationModel::Range { min, max } if min > max => {
                return Err(invalid(format!("min_duration {min} > max_duration {max}")));
            }
            _ => {}
        }

        if let Some(w) = self.window {
            if w.earliest > w.latest {
                return Err(invalid(format!(
                    "window earliest {} > latest {}",
                    w.earliest, w.latest
                )));
            }
            if let Some(deadline) = self.deadline {
                if deadline < w.earliest {
                    return Err(invalid(format!(
                        "deadline {} before window start {}",
                        deadline, w.earliest
                    )));
                }
            }
        }

        for (i, demand) in self.demands.iter().enumerate() {
            if self.demands[..i]
                .iter()
                .any(|d| d.resource_id == demand.resource_id)
            {
                return Err(invalid(format!(
                    "duplicate demand for resource '{}'",
                    demand.resource_id
                )));
            }
        }

        Ok(())
    }

    /// The first-demanded resource, used as the assigned resource in
    /// committed schedules.
    pub fn primary_resource(&self) -> Option<&str> {
        self.demands.first().map(|d| d.resource_id.as_str())
    }

    /// Whether this job demands the given resource.
    pub fn demands_resource(&self, resource_id: &str) -> bool {
        self.demands.iter().any(|d| d.resource_id == resource_id)
    }

    /// Deadline urgency at `now`: `1 / (time_to_deadline + 1)`, or 0 for
    /// jobs without a deadline. Higher is more urgent.
    pub fn urgency(&self, now: f64) -> f64 {
        match self.deadline {
            Some(deadline) => {
                let remaining = (deadline - now).max(0.0);
                1.0 / (remaining + 1.0)
            }
            None => 0.0,
        }
    }

    /// Swaps the primary demand to a substitute resource, preserving the
    /// demanded quantity.
    pub fn substitute_primary(&mut self, resource_id: impl Into<String>) {
        if let Some(demand) = self.demands.first_mut() {
            demand.resource_id = resource_id.into();
        }
    }
}
