//! Exact LP scheduler.
//!
//! Formulates the job set as a linear program — one non-negative continuous
//! start variable per job — and asks the LP backend for an optimal
//! assignment:
//!
//! - objective: minimize `Σ (start[j] + duration[j])` (aggregate completion);
//! - precedence: `start[p] + duration[p] <= start[j]` per dependency edge;
//! - same-level resource ordering: within a level that uses more than one
//!   distinct primary resource, jobs sharing a primary resource get equal
//!   start times. A simplification that synchronizes rather than serializes
//!   same-resource starts; the repair pass below restores mutual exclusion;
//! - start-window bounds on the start variable where a job declares one.
//!
//! The backend is reached through `good_lp`'s `SolverModel` seam, so any
//! enabled backend substitutes by feature flag; the default is the pure-Rust
//! `microlp` simplex.

use std::collections::{BTreeMap, HashMap};

use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable};
use log::{debug, info, warn};

use crate::arena::JobArena;
use crate::error::ScheduleError;
use crate::graph::DependencyGraph;
use crate::models::{JobId, Schedule, ScheduleEntry};

/// Result of an exact solving run.
#[derive(Debug, Clone)]
pub struct ExactOutcome {
    /// The committed (and repaired) schedule.
    pub schedule: Schedule,
    /// The LP objective value: sum of completion times as optimized,
    /// i.e. measured *before* the repair pass. The repaired schedule is
    /// not re-optimized.
    pub objective: f64,
}

/// Exact constraint-optimization scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactScheduler;

impl ExactScheduler {
    /// Creates an exact scheduler.
    pub fn new() -> Self {
        Self
    }

    /// Solves the job set to optimality and commits start/end times back
    /// into the arena.
    ///
    /// Fails with [`ScheduleError::Infeasible`] when the constraint system
    /// admits no solution and [`ScheduleError::SolverError`] on a backend
    /// failure. Input errors (cycles, unknown dependencies) surface before
    /// any solving starts.
    pub fn solve(&self, arena: &mut JobArena) -> Result<ExactOutcome, ScheduleError> {
        let graph = DependencyGraph::build(arena)?;
        if arena.is_empty() {
            return Ok(ExactOutcome {
                schedule: Schedule::new(),
                objective: 0.0,
            });
        }

        let levels = graph.levels();
        let durations: HashMap<JobId, f64> = arena
            .jobs()
            .iter()
            .map(|j| (j.id.clone(), j.duration.estimate()))
            .collect();

        // Decision variables: one continuous start time per job.
        let mut vars = variables!();
        let mut starts: HashMap<JobId, Variable> = HashMap::with_capacity(arena.len());
        for job in arena.jobs() {
            let mut def = variable().min(0.0);
            if let Some(window) = job.window {
                def = def.min(window.earliest.max(0.0)).max(window.latest);
            }
            starts.insert(job.id.clone(), vars.add(def));
        }

        let objective = arena.jobs().iter().fold(Expression::from(0.0), |acc, job| {
            acc + starts[&job.id] + durations[&job.id]
        });
        let mut problem = vars.minimise(objective).using(good_lp::default_solver);

        // Precedence: a prerequisite finishes before its dependent starts.
        let mut constraint_count = 0;
        for job in arena.jobs() {
            let sj = starts[&job.id];
            for dep in &job.dependencies {
                let sp = starts[dep];
                let dp = durations[dep];
                problem = problem.with(constraint!(sp + dp <= sj));
                constraint_count += 1;
            }
        }

        // Same-level resource ordering: levels using several distinct
        // primary resources synchronize the starts of same-resource jobs.
        for ids in graph.level_groups().values() {
            let mut by_resource: BTreeMap<&str, Vec<&JobId>> = BTreeMap::new();
            for id in ids {
                if let Some(resource) = arena.get(id).and_then(|j| j.primary_resource()) {
                    by_resource.entry(resource).or_default().push(id);
                }
            }
            if by_resource.len() > 1 {
                for group in by_resource.values() {
                    for pair in group.windows(2) {
                        let a = starts[pair[0]];
                        let b = starts[pair[1]];
                        problem = problem.with(constraint!(a == b));
                        constraint_count += 1;
                    }
                }
            }
        }
        debug!(
            "lp formulated: {} start variables, {} constraints",
            arena.len(),
            constraint_count
        );

        let solution = problem.solve().map_err(|e| match e {
            ResolutionError::Infeasible => ScheduleError::Infeasible,
            other => ScheduleError::SolverError(other.to_string()),
        })?;

        let objective: f64 = arena
            .jobs()
            .iter()
            .map(|job| solution.value(starts[&job.id]) + durations[&job.id])
            .sum();

        // Commit the optimal starts, then repair per-resource overlaps.
        let mut schedule = Schedule::new();
        for job in arena.jobs() {
            let start = solution.value(starts[&job.id]);
            let duration = durations[&job.id];
            schedule.insert(
                job.id.clone(),
                ScheduleEntry {
                    resource_id: job.primary_resource().map(str::to_owned),
                    start,
                    end: start + duration,
                    actual_duration: duration,
                },
            );
        }
        repair_overlaps(&mut schedule);

        for (id, level) in &levels {
            if let Some(job) = arena.get_mut(id) {
                job.level = *level;
            }
        }
        for (id, entry) in schedule.entries.clone() {
            if let Some(job) = arena.get_mut(&id) {
                job.start_time = Some(entry.start);
                job.end_time = Some(entry.end);
                job.actual_duration = entry.actual_duration;
            }
        }
        schedule.audit(arena.jobs());

        info!(
            "lp solved: {} jobs, objective {:.3}, makespan {:.3}",
            schedule.len(),
            objective,
            schedule.makespan()
        );
        Ok(ExactOutcome { schedule, objective })
    }
}

/// Pushes overlapping same-resource entries later until each resource's
/// timeline is conflict-free. Durations are preserved; only starts move,
/// and only forward.
fn repair_overlaps(schedule: &mut Schedule) {
    let resources: Vec<String> = schedule
        .resource_ids()
        .into_iter()
        .map(str::to_owned)
        .collect();

    for resource in resources {
        let ordered: Vec<JobId> = schedule
            .for_resource(&resource)
            .into_iter()
            .map(|(id, _)| id.clone())
            .collect();

        let mut prev_end: Option<f64> = None;
        for id in ordered {
            if let Some(entry) = schedule.entries.get_mut(&id) {
                if let Some(end) = prev_end {
                    if entry.start < end {
                        warn!(
                            "repair: job '{id}' pushed from {:.3} to {end:.3} on resource '{resource}'",
                            entry.start
                        );
                        entry.start = end;
                        entry.end = end + entry.actual_duration;
                    }
                }
                prev_end = Some(entry.end);
            }
        }
    }
}
