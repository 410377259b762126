//! Production planning engine.
//!
//! Schedules interdependent production jobs onto shared resources subject
//! to precedence constraints, resource calendars, deadlines, and duration
//! uncertainty. One invocation produces one offline schedule from a static
//! job set; live replanning is out of scope.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `Resource`, `Calendar`,
//!   `Schedule`, duration and window models
//! - **`error`**: The `ScheduleError` taxonomy
//! - **`arena`**: Validated, indexed job storage for one run
//! - **`graph`**: Dependency DAG, levels, topological ordering
//! - **`fitness`**: 4-objective fitness evaluation for swarm candidates
//! - **`availability`**: Calendar feasibility queries, perturbation, and
//!   resource substitution
//! - **`history`**: Duration prediction from historical runs
//! - **`solver`**: The exact LP scheduler and the particle-swarm scheduler
//!
//! # Architecture
//!
//! Both solvers consume the dependency graph service and commit into the
//! same `Schedule` shape; only the swarm solver uses the fitness evaluator
//! and the availability model. The LP backend is reached through
//! `good_lp`'s solver seam, so backends are swappable by feature flag.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4

pub mod arena;
pub mod availability;
pub mod error;
pub mod fitness;
pub mod graph;
pub mod history;
pub mod models;
pub mod solver;
