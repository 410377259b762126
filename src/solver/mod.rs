//! Solving strategies.
//!
//! Two alternative solvers share the same inputs (a [`JobArena`] and, for
//! the swarm, an [`AvailabilityPool`]) and the same committed output shape:
//!
//! - [`ExactScheduler`]: LP formulation solved to optimality by an external
//!   backend, plus a per-resource overlap repair pass.
//! - [`SwarmScheduler`]: particle-swarm multi-objective search under
//!   availability uncertainty; may leave infeasible jobs unscheduled.
//!
//! The two may return different feasible schedules for the same job set.
//!
//! [`JobArena`]: crate::arena::JobArena
//! [`AvailabilityPool`]: crate::availability::AvailabilityPool

mod exact;
mod swarm;

pub use exact::{ExactOutcome, ExactScheduler};
pub use swarm::{Particle, SwarmConfig, SwarmOutcome, SwarmScheduler, WalkOrder};
