//! Production-planning domain models.
//!
//! Pure value types shared by both solving strategies: jobs with fixed or
//! uncertain durations, resource calendars, and committed schedules.
//! Invariants are enforced at construction ([`Calendar::from_periods`]) or
//! by explicit validation ([`Job::validate`], called per job when a
//! [`JobArena`](crate::arena::JobArena) is built).

mod calendar;
mod job;
mod resource;
mod schedule;

pub use calendar::{Calendar, TimeSlot};
pub use job::{DurationModel, Job, JobId, ResourceDemand, StartWindow};
pub use resource::Resource;
pub use schedule::{Schedule, ScheduleEntry, Violation, ViolationKind};
