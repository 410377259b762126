//! Resource model.
//!
//! A resource is anything a job occupies while running: a machine, a line,
//! a crew. Each resource carries its own availability calendar; the
//! company-wide calendar constrains all resources uniformly on top of it
//! (see [`AvailabilityPool`](crate::availability::AvailabilityPool)).

use serde::{Deserialize, Serialize};

use super::Calendar;

/// A schedulable resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Availability periods for this resource.
    pub calendar: Calendar,
}

impl Resource {
    /// Creates a resource with the given calendar.
    pub fn new(id: impl Into<String>, calendar: Calendar) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            calendar,
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether this resource's own calendar covers a timestamp.
    pub fn is_available_at(&self, time: f64) -> bool {
        self.calendar.covers(time)
    }
}
