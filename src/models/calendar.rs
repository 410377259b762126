//! Working-time calendar model.
//!
//! A calendar is an ordered sequence of disjoint availability periods for a
//! resource or for the whole company. A timestamp is working time iff it
//! falls inside one of the periods.
//!
//! # Time Model
//! All times are fractional hours relative to a scheduling epoch (t = 0).
//! The consumer defines what the epoch means (e.g., shift start, midnight).

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// A single availability period `[start, end]`.
///
/// Endpoints are inclusive: a job may start exactly when a period opens or
/// closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Period start (hours, inclusive).
    pub start: f64,
    /// Period end (hours, inclusive).
    pub end: f64,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of this slot (hours).
    #[inline]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Whether a timestamp falls within this slot.
    #[inline]
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Whether two slots overlap in more than a single point.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// An availability calendar: ordered, disjoint working periods.
///
/// An empty calendar means the resource is never available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calendar {
    slots: Vec<TimeSlot>,
}

impl Calendar {
    /// Builds a calendar from `(start_hour, end_hour)` pairs.
    ///
    /// Periods are sorted by start time. Fails with
    /// [`ScheduleError::InvalidCalendar`] if any period is empty or inverted
    /// (`start >= end`) or if two periods overlap.
    pub fn from_periods(
        periods: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, ScheduleError> {
        let mut slots: Vec<TimeSlot> = periods
            .into_iter()
            .map(|(start, end)| TimeSlot::new(start, end))
            .collect();

        for slot in &slots {
            if slot.start >= slot.end {
                return Err(ScheduleError::InvalidCalendar {
                    reason: format!("period ({}, {}) has start >= end", slot.start, slot.end),
                });
            }
        }

        slots.sort_by(|a, b| a.start.total_cmp(&b.start));
        for pair in slots.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(ScheduleError::InvalidCalendar {
                    reason: format!(
                        "periods ({}, {}) and ({}, {}) overlap",
                        pair[0].start, pair[0].end, pair[1].start, pair[1].end
                    ),
                });
            }
        }

        Ok(Self { slots })
    }

    /// The availability periods, sorted by start time.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Whether a timestamp is within working time.
    pub fn covers(&self, time: f64) -> bool {
        self.slots.iter().any(|s| s.contains(time))
    }

    /// Finds the next working timestamp at or after `from`.
    ///
    /// Returns `from` if already within a period, otherwise the start of the
    /// next period. `None` if no availability remains.
    pub fn next_available(&self, from: f64) -> Option<f64> {
        if self.covers(from) {
            return Some(from);
        }
        self.slots
            .iter()
            .filter(|s| s.start > from)
            .map(|s| s.start)
            .fold(None, |acc, t| match acc {
                Some(best) if best <= t => Some(best),
                _ => Some(t),
            })
    }

    /// Total available hours across all periods.
    pub fn total_hours(&self) -> f64 {
        self.slots.iter().map(|s| s.length()).sum()
    }

    /// Randomly shrinks periods to simulate unplanned unavailability.
    ///
    /// Each period is hit with probability `uncertainty`; a hit moves the
    /// period end earlier by a uniform draw in `[0, length/2)`. Mutates the
    /// calendar in place; a shrunk period never inverts (`end` stays above
    /// `start`). Callers treat this as an irreversible simulation step, not
    /// an idempotent query.
    pub fn perturb<R: rand::Rng>(&mut self, uncertainty: f64, rng: &mut R) {
        for slot in &mut self.slots {
            if rng.random_range(0.0..1.0) < uncertainty {
                let cut = rng.random_range(0.0..slot.length() * 0.5);
                slot.end -= cut;
            }
        }
    }
}
