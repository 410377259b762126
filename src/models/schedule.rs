//! Schedule (solution) model.
//!
//! A schedule maps job IDs to committed `(resource, start, end, actual
//! duration)` entries, plus any constraint violations detected after
//! commit. Schedules are never mutated once a solver returns them — a
//! re-run produces a new schedule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Job, JobId};

/// A committed placement for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Assigned resource (the job's primary demand), if any.
    pub resource_id: Option<String>,
    /// Committed start time (hours).
    pub start: f64,
    /// Committed end time (hours). Always `start + actual_duration`.
    pub end: f64,
    /// Realized processing time (hours).
    pub actual_duration: f64,
}

/// A soft-constraint violation found in a committed schedule.
///
/// Violations are reported, never fatal: a schedule that misses a deadline
/// is still a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// What kind of constraint was missed.
    pub kind: ViolationKind,
    /// The offending job.
    pub job_id: JobId,
    /// How far the constraint was missed by (hours).
    pub amount: f64,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Job completed after its deadline.
    DeadlineMiss,
    /// Job started outside its allowed start window.
    WindowMiss,
}

/// A complete schedule: one entry per committed job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Committed entries, keyed by job ID.
    pub entries: BTreeMap<JobId, ScheduleEntry>,
    /// Soft-constraint violations detected by [`Schedule::audit`].
    pub violations: Vec<Violation>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a committed entry for a job.
    pub fn insert(&mut self, job_id: impl Into<JobId>, entry: ScheduleEntry) {
        self.entries.insert(job_id.into(), entry);
    }

    /// Looks up the entry for a job.
    pub fn get(&self, job_id: &str) -> Option<&ScheduleEntry> {
        self.entries.get(job_id)
    }

    /// Number of committed jobs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was committed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest end time across all entries (0 when empty).
    pub fn makespan(&self) -> f64 {
        self.entries
            .values()
            .map(|e| e.end)
            .fold(0.0, f64::max)
    }

    /// Entries assigned to a resource, sorted by start time.
    pub fn for_resource(&self, resource_id: &str) -> Vec<(&JobId, &ScheduleEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .filter(|(_, e)| e.resource_id.as_deref() == Some(resource_id))
            .collect();
        entries.sort_by(|a, b| a.1.start.total_cmp(&b.1.start));
        entries
    }

    /// All resource IDs with at least one entry, sorted.
    pub fn resource_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .entries
            .values()
            .filter_map(|e| e.resource_id.as_deref())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Groups entries into fixed-width time buckets keyed by
    /// `floor(start / width)`, for presentation layers.
    pub fn slots(&self, width: f64) -> BTreeMap<i64, Vec<(&JobId, &ScheduleEntry)>> {
        let mut buckets: BTreeMap<i64, Vec<(&JobId, &ScheduleEntry)>> = BTreeMap::new();
        for (id, entry) in &self.entries {
            let slot = (entry.start / width).floor() as i64;
            buckets.entry(slot).or_default().push((id, entry));
        }
        buckets
    }

    /// Scans committed entries against job deadlines and start windows,
    /// appending a [`Violation`] for each miss.
    pub fn audit(&mut self, jobs: &[Job]) {
        for job in jobs {
            let Some(entry) = self.entries.get(&job.id) else {
                continue;
            };
            if let Some(deadline) = job.deadline {
                if entry.end > deadline {
                    self.violations.push(Violation {
                        kind: ViolationKind::DeadlineMiss,
                        job_id: job.id.clone(),
                        amount: entry.end - deadline,
                    });
                }
            }
            if let Some(window) = job.window {
                if !window.contains(entry.start) {
                    let amount = if entry.start < window.earliest {
                        window.earliest - entry.start
                    } else {
                        entry.start - window.latest
                    };
                    self.violations.push(Violation {
                        kind: ViolationKind::WindowMiss,
                        job_id: job.id.clone(),
                        amount,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn entry(resource: &str, start: f64, duration: f64) -> ScheduleEntry {
        ScheduleEntry {
            resource_id: Some(resource.into()),
            start,
            end: start + duration,
            actual_duration: duration,
        }
    }

    fn sample() -> Schedule {
        let mut s = Schedule::new();
        s.insert("WO1", entry("resource1", 0.0, 5.0));
        s.insert("WO2", entry("resource2", 1.0, 3.0));
        s.insert("WO3", entry("resource1", 5.0, 3.0));
        s
    }

    #[test]
    fn test_makespan() {
        assert_eq!(sample().makespan(), 8.0);
        assert_eq!(Schedule::new().makespan(), 0.0);
    }

    #[test]
    fn test_for_resource_sorted() {
        let s = sample();
        let r1 = s.for_resource("resource1");
        assert_eq!(r1.len(), 2);
        assert_eq!(r1[0].0, "WO1");
        assert_eq!(r1[1].0, "WO3");
        assert!(s.for_resource("resource9").is_empty());
    }

    #[test]
    fn test_resource_ids() {
        assert_eq!(sample().resource_ids(), vec!["resource1", "resource2"]);
    }

    #[test]
    fn test_slots_bucketing() {
        let s = sample();
        let buckets = s.slots(4.0);
        // starts 0.0, 1.0 → bucket 0; start 5.0 → bucket 1
        assert_eq!(buckets[&0].len(), 2);
        assert_eq!(buckets[&1].len(), 1);
        assert_eq!(buckets[&1][0].0, "WO3");
    }

    #[test]
    fn test_audit_deadline_miss() {
        let mut s = sample();
        let jobs = vec![
            Job::new("WO1").with_duration(5.0).with_deadline(4.0), // ends 5.0 → late 1.0
            Job::new("WO2").with_duration(3.0).with_deadline(10.0), // on time
        ];
        s.audit(&jobs);
        assert_eq!(s.violations.len(), 1);
        assert_eq!(s.violations[0].kind, ViolationKind::DeadlineMiss);
        assert_eq!(s.violations[0].job_id, "WO1");
        assert_eq!(s.violations[0].amount, 1.0);
    }

    #[test]
    fn test_audit_window_miss() {
        let mut s = Schedule::new();
        s.insert("WO1", entry("resource1", 6.0, 2.0));
        let jobs = vec![Job::new("WO1").with_duration(2.0).with_window(0.0, 4.0)];
        s.audit(&jobs);
        assert_eq!(s.violations.len(), 1);
        assert_eq!(s.violations[0].kind, ViolationKind::WindowMiss);
        assert_eq!(s.violations[0].amount, 2.0);
    }

    #[test]
    fn test_audit_skips_unscheduled() {
        let mut s = Schedule::new();
        let jobs = vec![Job::new("WO1").with_duration(2.0).with_deadline(1.0)];
        s.audit(&jobs);
        assert!(s.violations.is_empty());
    }

    #[test]
    fn test_serde_round_trip() {
        let s = sample();
        let json = serde_json::to_string(&s).unwrap();
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries, s.entries);
    }

    #[test]
    fn test_entries_read_back_exactly() {
        // No hidden rounding: values re-read from the map are the committed ones.
        let mut s = Schedule::new();
        let e = ScheduleEntry {
            resource_id: Some("resource1".into()),
            start: 2.5,
            end: 7.25,
            actual_duration: 4.75,
        };
        s.insert("WO1", e.clone());
        assert_eq!(s.get("WO1"), Some(&e));
        assert_eq!(s.get("WO1").unwrap().start, 2.5);
        assert_eq!(s.get("WO1").unwrap().end, 7.25);
    }
}
