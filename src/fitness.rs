//! Multi-objective fitness evaluation.
//!
//! Ranks swarm candidates on four objectives: total duration, idle time,
//! resource utilization, and deadline deviation. Evaluation is a pure
//! function of its inputs — it is called many times per iteration and never
//! mutates job state.
//!
//! # Objective convention
//!
//! Candidates are compared through [`ObjectiveWeights`]: each raw component
//! is multiplied by its weight and the weighted tuples are compared
//! lexicographically, larger wins. The default weights are
//! `(+duration, -idle, -utilization, -deadline_deviation)`.

use serde::{Deserialize, Serialize};

use crate::models::Job;

/// Weights applied to the fitness components before comparison.
///
/// Constructed locally and passed into the optimizer — there is no
/// process-wide registry of objective definitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// Weight of the total-duration component.
    pub duration: f64,
    /// Weight of the idle-time component.
    pub idle: f64,
    /// Weight of the utilization component.
    pub utilization: f64,
    /// Weight of the deadline-deviation component.
    pub deadline: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            duration: 1.0,
            idle: -1.0,
            utilization: -1.0,
            deadline: -1.0,
        }
    }
}

/// The 4-objective fitness vector of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    /// Sum of the candidate's per-job duration values.
    pub total_duration: f64,
    /// Slack between the longest single candidate value and their sum.
    /// A crude idle-time proxy, not a physical measurement.
    pub idle_time: f64,
    /// Sum of realized `actual_duration` across jobs (0 for uncommitted).
    pub utilization: f64,
    /// Sum of `max(0, end_time - deadline)` over jobs having both.
    pub deadline_deviation: f64,
}

impl Fitness {
    /// The weighted component tuple used for comparison.
    pub fn weighted(&self, weights: &ObjectiveWeights) -> [f64; 4] {
        [
            self.total_duration * weights.duration,
            self.idle_time * weights.idle,
            self.utilization * weights.utilization,
            self.deadline_deviation * weights.deadline,
        ]
    }

    /// Whether this fitness beats `other` under the given weights:
    /// lexicographic comparison of the weighted tuples, larger wins.
    pub fn dominates(&self, other: &Fitness, weights: &ObjectiveWeights) -> bool {
        let a = self.weighted(weights);
        let b = other.weighted(weights);
        for (x, y) in a.iter().zip(b.iter()) {
            match x.total_cmp(y) {
                std::cmp::Ordering::Greater => return true,
                std::cmp::Ordering::Less => return false,
                std::cmp::Ordering::Equal => continue,
            }
        }
        false
    }
}

/// Evaluates a candidate duration vector against the job set.
///
/// `candidate` carries one value per job, in arena order. Pure: identical
/// inputs produce identical outputs and no job state is touched.
pub fn evaluate(candidate: &[f64], jobs: &[Job]) -> Fitness {
    let total_duration: f64 = candidate.iter().sum();
    let longest = candidate.iter().copied().fold(0.0, f64::max);
    let idle_time = (longest - total_duration).max(0.0);

    let utilization: f64 = jobs.iter().map(|j| j.actual_duration).sum();

    let deadline_deviation: f64 = jobs
        .iter()
        .filter_map(|j| match (j.end_time, j.deadline) {
            (Some(end), Some(deadline)) => Some((end - deadline).max(0.0)),
            _ => None,
        })
        .sum();

    Fitness {
        total_duration,
        idle_time,
        utilization,
        deadline_deviation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn jobs() -> Vec<Job> {
        vec![
            Job::new("WO1").with_duration_range(4.0, 6.0).with_deadline(15.0),
            Job::new("WO2").with_duration_range(2.0, 4.0),
            Job::new("WO3").with_duration_range(3.0, 5.0).with_deadline(6.0),
        ]
    }

    #[test]
    fn test_evaluate_components() {
        let jobs = jobs();
        let f = evaluate(&[5.0, 3.0, 4.0], &jobs);
        assert_eq!(f.total_duration, 12.0);
        // longest (5.0) never exceeds the sum, so the proxy clamps at zero
        assert_eq!(f.idle_time, 0.0);
        // nothing committed yet
        assert_eq!(f.utilization, 0.0);
        assert_eq!(f.deadline_deviation, 0.0);
    }

    #[test]
    fn test_evaluate_deadline_deviation() {
        let mut jobs = jobs();
        jobs[0].end_time = Some(18.0); // deadline 15.0 → 3.0 late
        jobs[1].end_time = Some(9.0); // no deadline → ignored
        jobs[2].end_time = Some(5.0); // deadline 6.0 → on time

        let f = evaluate(&[5.0, 3.0, 4.0], &jobs);
        assert_eq!(f.deadline_deviation, 3.0);
    }

    #[test]
    fn test_evaluate_utilization_after_commit() {
        let mut jobs = jobs();
        jobs[0].actual_duration = 5.0;
        jobs[1].actual_duration = 3.0;

        let f = evaluate(&[5.0, 3.0, 4.0], &jobs);
        assert_eq!(f.utilization, 8.0);
    }

    #[test]
    fn test_evaluate_is_pure() {
        let mut jobs = jobs();
        jobs[0].end_time = Some(18.0);
        let before: Vec<Job> = jobs.clone();

        let candidate = [5.0, 3.0, 4.0];
        let first = evaluate(&candidate, &jobs);
        let second = evaluate(&candidate, &jobs);
        assert_eq!(first, second);

        // No mutation of durations or schedule outputs.
        for (a, b) in jobs.iter().zip(before.iter()) {
            assert_eq!(a.duration, b.duration);
            assert_eq!(a.actual_duration, b.actual_duration);
            assert_eq!(a.end_time, b.end_time);
        }
    }

    #[test]
    fn test_evaluate_empty() {
        let f = evaluate(&[], &[]);
        assert_eq!(f.total_duration, 0.0);
        assert_eq!(f.idle_time, 0.0);
    }

    #[test]
    fn test_dominates_first_component() {
        let w = ObjectiveWeights::default();
        let a = Fitness {
            total_duration: 10.0,
            idle_time: 0.0,
            utilization: 0.0,
            deadline_deviation: 0.0,
        };
        let b = Fitness {
            total_duration: 8.0,
            ..a
        };
        // duration weight is +1: larger total wins the weighted comparison
        assert!(a.dominates(&b, &w));
        assert!(!b.dominates(&a, &w));
        assert!(!a.dominates(&a, &w)); // never dominates itself
    }

    #[test]
    fn test_dominates_later_components() {
        let w = ObjectiveWeights::default();
        let a = Fitness {
            total_duration: 10.0,
            idle_time: 0.0,
            utilization: 0.0,
            deadline_deviation: 2.0,
        };
        let b = Fitness {
            deadline_deviation: 5.0,
            ..a
        };
        // Equal on the first three; smaller deviation wins under weight -1.
        assert!(a.dominates(&b, &w));
        assert!(!b.dominates(&a, &w));
    }
}
