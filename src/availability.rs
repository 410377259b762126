//! Resource availability model.
//!
//! Answers feasibility queries (is resource R free for job J at time T?)
//! against the combination of per-resource calendars and the company-wide
//! calendar, and applies the stochastic perturbation that models
//! availability uncertainty in the swarm solver.
//!
//! # Concurrency
//! [`AvailabilityPool::perturb`] is a single-writer mutation applied once
//! per optimization iteration, *before* candidates are evaluated; all
//! feasibility queries within one iteration read the frozen post-perturb
//! state.

use std::collections::BTreeMap;

use log::debug;
use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::models::{Calendar, Job, Resource};

/// The calendars governing one scheduling run.
///
/// A timestamp is available for a resource iff it is working time on both
/// the resource's own calendar and the company calendar.
/// Calendars are held in a sorted map so perturbation consumes randomness
/// in a deterministic order under a seeded RNG.
#[derive(Debug, Clone)]
pub struct AvailabilityPool {
    company: Calendar,
    resources: BTreeMap<String, Calendar>,
}

impl AvailabilityPool {
    /// Creates a pool from the company calendar and a resource→calendar map.
    pub fn new(company: Calendar, resources: BTreeMap<String, Calendar>) -> Self {
        Self { company, resources }
    }

    /// Creates a pool from resource records.
    pub fn from_resources(company: Calendar, resources: &[Resource]) -> Self {
        let map = resources
            .iter()
            .map(|r| (r.id.clone(), r.calendar.clone()))
            .collect();
        Self::new(company, map)
    }

    /// The company-wide calendar.
    pub fn company(&self) -> &Calendar {
        &self.company
    }

    /// The calendar of one resource, if known.
    pub fn calendar(&self, resource_id: &str) -> Option<&Calendar> {
        self.resources.get(resource_id)
    }

    /// Whether a resource is free at a timestamp. Unknown resources are
    /// never available.
    pub fn is_available(&self, resource_id: &str, at: f64) -> bool {
        if !self.company.covers(at) {
            return false;
        }
        self.resources
            .get(resource_id)
            .is_some_and(|cal| cal.covers(at))
    }

    /// Whether every resource a job demands is free at a timestamp.
    ///
    /// Vacuously true for jobs without demands.
    pub fn can_run(&self, job: &Job, at: f64) -> bool {
        job.demands
            .iter()
            .all(|d| self.is_available(&d.resource_id, at))
    }

    /// Resources free at `at` that the job does not already demand,
    /// sorted ascending for determinism.
    pub fn find_alternatives(&self, job: &Job, at: f64) -> Vec<String> {
        let mut ids: Vec<String> = self
            .resources
            .keys()
            .filter(|id| !job.demands_resource(id) && self.is_available(id, at))
            .cloned()
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Applies one round of availability perturbation to every resource
    /// calendar (see [`Calendar::perturb`]). The company calendar is left
    /// untouched. Irreversible: callers wanting the original calendars back
    /// keep their own copy.
    pub fn perturb<R: Rng>(&mut self, uncertainty: f64, rng: &mut R) {
        for calendar in self.resources.values_mut() {
            calendar.perturb(uncertainty, rng);
        }
        debug!(
            "availability perturbation applied to {} resource calendars",
            self.resources.len()
        );
    }
}

/// Picks a substitute resource for a job that cannot run at the current
/// time.
///
/// Strategies see the resources currently available and return the ID to
/// swap into the job's primary demand (quantity preserved), or `None` to
/// leave the job untouched.
pub trait SubstitutionStrategy {
    /// Selects a substitute from `available`, or `None` when nothing fits.
    fn select<R: Rng>(&self, job: &Job, available: &[String], rng: &mut R) -> Option<String>;
}

/// Default strategy: prefer the job's declared alternatives, otherwise any
/// available resource, chosen uniformly at random.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAlternative;

impl SubstitutionStrategy for RandomAlternative {
    fn select<R: Rng>(&self, job: &Job, available: &[String], rng: &mut R) -> Option<String> {
        let preferred: Vec<&String> = available
            .iter()
            .filter(|id| job.alternatives.contains(id))
            .collect();
        if let Some(&id) = preferred.choose(rng) {
            return Some(id.clone());
        }
        available.choose(rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pool() -> AvailabilityPool {
        let company = Calendar::from_periods([(8.0, 12.0), (13.0, 17.0)]).unwrap();
        let mut resources = BTreeMap::new();
        resources.insert(
            "resource1".to_string(),
            Calendar::from_periods([(8.0, 12.0), (13.0, 17.0)]).unwrap(),
        );
        resources.insert(
            "resource2".to_string(),
            Calendar::from_periods([(9.0, 12.0), (13.0, 18.0)]).unwrap(),
        );
        resources.insert(
            "resource3".to_string(),
            Calendar::from_periods([(8.0, 12.0), (13.0, 16.0)]).unwrap(),
        );
        AvailabilityPool::new(company, resources)
    }

    #[test]
    fn test_is_available_intersects_company() {
        let p = pool();
        assert!(p.is_available("resource1", 9.0));
        // resource2 opens at 9.0
        assert!(!p.is_available("resource2", 8.5));
        // resource2 works until 18.0 but the company closes at 17.0
        assert!(!p.is_available("resource2", 17.5));
        // lunch break everywhere
        assert!(!p.is_available("resource1", 12.5));
    }

    #[test]
    fn test_unknown_resource_never_available() {
        assert!(!pool().is_available("ghost", 9.0));
    }

    #[test]
    fn test_can_run_all_demands() {
        let p = pool();
        let job = Job::new("WO1")
            .with_duration(1.0)
            .with_demand("resource1", 1)
            .with_demand("resource2", 1);
        assert!(p.can_run(&job, 10.0));
        assert!(!p.can_run(&job, 8.5)); // resource2 still closed

        let undemanding = Job::new("WO2").with_duration(1.0);
        assert!(p.can_run(&undemanding, 10.0));
    }

    #[test]
    fn test_find_alternatives_excludes_demanded() {
        let p = pool();
        let job = Job::new("WO1").with_duration(1.0).with_demand("resource1", 1);
        let alts = p.find_alternatives(&job, 10.0);
        assert_eq!(alts, vec!["resource2", "resource3"]);

        // at 16.5 resource3 is closed
        let alts = p.find_alternatives(&job, 16.5);
        assert_eq!(alts, vec!["resource2"]);
    }

    #[test]
    fn test_perturb_leaves_company_untouched() {
        let mut p = pool();
        let company_before = p.company().clone();
        let mut rng = SmallRng::seed_from_u64(3);
        p.perturb(1.0, &mut rng);
        assert_eq!(p.company(), &company_before);
        for id in ["resource1", "resource2", "resource3"] {
            for slot in p.calendar(id).unwrap().slots() {
                assert!(slot.end > slot.start);
            }
        }
    }

    #[test]
    fn test_random_alternative_prefers_declared() {
        let job = Job::new("WO1")
            .with_duration(1.0)
            .with_demand("resource1", 1)
            .with_alternative("resource3");
        let available = vec!["resource2".to_string(), "resource3".to_string()];
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..20 {
            let pick = RandomAlternative.select(&job, &available, &mut rng);
            assert_eq!(pick.as_deref(), Some("resource3"));
        }
    }

    #[test]
    fn test_random_alternative_falls_back() {
        let job = Job::new("WO1").with_duration(1.0).with_demand("resource1", 1);
        let available = vec!["resource2".to_string()];
        let mut rng = SmallRng::seed_from_u64(5);
        assert_eq!(
            RandomAlternative.select(&job, &available, &mut rng).as_deref(),
            Some("resource2")
        );
        assert!(RandomAlternative.select(&job, &[], &mut rng).is_none());
    }
}
