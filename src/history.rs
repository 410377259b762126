//! Duration prediction from historical runs.
//!
//! Jobs arriving without usable duration bounds can borrow them from the
//! recorded durations of past jobs with similar resource demands. This is a
//! deliberately simple estimator — a demand-profile-weighted mean with a
//! fixed uncertainty spread — standing in for a learned regression model.

use log::debug;

use crate::arena::JobArena;
use crate::models::{DurationModel, Job, ResourceDemand};

/// One completed historical job: its demand profile and realized duration.
#[derive(Debug, Clone)]
pub struct HistoricalRun {
    /// Resource demands of the historical job.
    pub demands: Vec<ResourceDemand>,
    /// Observed processing time (hours).
    pub actual_duration: f64,
}

impl HistoricalRun {
    /// Records a historical run.
    pub fn new(demands: Vec<ResourceDemand>, actual_duration: f64) -> Self {
        Self {
            demands,
            actual_duration,
        }
    }
}

/// Predicts `[min, max]` duration bounds for a job.
pub trait DurationPredictor {
    /// Returns predicted bounds, or `None` when no basis for a prediction
    /// exists.
    fn predict(&self, job: &Job) -> Option<(f64, f64)>;
}

/// Demand-profile-weighted mean over historical runs.
///
/// Each run is weighted by the overlap between its demanded resource set
/// and the job's (intersection over union). The prediction is the weighted
/// mean as `min_duration` with `max_duration = spread × min`.
#[derive(Debug, Clone)]
pub struct DemandWeightedPredictor {
    history: Vec<HistoricalRun>,
    spread: f64,
}

impl DemandWeightedPredictor {
    /// Creates a predictor over historical runs with the default 1.5×
    /// uncertainty spread.
    pub fn new(history: Vec<HistoricalRun>) -> Self {
        Self {
            history,
            spread: 1.5,
        }
    }

    /// Sets the max/min spread factor.
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Fills in duration bounds for every arena job still lacking them
    /// (see [`DurationModel::is_unspecified`]). Returns how many jobs were
    /// updated.
    pub fn apply(&self, arena: &mut JobArena) -> usize {
        let ids: Vec<String> = arena
            .jobs()
            .iter()
            .filter(|j| j.duration.is_unspecified())
            .map(|j| j.id.clone())
            .collect();

        let mut updated = 0;
        for id in ids {
            let Some(job) = arena.get(&id) else { continue };
            if let Some((min, max)) = self.predict(job) {
                if let Some(job) = arena.get_mut(&id) {
                    job.duration = DurationModel::Range { min, max };
                    updated += 1;
                }
            }
        }
        if updated > 0 {
            debug!("predicted duration bounds for {updated} jobs from history");
        }
        updated
    }
}

impl DurationPredictor for DemandWeightedPredictor {
    fn predict(&self, job: &Job) -> Option<(f64, f64)> {
        let mut weight_sum = 0.0;
        let mut weighted = 0.0;
        for run in &self.history {
            let w = profile_overlap(&job.demands, &run.demands);
            weight_sum += w;
            weighted += w * run.actual_duration;
        }
        if weight_sum <= 0.0 {
            return None;
        }
        let min = weighted / weight_sum;
        Some((min, min * self.spread))
    }
}

/// Intersection-over-union of two demanded resource sets.
fn profile_overlap(a: &[ResourceDemand], b: &[ResourceDemand]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a
        .iter()
        .filter(|d| b.iter().any(|o| o.resource_id == d.resource_id))
        .count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union as f64
}
