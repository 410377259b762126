//! Job arena: validated, indexed job storage for one scheduling run.
//!
//! Components take explicit read (`&JobArena`) or read-write
//! (`&mut JobArena`) views of the arena instead of sharing ambient mutable
//! job references. Insertion order is preserved — the swarm maps the k-th
//! job to particle dimension k.

use std::collections::HashMap;

use crate::error::ScheduleError;
use crate::models::{Job, JobId};

/// Owns the jobs of one scheduling run, indexed by ID.
#[derive(Debug, Clone)]
pub struct JobArena {
    jobs: Vec<Job>,
    index: HashMap<JobId, usize>,
}

impl JobArena {
    /// Builds an arena from a job list, validating every job.
    ///
    /// Fails with [`ScheduleError::InvalidJob`] on the first structural
    /// violation or duplicate job ID.
    pub fn new(jobs: Vec<Job>) -> Result<Self, ScheduleError> {
        let mut index = HashMap::with_capacity(jobs.len());
        for (i, job) in jobs.iter().enumerate() {
            job.validate()?;
            if index.insert(job.id.clone(), i).is_some() {
                return Err(ScheduleError::InvalidJob {
                    id: job.id.clone(),
                    reason: "duplicate job id".into(),
                });
            }
        }
        Ok(Self { jobs, index })
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Read view of all jobs in insertion order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Looks up a job by ID.
    pub fn get(&self, id: &str) -> Option<&Job> {
        self.index.get(id).map(|&i| &self.jobs[i])
    }

    /// Mutable lookup by ID.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Job> {
        let i = *self.index.get(id)?;
        Some(&mut self.jobs[i])
    }

    /// Whether a job with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The particle dimension (insertion position) of a job.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}
