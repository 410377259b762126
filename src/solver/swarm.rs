//! Multi-objective particle-swarm scheduler.
//!
//! Searches over per-job duration values with a fixed-size particle
//! population, re-checking resource availability under stochastic
//! perturbation every iteration. Trades provable optimality for robustness
//! to uncertainty: the exact solver and this one may legitimately produce
//! different feasible schedules for the same input.
//!
//! # Algorithm
//!
//! 1. Initialize particles: positions uniform in `[0, max max_duration]`,
//!    velocities uniform in `[-1, 1]`, personal best = initial position.
//! 2. Per iteration: perturb resource calendars once, rebuild the
//!    dependency ordering, then walk jobs (topological or level-batched).
//!    A job passing its start-window and availability checks has its
//!    dimension updated in every particle with the canonical
//!    velocity/position rule; a failing job gets one substitution attempt
//!    instead of advancing the walk clock.
//! 3. Commit: the best personal-best candidate is translated back into job
//!    start/end times. Realized durations are the range midpoint — the
//!    particle positions drive search and selection, not the committed
//!    durations.
//!
//! Always runs the configured iteration count; there is no
//! early-convergence stop. An optional wall-clock budget aborts the loop
//! and commits best-so-far.
//!
//! # Reference
//! Kennedy & Eberhart (1995), "Particle Swarm Optimization"

use std::collections::HashSet;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::arena::JobArena;
use crate::availability::{AvailabilityPool, RandomAlternative, SubstitutionStrategy};
use crate::error::ScheduleError;
use crate::fitness::{evaluate, Fitness, ObjectiveWeights};
use crate::graph::DependencyGraph;
use crate::models::{JobId, Schedule, ScheduleEntry};

/// How the per-iteration walk visits jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkOrder {
    /// One job at a time, in topological order.
    #[default]
    Topological,
    /// Whole levels at a time, each probed against the level's base time.
    LevelBatches,
}

/// Search parameters for the swarm scheduler.
///
/// Objective weights, iteration counts, and walk order travel in this one
/// locally constructed value. The velocity weights are fixed constants,
/// not learned.
#[derive(Debug, Clone)]
pub struct SwarmConfig {
    /// Number of particles.
    pub population_size: usize,
    /// Iterations to run (always runs the full count).
    pub iterations: usize,
    /// Velocity carry-over weight.
    pub inertia: f64,
    /// Pull toward the personal best.
    pub cognitive: f64,
    /// Second personal-best attraction term.
    pub social: f64,
    /// Per-period probability of an availability shrink each iteration.
    pub uncertainty: f64,
    /// Objective weights for fitness comparison.
    pub weights: ObjectiveWeights,
    /// Job visiting order within an iteration.
    pub walk_order: WalkOrder,
    /// Optional wall-clock budget; exceeded → commit best-so-far.
    pub time_budget: Option<Duration>,
    /// RNG seed for reproducible runs. `None` = OS entropy.
    pub seed: Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            iterations: 10,
            inertia: 0.5,
            cognitive: 1.5,
            social: 1.5,
            uncertainty: 0.2,
            weights: ObjectiveWeights::default(),
            walk_order: WalkOrder::default(),
            time_budget: None,
            seed: None,
        }
    }
}

impl SwarmConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the availability-uncertainty factor.
    pub fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = uncertainty;
        self
    }

    /// Sets the walk order.
    pub fn with_walk_order(mut self, order: WalkOrder) -> Self {
        self.walk_order = order;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One point in the search space: a candidate duration per job, plus the
/// velocity and personal-best memory of the canonical PSO update.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Current per-job values (arena order).
    pub position: Vec<f64>,
    /// Current per-dimension velocity.
    pub velocity: Vec<f64>,
    /// Best position this particle has visited.
    pub best_position: Vec<f64>,
    /// Fitness at the best position.
    pub best_fitness: Fitness,
}

impl Particle {
    fn random<R: Rng>(dims: usize, upper: f64, arena: &JobArena, rng: &mut R) -> Self {
        let position: Vec<f64> = (0..dims)
            .map(|_| {
                if upper > 0.0 {
                    rng.random_range(0.0..upper)
                } else {
                    0.0
                }
            })
            .collect();
        let velocity: Vec<f64> = (0..dims).map(|_| rng.random_range(-1.0..=1.0)).collect();
        let best_fitness = evaluate(&position, arena.jobs());
        Self {
            best_position: position.clone(),
            position,
            velocity,
            best_fitness,
        }
    }
}

/// Result of a swarm run.
///
/// Unscheduled jobs are a normal, reportable outcome — not an error. A job
/// ends up here when no resource/time-window combination was ever feasible
/// for it across all iterations.
#[derive(Debug, Clone)]
pub struct SwarmOutcome {
    /// Committed entries for every feasible job.
    pub schedule: Schedule,
    /// Jobs left without start/end times, ascending by ID.
    pub unscheduled: Vec<JobId>,
    /// Personal-best fitness of the winning particle.
    pub best_fitness: Fitness,
    /// Iterations actually executed (may be short of the configured count
    /// only when a time budget expires).
    pub iterations_run: usize,
}

/// Population-based multi-objective scheduler.
#[derive(Debug, Clone)]
pub struct SwarmScheduler<S = RandomAlternative> {
    config: SwarmConfig,
    strategy: S,
}

impl SwarmScheduler<RandomAlternative> {
    /// Creates a scheduler with the default substitution strategy.
    pub fn new(config: SwarmConfig) -> Self {
        Self {
            config,
            strategy: RandomAlternative,
        }
    }
}

impl<S: SubstitutionStrategy> SwarmScheduler<S> {
    /// Creates a scheduler with a custom substitution strategy.
    pub fn with_strategy(config: SwarmConfig, strategy: S) -> Self {
        Self { config, strategy }
    }

    /// Runs the swarm search and commits the best candidate.
    ///
    /// Mutates the arena (start/end times, levels, resource substitutions)
    /// and the pool (availability perturbation). Input errors (cycles,
    /// unknown dependencies) surface before any searching starts.
    pub fn solve(
        &self,
        arena: &mut JobArena,
        pool: &mut AvailabilityPool,
    ) -> Result<SwarmOutcome, ScheduleError> {
        // Fail fast on structural input errors.
        let graph = DependencyGraph::build(arena)?;
        for (id, level) in graph.levels() {
            if let Some(job) = arena.get_mut(&id) {
                job.level = level;
            }
        }
        if arena.is_empty() {
            return Ok(SwarmOutcome {
                schedule: Schedule::new(),
                unscheduled: Vec::new(),
                best_fitness: evaluate(&[], &[]),
                iterations_run: 0,
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let dims = arena.len();
        let upper = arena
            .jobs()
            .iter()
            .map(|j| j.duration.upper_bound())
            .fold(0.0, f64::max);

        let mut population: Vec<Particle> = (0..self.config.population_size.max(1))
            .map(|_| Particle::random(dims, upper, arena, &mut rng))
            .collect();

        let mut ever_feasible: HashSet<JobId> = HashSet::new();
        let started = Instant::now();
        let mut iterations_run = 0;

        for iteration in 0..self.config.iterations {
            if let Some(budget) = self.config.time_budget {
                if started.elapsed() >= budget {
                    debug!("time budget exhausted after {iteration} iterations");
                    break;
                }
            }

            // Single-writer mutation, applied before any feasibility reads.
            pool.perturb(self.config.uncertainty, &mut rng);

            let graph = DependencyGraph::build(arena)?;
            match self.config.walk_order {
                WalkOrder::Topological => {
                    let mut clock = 0.0;
                    for id in graph.topological_order() {
                        if self.probe_job(
                            arena,
                            pool,
                            &id,
                            clock,
                            upper,
                            &mut population,
                            &mut ever_feasible,
                            &mut rng,
                        ) {
                            if let Some(job) = arena.get(&id) {
                                clock += job.duration.estimate();
                            }
                        }
                    }
                }
                WalkOrder::LevelBatches => {
                    let mut clock = 0.0;
                    for ids in graph.level_groups().values() {
                        let base = clock;
                        let mut batch = 0.0_f64;
                        for id in ids {
                            if self.probe_job(
                                arena,
                                pool,
                                id,
                                base,
                                upper,
                                &mut population,
                                &mut ever_feasible,
                                &mut rng,
                            ) {
                                if let Some(job) = arena.get(id) {
                                    batch = batch.max(job.duration.estimate());
                                }
                            }
                        }
                        clock = base + batch;
                    }
                }
            }
            iterations_run += 1;

            if log::log_enabled!(log::Level::Debug) {
                let best = self.best_particle(&population);
                debug!(
                    "iteration {iteration}: best total_duration {:.3}, {} feasible jobs",
                    best.best_fitness.total_duration,
                    ever_feasible.len()
                );
            }
        }

        let outcome = self.commit(arena, &population, &ever_feasible, iterations_run)?;
        info!(
            "swarm finished: {} scheduled, {} unscheduled, makespan {:.3}",
            outcome.schedule.len(),
            outcome.unscheduled.len(),
            outcome.schedule.makespan()
        );
        Ok(outcome)
    }

    /// Checks one job at the walk clock; on success updates its dimension
    /// in every particle, on failure attempts one resource substitution.
    /// Returns whether the job was feasible.
    #[allow(clippy::too_many_arguments)]
    fn probe_job<R: Rng>(
        &self,
        arena: &mut JobArena,
        pool: &AvailabilityPool,
        id: &str,
        clock: f64,
        upper: f64,
        population: &mut [Particle],
        ever_feasible: &mut HashSet<JobId>,
        rng: &mut R,
    ) -> bool {
        let Some(dim) = arena.position(id) else {
            return false;
        };

        let feasible = {
            let Some(job) = arena.get(id) else {
                return false;
            };
            let window_ok = job.window.is_none_or(|w| w.contains(clock));
            window_ok && pool.can_run(job, clock)
        };

        if feasible {
            ever_feasible.insert(id.to_string());
            self.update_dimension(dim, upper, population, arena, rng);
        } else {
            // Try a substitute resource instead of advancing time.
            let substitute = {
                let Some(job) = arena.get(id) else {
                    return false;
                };
                let available = pool.find_alternatives(job, clock);
                self.strategy.select(job, &available, rng)
            };
            if let Some(resource) = substitute {
                if let Some(job) = arena.get_mut(id) {
                    debug!("job '{id}': substituting primary demand with '{resource}'");
                    job.substitute_primary(resource);
                }
            }
        }
        feasible
    }

    /// Canonical velocity/position update on one dimension, followed by
    /// re-evaluation and personal-best replacement.
    fn update_dimension<R: Rng>(
        &self,
        dim: usize,
        upper: f64,
        population: &mut [Particle],
        arena: &JobArena,
        rng: &mut R,
    ) {
        for particle in population.iter_mut() {
            let r1: f64 = rng.random_range(0.0..1.0);
            let r2: f64 = rng.random_range(0.0..1.0);
            let pull = particle.best_position[dim] - particle.position[dim];

            particle.velocity[dim] = self.config.inertia * particle.velocity[dim]
                + self.config.cognitive * r1 * pull
                + self.config.social * r2 * pull;
            particle.position[dim] =
                (particle.position[dim] + particle.velocity[dim]).clamp(0.0, upper);

            let fitness = evaluate(&particle.position, arena.jobs());
            if fitness.dominates(&particle.best_fitness, &self.config.weights) {
                particle.best_position = particle.position.clone();
                particle.best_fitness = fitness;
            }
        }
    }

    fn best_particle<'a>(&self, population: &'a [Particle]) -> &'a Particle {
        let mut best = &population[0];
        for particle in &population[1..] {
            if particle
                .best_fitness
                .dominates(&best.best_fitness, &self.config.weights)
            {
                best = particle;
            }
        }
        best
    }

    /// Translates the winning candidate into committed start/end times.
    ///
    /// Starts honor dependency completion times and level grouping: jobs at
    /// one level with disjoint resource sets share the level's base start;
    /// resource conflicts serialize. Within a level, more deadline-urgent
    /// jobs are placed first.
    fn commit(
        &self,
        arena: &mut JobArena,
        population: &[Particle],
        ever_feasible: &HashSet<JobId>,
        iterations_run: usize,
    ) -> Result<SwarmOutcome, ScheduleError> {
        let best_fitness = self.best_particle(population).best_fitness;
        let graph = DependencyGraph::build(arena)?;

        let mut schedule = Schedule::new();
        let mut clock = 0.0_f64;

        for ids in graph.level_groups().values() {
            let mut ordered = ids.clone();
            ordered.sort_by(|a, b| {
                let ua = arena.get(a).map_or(0.0, |j| j.urgency(clock));
                let ub = arena.get(b).map_or(0.0, |j| j.urgency(clock));
                ub.total_cmp(&ua)
            });

            let mut placed: Vec<(Vec<String>, f64)> = Vec::new();
            let mut level_end = clock;

            for id in ordered {
                if !ever_feasible.contains(&id) {
                    continue;
                }
                let (actual, resources, primary, window, assigned, dep_end) = {
                    let Some(job) = arena.get(&id) else { continue };
                    let dep_end = job
                        .dependencies
                        .iter()
                        .filter_map(|dep| arena.get(dep).and_then(|d| d.end_time))
                        .fold(0.0, f64::max);
                    (
                        job.duration.estimate(),
                        job.demands
                            .iter()
                            .map(|d| d.resource_id.clone())
                            .collect::<Vec<_>>(),
                        job.primary_resource().map(str::to_owned),
                        job.window,
                        job.start_time.unwrap_or(0.0),
                        dep_end,
                    )
                };

                let mut start = clock.max(assigned).max(dep_end);
                if let Some(w) = window {
                    start = start.max(w.earliest);
                }
                for (held, end) in &placed {
                    if held.iter().any(|r| resources.contains(r)) {
                        start = start.max(*end);
                    }
                }
                let end = start + actual;

                if let Some(job) = arena.get_mut(&id) {
                    job.actual_duration = actual;
                    job.start_time = Some(start);
                    job.end_time = Some(end);
                }
                schedule.insert(
                    id.clone(),
                    ScheduleEntry {
                        resource_id: primary,
                        start,
                        end,
                        actual_duration: actual,
                    },
                );
                placed.push((resources, end));
                level_end = level_end.max(end);
            }
            clock = level_end;
        }

        schedule.audit(arena.jobs());

        let unscheduled: Vec<JobId> = graph
            .nodes()
            .iter()
            .filter(|id| !ever_feasible.contains(*id))
            .cloned()
            .collect();
        for id in &unscheduled {
            warn!("job '{id}': no feasible resource/time-window combination; left unscheduled");
        }

        Ok(SwarmOutcome {
            schedule,
            unscheduled,
            best_fitness,
            iterations_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Calendar, DurationModel, Job};
    use std::collections::BTreeMap;

    fn open_pool(resource_ids: &[&str]) -> AvailabilityPool {
        let company = Calendar::from_periods([(0.0, 24.0)]).unwrap();
        let resources: BTreeMap<String, Calendar> = resource_ids
            .iter()
            .map(|id| {
                (
                    id.to_string(),
                    Calendar::from_periods([(0.0, 24.0)]).unwrap(),
                )
            })
            .collect();
        AvailabilityPool::new(company, resources)
    }

    fn config() -> SwarmConfig {
        SwarmConfig::default().with_seed(42)
    }

    #[test]
    fn test_independent_jobs_all_scheduled() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut arena = JobArena::new(vec![
            Job::new("WO1").with_duration_range(4.0, 6.0).with_demand("resource1", 2),
            Job::new("WO2").with_duration_range(2.0, 4.0).with_demand("resource2", 3),
            Job::new("WO3").with_duration_range(3.0, 5.0).with_demand("resource3", 1),
            Job::new("WO4").with_duration_range(1.0, 3.0).with_demand("resource4", 1),
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1", "resource2", "resource3", "resource4"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();

        assert!(outcome.unscheduled.is_empty());
        assert_eq!(outcome.schedule.len(), 4);
        assert_eq!(outcome.iterations_run, 10);

        for job in arena.jobs() {
            let start = job.start_time.expect("scheduled");
            let end = job.end_time.expect("scheduled");
            assert_eq!(end, start + job.actual_duration);

            // Realized duration inside the uncertainty bounds.
            if let DurationModel::Range { min, max } = job.duration {
                assert!(job.actual_duration >= min && job.actual_duration <= max);
                assert_eq!(job.actual_duration, (min + max) / 2.0);
            }
        }

        // Same level, disjoint resources: everyone shares the base start.
        for job in arena.jobs() {
            assert_eq!(job.start_time, Some(0.0));
        }
    }

    #[test]
    fn test_dependency_chain_ordering() {
        let mut arena = JobArena::new(vec![
            Job::new("A").with_duration_range(4.0, 6.0).with_demand("resource1", 1),
            Job::new("B")
                .with_duration_range(2.0, 4.0)
                .with_demand("resource2", 1)
                .with_dependency("A"),
            Job::new("C")
                .with_duration_range(3.0, 5.0)
                .with_demand("resource3", 1)
                .with_dependency("B"),
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1", "resource2", "resource3"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();
        assert!(outcome.unscheduled.is_empty());

        let a = arena.get("A").unwrap();
        let b = arena.get("B").unwrap();
        let c = arena.get("C").unwrap();
        assert!(b.start_time.unwrap() >= a.end_time.unwrap());
        assert!(c.start_time.unwrap() >= b.end_time.unwrap());
        assert_eq!(a.level, 0);
        assert_eq!(b.level, 1);
        assert_eq!(c.level, 2);
    }

    #[test]
    fn test_same_level_resource_conflict_serializes() {
        let mut arena = JobArena::new(vec![
            Job::new("WO1").with_duration_range(2.0, 4.0).with_demand("resource1", 1),
            Job::new("WO2").with_duration_range(2.0, 4.0).with_demand("resource1", 1),
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();
        assert!(outcome.unscheduled.is_empty());

        let entries = outcome.schedule.for_resource("resource1");
        assert_eq!(entries.len(), 2);
        assert!(entries[1].1.start >= entries[0].1.end);
    }

    #[test]
    fn test_unreachable_window_reported_unscheduled() {
        let mut arena = JobArena::new(vec![
            Job::new("WO1").with_duration_range(2.0, 4.0).with_demand("resource1", 1),
            Job::new("WO2")
                .with_duration_range(1.0, 2.0)
                .with_demand("resource2", 1)
                .with_window(30.0, 31.0), // outside every probe time
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1", "resource2"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();

        assert_eq!(outcome.unscheduled, vec!["WO2"]);
        assert!(outcome.schedule.get("WO2").is_none());
        assert!(arena.get("WO2").unwrap().start_time.is_none());
        assert!(arena.get("WO2").unwrap().end_time.is_none());

        // The feasible job is unaffected.
        assert!(outcome.schedule.get("WO1").is_some());
    }

    #[test]
    fn test_substitution_rescues_offline_resource() {
        let mut arena = JobArena::new(vec![Job::new("WO1")
            .with_duration_range(2.0, 4.0)
            .with_demand("offline", 2)
            .with_alternative("resource2")])
        .unwrap();

        let company = Calendar::from_periods([(0.0, 24.0)]).unwrap();
        let mut resources = BTreeMap::new();
        resources.insert("offline".to_string(), Calendar::from_periods([]).unwrap());
        resources.insert(
            "resource2".to_string(),
            Calendar::from_periods([(0.0, 24.0)]).unwrap(),
        );
        let mut pool = AvailabilityPool::new(company, resources);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();

        assert!(outcome.unscheduled.is_empty());
        let job = arena.get("WO1").unwrap();
        assert_eq!(job.demands[0].resource_id, "resource2");
        assert_eq!(job.demands[0].quantity, 2); // quantity preserved
        assert_eq!(
            outcome.schedule.get("WO1").unwrap().resource_id.as_deref(),
            Some("resource2")
        );
    }

    #[test]
    fn test_level_batches_variant() {
        let mut arena = JobArena::new(vec![
            Job::new("A").with_duration_range(4.0, 6.0).with_demand("resource1", 1),
            Job::new("B")
                .with_duration_range(2.0, 4.0)
                .with_demand("resource2", 1)
                .with_dependency("A"),
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1", "resource2"]);

        let cfg = config().with_walk_order(WalkOrder::LevelBatches);
        let outcome = SwarmScheduler::new(cfg).solve(&mut arena, &mut pool).unwrap();

        assert!(outcome.unscheduled.is_empty());
        let a = arena.get("A").unwrap();
        let b = arena.get("B").unwrap();
        assert!(b.start_time.unwrap() >= a.end_time.unwrap());
    }

    #[test]
    fn test_commit_round_trip() {
        let mut arena = JobArena::new(vec![
            Job::new("WO1").with_duration_range(4.0, 6.0).with_demand("resource1", 1),
            Job::new("WO2")
                .with_duration_range(2.0, 4.0)
                .with_demand("resource2", 1)
                .with_dependency("WO1"),
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1", "resource2"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();
        for job in arena.jobs() {
            let entry = outcome.schedule.get(&job.id).unwrap();
            assert_eq!(job.start_time, Some(entry.start));
            assert_eq!(job.end_time, Some(entry.end));
            assert_eq!(job.actual_duration, entry.actual_duration);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let jobs = || {
            vec![
                Job::new("WO1").with_duration_range(4.0, 6.0).with_demand("resource1", 1),
                Job::new("WO2")
                    .with_duration_range(2.0, 4.0)
                    .with_demand("resource2", 1)
                    .with_dependency("WO1"),
                Job::new("WO3").with_duration_range(3.0, 5.0).with_demand("resource3", 1),
            ]
        };

        let mut arena1 = JobArena::new(jobs()).unwrap();
        let mut pool1 = open_pool(&["resource1", "resource2", "resource3"]);
        let out1 = SwarmScheduler::new(config()).solve(&mut arena1, &mut pool1).unwrap();

        let mut arena2 = JobArena::new(jobs()).unwrap();
        let mut pool2 = open_pool(&["resource1", "resource2", "resource3"]);
        let out2 = SwarmScheduler::new(config()).solve(&mut arena2, &mut pool2).unwrap();

        assert_eq!(out1.schedule.entries, out2.schedule.entries);
        assert_eq!(out1.best_fitness, out2.best_fitness);
    }

    #[test]
    fn test_zero_time_budget_commits_best_so_far() {
        let mut arena = JobArena::new(vec![Job::new("WO1")
            .with_duration_range(2.0, 4.0)
            .with_demand("resource1", 1)])
        .unwrap();
        let mut pool = open_pool(&["resource1"]);

        let cfg = config().with_time_budget(Duration::ZERO);
        let outcome = SwarmScheduler::new(cfg).solve(&mut arena, &mut pool).unwrap();

        // No iterations ran, so no job was ever probed feasible.
        assert_eq!(outcome.iterations_run, 0);
        assert_eq!(outcome.unscheduled, vec!["WO1"]);
    }

    #[test]
    fn test_deadline_miss_audited() {
        let mut arena = JobArena::new(vec![
            Job::new("A").with_duration_range(4.0, 6.0).with_demand("resource1", 1),
            Job::new("B")
                .with_duration_range(2.0, 4.0)
                .with_demand("resource1", 1)
                .with_dependency("A")
                .with_deadline(1.0), // hopeless
        ])
        .unwrap();
        let mut pool = open_pool(&["resource1"]);

        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();
        assert!(outcome
            .schedule
            .violations
            .iter()
            .any(|v| v.job_id == "B"));
    }

    #[test]
    fn test_empty_job_set() {
        let mut arena = JobArena::new(vec![]).unwrap();
        let mut pool = open_pool(&[]);
        let outcome = SwarmScheduler::new(config()).solve(&mut arena, &mut pool).unwrap();
        assert!(outcome.schedule.is_empty());
        assert!(outcome.unscheduled.is_empty());
    }
}
