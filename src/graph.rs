//! Dependency graph service.
//!
//! Builds a directed acyclic graph from job dependency declarations,
//! computes levels (longest path from a root), and produces deterministic
//! topological orderings. Both solvers consume this service; neither ever
//! attempts to schedule a cyclic job set.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::cmp::Reverse;
use std::collections::{BinaryHeap, BTreeMap, HashMap, HashSet};

use log::debug;

use crate::arena::JobArena;
use crate::error::ScheduleError;
use crate::models::JobId;

/// The dependency DAG of one job set.
///
/// Nodes reference jobs by ID; the graph never owns the job records
/// themselves.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<JobId>,
    dependencies: HashMap<JobId, Vec<JobId>>,
    successors: HashMap<JobId, Vec<JobId>>,
    edge_count: usize,
}

impl DependencyGraph {
    /// Builds the graph: one node per job, one edge per declared dependency
    /// (prerequisite → dependent).
    ///
    /// Fails with [`ScheduleError::UnknownJob`] if a dependency names a job
    /// that is not in the arena, or [`ScheduleError::CycleDetected`] naming
    /// the offending cycle.
    pub fn build(arena: &JobArena) -> Result<Self, ScheduleError> {
        let mut nodes: Vec<JobId> = arena.jobs().iter().map(|j| j.id.clone()).collect();
        nodes.sort_unstable();

        let mut dependencies: HashMap<JobId, Vec<JobId>> = HashMap::new();
        let mut successors: HashMap<JobId, Vec<JobId>> = HashMap::new();
        let mut edge_count = 0;

        for job in arena.jobs() {
            for dep in &job.dependencies {
                if !arena.contains(dep) {
                    return Err(ScheduleError::UnknownJob { id: dep.clone() });
                }
                dependencies
                    .entry(job.id.clone())
                    .or_default()
                    .push(dep.clone());
                successors
                    .entry(dep.clone())
                    .or_default()
                    .push(job.id.clone());
                edge_count += 1;
            }
        }

        let graph = Self {
            nodes,
            dependencies,
            successors,
            edge_count,
        };
        graph.check_acyclic()?;
        debug!(
            "dependency graph built: {} jobs, {} edges",
            graph.nodes.len(),
            graph.edge_count
        );
        Ok(graph)
    }

    /// Job IDs in this graph, ascending.
    pub fn nodes(&self) -> &[JobId] {
        &self.nodes
    }

    /// Number of dependency edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Declared prerequisites of a job.
    pub fn dependencies_of(&self, id: &str) -> &[JobId] {
        self.dependencies.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Level of each job: 0 for roots, else `1 + max(level of prerequisites)`.
    ///
    /// Jobs sharing a level have no relative precedence and may run
    /// concurrently if resources allow.
    pub fn levels(&self) -> HashMap<JobId, i32> {
        let mut levels: HashMap<JobId, i32> = HashMap::with_capacity(self.nodes.len());
        for id in self.topological_order() {
            let level = self
                .dependencies_of(&id)
                .iter()
                .map(|dep| levels[dep] + 1)
                .max()
                .unwrap_or(0);
            levels.insert(id, level);
        }
        levels
    }

    /// Jobs grouped by level, ascending.
    pub fn level_groups(&self) -> BTreeMap<i32, Vec<JobId>> {
        let mut groups: BTreeMap<i32, Vec<JobId>> = BTreeMap::new();
        let levels = self.levels();
        // Iterate sorted nodes so groups come out in ascending job id order.
        for id in &self.nodes {
            groups.entry(levels[id]).or_default().push(id.clone());
        }
        groups
    }

    /// A dependency-safe linearization: every prerequisite appears before
    /// its dependents. Ties are broken by ascending job ID, so the order is
    /// deterministic for a given job set.
    pub fn topological_order(&self) -> Vec<JobId> {
        let mut indegree: HashMap<&JobId, usize> = self
            .nodes
            .iter()
            .map(|id| (id, self.dependencies_of(id).len()))
            .collect();

        let mut ready: BinaryHeap<Reverse<&JobId>> = self
            .nodes
            .iter()
            .filter(|id| self.dependencies_of(id).is_empty())
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.nodes.len());
        while let Some(Reverse(id)) = ready.pop() {
            order.push(id.clone());
            if let Some(next) = self.successors.get(id) {
                for succ in next {
                    if let Some(d) = indegree.get_mut(succ) {
                        *d -= 1;
                        if *d == 0 {
                            ready.push(Reverse(succ));
                        }
                    }
                }
            }
        }
        order
    }

    /// DFS coloring over successor edges; a back-edge means a cycle.
    fn check_acyclic(&self) -> Result<(), ScheduleError> {
        let mut visited: HashSet<&JobId> = HashSet::new();
        let mut stack: Vec<&JobId> = Vec::new();
        let mut on_stack: HashSet<&JobId> = HashSet::new();

        for id in &self.nodes {
            if !visited.contains(id) {
                self.dfs(id, &mut visited, &mut stack, &mut on_stack)?;
            }
        }
        Ok(())
    }

    fn dfs<'a>(
        &'a self,
        node: &'a JobId,
        visited: &mut HashSet<&'a JobId>,
        stack: &mut Vec<&'a JobId>,
        on_stack: &mut HashSet<&'a JobId>,
    ) -> Result<(), ScheduleError> {
        visited.insert(node);
        stack.push(node);
        on_stack.insert(node);

        if let Some(next) = self.successors.get(node) {
            for succ in next {
                if on_stack.contains(succ) {
                    // Back edge: report the cycle from its first occurrence.
                    let from = stack.iter().position(|&n| n == succ).unwrap_or(0);
                    let mut path: Vec<JobId> = stack[from..].iter().map(|&n| n.clone()).collect();
                    path.push(succ.clone());
                    return Err(ScheduleError::CycleDetected { path });
                }
                if !visited.contains(succ) {
                    self.dfs(succ, visited, stack, on_stack)?;
                }
            }
        }

        stack.pop();
        on_stack.remove(node);
        Ok(())
    }
}
