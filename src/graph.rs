//! Task dependency graph.
//!
//! Holds the task set and its precedence structure. Built once from caller
//! data and never mutated afterwards: each scheduling run copies the
//! baseline in-degrees into its own counters, so a single graph can back
//! any number of runs.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::models::Task;
use crate::validation::validate_tasks;

/// A validated task set with forward and reverse adjacency.
///
/// Tasks keep their input order; all adjacency lists are indices into that
/// order, and successor lists are sorted by it.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
    predecessors: Vec<Vec<usize>>,
    successors: Vec<Vec<usize>>,
}

impl TaskGraph {
    /// Builds a graph from a task set.
    ///
    /// # Errors
    /// Returns [`Error::InvalidGraph`] listing every duplicate name,
    /// unknown dependency, non-positive duration, and a duration total
    /// beyond `i64::MAX`. Cycles are not
    /// detected here; they surface when the graph is scheduled.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        validate_tasks(&tasks).map_err(|errors| Error::InvalidGraph { errors })?;

        let index: HashMap<String, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();

        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
        let mut edges = 0usize;

        for (i, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                let d = index[dep.as_str()];
                if predecessors[i].contains(&d) {
                    trace!(task = %task.name, dependency = %dep, "Ignoring repeated dependency");
                    continue;
                }
                predecessors[i].push(d);
                successors[d].push(i);
                edges += 1;
            }
        }

        debug!(tasks = tasks.len(), edges, "Built task graph");

        Ok(Self {
            tasks,
            index,
            predecessors,
            successors,
        })
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by name.
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.index_of(name).map(|i| &self.tasks[i])
    }

    /// Input position of a task.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Names of tasks that list `name` as a dependency, in input order.
    ///
    /// Sinks map to an empty list; unknown names to `None`.
    pub fn successors(&self, name: &str) -> Option<Vec<&str>> {
        self.index_of(name)
            .map(|i| self.names(&self.successors[i]))
    }

    /// Distinct dependencies of `name`, in declaration order.
    pub fn dependencies_of(&self, name: &str) -> Option<Vec<&str>> {
        self.index_of(name)
            .map(|i| self.names(&self.predecessors[i]))
    }

    /// Number of distinct dependencies of `name`.
    pub fn in_degree(&self, name: &str) -> Option<usize> {
        self.index_of(name).map(|i| self.predecessors[i].len())
    }

    /// Tasks with no dependencies, in input order.
    pub fn roots(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks
            .iter()
            .filter(|t| t.dependencies.is_empty())
    }

    /// Sum of all durations.
    pub fn total_duration(&self) -> i64 {
        self.tasks.iter().map(|t| t.duration).sum()
    }

    /// Fresh per-run copy of every task's dependency count.
    pub(crate) fn initial_in_degrees(&self) -> Vec<usize> {
        self.predecessors.iter().map(Vec::len).collect()
    }

    pub(crate) fn task_at(&self, idx: usize) -> &Task {
        &self.tasks[idx]
    }

    pub(crate) fn successor_indices(&self, idx: usize) -> &[usize] {
        &self.successors[idx]
    }

    pub(crate) fn predecessor_indices(&self, idx: usize) -> &[usize] {
        &self.predecessors[idx]
    }

    fn names(&self, indices: &[usize]) -> Vec<&str> {
        indices
            .iter()
            .map(|&i| self.tasks[i].name.as_str())
            .collect()
    }
}
