//! Dependency-aware EDF scheduler for a single server.
//!
//! # Algorithm
//!
//! 1. Copy the graph's in-degrees into run-local counters.
//! 2. Queue every task without dependencies, in input order.
//! 3. Repeatedly start the best-scoring ready task at the current time,
//!    advance the clock by its duration, and release each successor whose
//!    counter drops to zero.
//! 4. If tasks remain unscheduled once the queue drains, report them.
//!
//! The server never idles while work is ready and never runs two tasks at
//! once, so a complete schedule's makespan equals the sum of durations.
//!
//! # Complexity
//! O((n + e) log n) for n tasks and e dependency edges.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 3.2: Precedence-constrained
//! single-machine scheduling

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::dispatching::{rules, DispatchingRule, ReadyQueue};
use crate::error::{Error, Result};
use crate::graph::TaskGraph;
use crate::models::{Schedule, Task};
use crate::validation::find_cycle;

/// Single-server, non-preemptive, precedence-respecting list scheduler.
///
/// Among ready tasks it starts the one with the lowest dispatching score;
/// the default rule is EDD, giving Earliest-Deadline-First behaviour. Tasks
/// with equal scores start in the order they became ready (input order for
/// tasks ready at t=0).
///
/// The scheduler holds no per-run state, so one instance may run any number
/// of graphs, concurrently if needed.
///
/// # Example
///
/// ```
/// use edf_schedule::graph::TaskGraph;
/// use edf_schedule::models::Task;
/// use edf_schedule::scheduler::Scheduler;
///
/// let graph = TaskGraph::new(vec![
///     Task::new("A", 3, 10),
///     Task::new("B", 2, 8).with_dependency("A"),
///     Task::new("E", 5, 7),
/// ])
/// .unwrap();
///
/// let schedule = Scheduler::new().run(&graph).unwrap();
/// assert_eq!(schedule.order(), vec!["E", "A", "B"]);
/// assert_eq!(schedule.makespan(), 10);
/// assert_eq!(schedule.total_tardiness(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Scheduler {
    rule: Arc<dyn DispatchingRule>,
}

/// Per-run working state. Dropped when the run ends.
struct RunState {
    remaining_deps: Vec<usize>,
    ready: ReadyQueue,
    clock: i64,
}

impl Scheduler {
    /// Creates an EDF scheduler.
    pub fn new() -> Self {
        Self {
            rule: Arc::new(rules::Edd),
        }
    }

    /// Replaces the dispatching rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rule = Arc::new(rule);
        self
    }

    /// The active dispatching rule.
    pub fn rule(&self) -> &dyn DispatchingRule {
        self.rule.as_ref()
    }

    /// Schedules every task in the graph.
    ///
    /// # Errors
    /// Returns [`Error::UnschedulableResidue`] when a dependency cycle keeps
    /// some tasks from ever becoming ready. No partial schedule is returned.
    pub fn run(&self, graph: &TaskGraph) -> Result<Schedule> {
        debug!(tasks = graph.len(), rule = self.rule.name(), "Starting schedule run");

        let mut state = RunState {
            remaining_deps: graph.initial_in_degrees(),
            ready: ReadyQueue::with_capacity(graph.len()),
            clock: 0,
        };

        for (idx, task) in graph.tasks().iter().enumerate() {
            if state.remaining_deps[idx] == 0 {
                state.ready.push(self.rule.evaluate(task), idx);
            }
        }

        let mut schedule = Schedule {
            tasks: Vec::with_capacity(graph.len()),
        };

        while let Some(idx) = state.ready.pop() {
            let mut task = graph.task_at(idx).clone();
            let start = state.clock;
            state.clock = task.place_at(start);
            trace!(task = %task.name, start, finish = state.clock, "Placed task");
            schedule.push(task);

            for &succ in graph.successor_indices(idx) {
                state.remaining_deps[succ] -= 1;
                if state.remaining_deps[succ] == 0 {
                    state.ready.push(self.rule.evaluate(graph.task_at(succ)), succ);
                }
            }
        }

        if schedule.len() < graph.len() {
            return Err(residue_error(graph, &state.remaining_deps));
        }

        debug!(
            makespan = schedule.makespan(),
            total_tardiness = schedule.total_tardiness(),
            late = schedule.late_tasks().len(),
            "Schedule run complete"
        );

        Ok(schedule)
    }

    /// Builds a graph from `tasks` and schedules it.
    ///
    /// # Errors
    /// [`Error::InvalidGraph`] for malformed input,
    /// [`Error::UnschedulableResidue`] for cyclic dependencies.
    pub fn schedule_tasks(&self, tasks: Vec<Task>) -> Result<Schedule> {
        let graph = TaskGraph::new(tasks)?;
        self.run(&graph)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Describes the tasks a run could not reach.
///
/// A task is unscheduled exactly when its dependency counter never reached
/// zero, i.e. it is still positive after the queue drained.
fn residue_error(graph: &TaskGraph, remaining_deps: &[usize]) -> Error {
    let residue: Vec<usize> = remaining_deps
        .iter()
        .enumerate()
        .filter(|(_, &left)| left > 0)
        .map(|(idx, _)| idx)
        .collect();

    let name = |idx: usize| graph.task_at(idx).name.clone();
    let unscheduled: Vec<String> = residue.iter().map(|&idx| name(idx)).collect();
    let cycle: Vec<String> = find_cycle(graph, &residue)
        .unwrap_or_default()
        .into_iter()
        .map(name)
        .collect();

    warn!(
        unscheduled = unscheduled.len(),
        cycle = %cycle.join(" -> "),
        "Dependency cycle left tasks unscheduled"
    );

    Error::UnschedulableResidue { unscheduled, cycle }
}
