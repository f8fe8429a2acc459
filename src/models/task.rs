//! Task model.
//!
//! A task is a unit of work processed by the single server. It carries a
//! processing duration, a deadline, and the names of the tasks that must
//! finish before it may start.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};

/// A task to be scheduled.
///
/// # Time Representation
/// All times are integer time units relative to the scheduling epoch (t=0).
/// The consumer defines what a unit means (minutes, hours, days).
///
/// `start_time` and `finish_time` are scheduling outputs: they stay `None`
/// on caller input and are set together by the scheduler, with
/// `finish_time == start_time + duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Processing time once started (must be positive).
    pub duration: i64,
    /// Target completion time.
    pub deadline: i64,
    /// Names of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Scheduled start time.
    #[serde(default)]
    pub start_time: Option<i64>,
    /// Scheduled finish time.
    #[serde(default)]
    pub finish_time: Option<i64>,
}

impl Task {
    /// Creates an unscheduled task with no dependencies.
    pub fn new(name: impl Into<String>, duration: i64, deadline: i64) -> Self {
        Self {
            name: name.into(),
            duration,
            deadline,
            dependencies: Vec::new(),
            start_time: None,
            finish_time: None,
        }
    }

    /// Adds a dependency.
    pub fn with_dependency(mut self, name: impl Into<String>) -> Self {
        self.dependencies.push(name.into());
        self
    }

    /// Adds several dependencies.
    pub fn with_dependencies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(names.into_iter().map(Into::into));
        self
    }

    /// Places the task on the timeline starting at `start`.
    ///
    /// Graph validation bounds the summed durations, so a scheduler clock
    /// never reaches the saturation point.
    pub(crate) fn place_at(&mut self, start: i64) -> i64 {
        let finish = start.saturating_add(self.duration);
        self.start_time = Some(start);
        self.finish_time = Some(finish);
        finish
    }

    /// Clears the scheduling outputs.
    pub fn reset_schedule(&mut self) {
        self.start_time = None;
        self.finish_time = None;
    }

    /// Whether the task has been placed on the timeline.
    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.start_time.is_some() && self.finish_time.is_some()
    }

    /// Signed lateness: `finish - deadline`, saturating at the `i64`
    /// bounds. `None` until scheduled.
    pub fn lateness(&self) -> Option<i64> {
        self.finish_time
            .map(|finish| finish.saturating_sub(self.deadline))
    }

    /// Tardiness: `max(0, finish - deadline)`. `None` until scheduled.
    pub fn tardiness(&self) -> Option<i64> {
        self.lateness().map(|l| l.max(0))
    }

    /// Whether the task finishes after its deadline.
    pub fn is_late(&self) -> bool {
        self.lateness().is_some_and(|l| l > 0)
    }
}
