//! Schedule (solution) model.
//!
//! A schedule is the ordered sequence of tasks as they were started on the
//! single server, each carrying its resolved start and finish time.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::Task;

/// A complete schedule, in start order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Scheduled tasks in the order they were started.
    pub tasks: Vec<Task>,
}

/// Flat output record for one scheduled task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Task name.
    pub name: String,
    /// Start time.
    pub start_time: i64,
    /// Finish time.
    pub finish_time: i64,
    /// Deadline (carried for late-task reporting).
    pub deadline: i64,
}

impl ScheduleEntry {
    /// Tardiness of this entry.
    #[inline]
    pub fn tardiness(&self) -> i64 {
        self.finish_time.saturating_sub(self.deadline).max(0)
    }
}

/// A defect found when checking a schedule against its task graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related task name.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A graph task is absent from the schedule.
    MissingTask,
    /// A task appears more than once.
    DuplicateTask,
    /// A scheduled task does not exist in the graph.
    UnknownTask,
    /// Times are unset or `finish != start + duration`.
    DurationMismatch,
    /// A task started before one of its dependencies finished.
    PrecedenceViolation,
    /// Two tasks occupy the server at the same time.
    Overlap,
    /// The server sat idle between two tasks (or before the first one).
    IdleGap,
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scheduled task.
    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterates tasks in start order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Makespan: finish time of the last scheduled task (0 if empty).
    ///
    /// The server never idles and runs one task at a time, so this equals
    /// the sum of all durations for a complete schedule.
    pub fn makespan(&self) -> i64 {
        self.tasks
            .last()
            .and_then(|t| t.finish_time)
            .unwrap_or(0)
    }

    /// Sum of `max(0, finish - deadline)` over all scheduled tasks.
    ///
    /// Saturates at `i64::MAX` rather than overflowing.
    pub fn total_tardiness(&self) -> i64 {
        self.tasks
            .iter()
            .filter_map(Task::tardiness)
            .fold(0, i64::saturating_add)
    }

    /// Finds a scheduled task by name.
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    /// Position of a task in the start order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.name == name)
    }

    /// Tasks that finish after their deadline, in start order.
    pub fn late_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_late()).collect()
    }

    /// Task names in start order.
    pub fn order(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    /// Flat output records. Tasks without resolved times are skipped.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        self.tasks
            .iter()
            .filter_map(|t| {
                Some(ScheduleEntry {
                    name: t.name.clone(),
                    start_time: t.start_time?,
                    finish_time: t.finish_time?,
                    deadline: t.deadline,
                })
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
