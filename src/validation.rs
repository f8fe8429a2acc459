//! Input validation and schedule verification.
//!
//! Checks structural integrity of a task set before a graph is built.
//! Detects:
//! - Duplicate task names
//! - Dependencies on tasks that do not exist
//! - Non-positive durations
//! - Total durations that overflow the clock
//!
//! Acyclicity is deliberately not checked here. A cycle surfaces at run time
//! as an unschedulable residue, and [`find_cycle`] extracts a witness from it.
//!
//! [`verify_schedule`] checks a finished schedule against its graph and is
//! usable on schedules from any source.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::graph::TaskGraph;
use crate::models::{Schedule, Task, Violation, ViolationType};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same name.
    DuplicateName,
    /// A task depends on a name with no corresponding task.
    UnknownDependency,
    /// A task's duration is zero or negative.
    NonPositiveDuration,
    /// The durations sum past the largest representable time.
    DurationOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task set.
///
/// Checks:
/// 1. No duplicate task names
/// 2. Every duration is positive
/// 3. Every dependency names an existing task
/// 4. The summed durations fit in `i64`, so the clock cannot overflow
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();
    let mut horizon: Option<i64> = Some(0);

    for task in tasks {
        if !names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate task name: {}", task.name),
            ));
        }

        if task.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!(
                    "Task '{}' has non-positive duration {}",
                    task.name, task.duration
                ),
            ));
        } else {
            horizon = horizon.and_then(|h| h.checked_add(task.duration));
        }
    }

    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DurationOverflow,
            format!("Total duration of {} tasks exceeds {}", tasks.len(), i64::MAX),
        ));
    }

    for task in tasks {
        for dep in &task.dependencies {
            if !names.contains(dep.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownDependency,
                    format!("Task '{}' depends on unknown task '{}'", task.name, dep),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Finds a dependency cycle among the given residue tasks.
///
/// Every residue task still waits on at least one dependency that is itself
/// in the residue, so walking backwards along unfinished dependencies must
/// revisit a task. The loop closed by that revisit is returned in dependency
/// order (each task is a dependency of the next, the last is a dependency of
/// the first), rotated to start at the task that came first in the input.
///
/// Returns `None` only if `residue` is empty or not closed under unfinished
/// dependencies.
pub(crate) fn find_cycle(graph: &TaskGraph, residue: &[usize]) -> Option<Vec<usize>> {
    let first = *residue.first()?;
    let mut in_residue = vec![false; graph.len()];
    for &idx in residue {
        in_residue[idx] = true;
    }

    let mut path: Vec<usize> = Vec::new();
    let mut position: HashMap<usize, usize> = HashMap::new();
    let mut current = first;

    loop {
        if let Some(&start) = position.get(&current) {
            let mut cycle: Vec<usize> = path[start..].iter().rev().copied().collect();
            let lowest = cycle
                .iter()
                .enumerate()
                .min_by_key(|&(_, &idx)| idx)
                .map(|(pos, _)| pos)
                .unwrap_or(0);
            cycle.rotate_left(lowest);
            return Some(cycle);
        }

        position.insert(current, path.len());
        path.push(current);

        current = *graph
            .predecessor_indices(current)
            .iter()
            .find(|&&pred| in_residue[pred])?;
    }
}

/// Verifies a schedule against the graph it was produced from.
///
/// Checks that every graph task appears exactly once with consistent times,
/// that every dependency finishes before its dependent starts, and that the
/// server runs one task at a time without idling from t=0.
///
/// # Returns
/// All detected violations. An empty vector means the schedule is valid.
pub fn verify_schedule(graph: &TaskGraph, schedule: &Schedule) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut finish_by_name: HashMap<&str, Option<i64>> = HashMap::new();

    for task in schedule {
        let Some(expected) = graph.task(&task.name) else {
            violations.push(Violation::new(
                ViolationType::UnknownTask,
                &task.name,
                format!("Task '{}' is not part of the graph", task.name),
            ));
            continue;
        };

        if finish_by_name.contains_key(task.name.as_str()) {
            violations.push(Violation::new(
                ViolationType::DuplicateTask,
                &task.name,
                format!("Task '{}' is scheduled more than once", task.name),
            ));
            continue;
        }
        finish_by_name.insert(&task.name, task.finish_time);

        match (task.start_time, task.finish_time) {
            (Some(start), Some(finish))
                if start.checked_add(expected.duration) == Some(finish) => {}
            (start, finish) => violations.push(Violation::new(
                ViolationType::DurationMismatch,
                &task.name,
                format!(
                    "Task '{}' has start {:?} and finish {:?} for duration {}",
                    task.name, start, finish, expected.duration
                ),
            )),
        }
    }

    for task in graph.tasks() {
        if !finish_by_name.contains_key(task.name.as_str()) {
            violations.push(Violation::new(
                ViolationType::MissingTask,
                &task.name,
                format!("Task '{}' is missing from the schedule", task.name),
            ));
        }
    }

    for task in schedule {
        let (Some(start), Some(expected)) = (task.start_time, graph.task(&task.name)) else {
            continue;
        };
        for dep in &expected.dependencies {
            match finish_by_name.get(dep.as_str()).copied().flatten() {
                Some(dep_finish) if dep_finish <= start => {}
                Some(dep_finish) => violations.push(Violation::new(
                    ViolationType::PrecedenceViolation,
                    &task.name,
                    format!(
                        "Task '{}' starts at {} before dependency '{}' finishes at {}",
                        task.name, start, dep, dep_finish
                    ),
                )),
                None => violations.push(Violation::new(
                    ViolationType::PrecedenceViolation,
                    &task.name,
                    format!(
                        "Task '{}' starts at {} but dependency '{}' never finishes",
                        task.name, start, dep
                    ),
                )),
            }
        }
    }

    let mut server_free_at = 0;
    for task in schedule {
        let (Some(start), Some(finish)) = (task.start_time, task.finish_time) else {
            continue;
        };
        if start < server_free_at {
            violations.push(Violation::new(
                ViolationType::Overlap,
                &task.name,
                format!(
                    "Task '{}' starts at {} while the server is busy until {}",
                    task.name, start, server_free_at
                ),
            ));
        } else if start > server_free_at {
            violations.push(Violation::new(
                ViolationType::IdleGap,
                &task.name,
                format!(
                    "Server idles from {} to {} before task '{}'",
                    server_free_at, start, task.name
                ),
            ));
        }
        server_free_at = server_free_at.max(finish);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new("A", 3, 10),
            Task::new("B", 2, 8).with_dependency("A"),
            Task::new("C", 4, 12).with_dependency("A"),
        ]
    }

    fn placed(name: &str, duration: i64, deadline: i64, start: i64) -> Task {
        let mut t = Task::new(name, duration, deadline);
        t.place_at(start);
        t
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let tasks = vec![Task::new("A", 1, 5), Task::new("A", 2, 5)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName);
        assert!(errors[0].message.contains("A"));
    }

    #[test]
    fn test_unknown_dependency() {
        let tasks = vec![Task::new("A", 1, 5).with_dependency("NONEXISTENT")];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnknownDependency
                && e.message.contains("NONEXISTENT")));
    }

    #[test]
    fn test_non_positive_duration() {
        let tasks = vec![Task::new("zero", 0, 5), Task::new("negative", -3, 5)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NonPositiveDuration));
    }

    #[test]
    fn test_duration_overflow() {
        let tasks = vec![Task::new("A", i64::MAX, i64::MAX), Task::new("B", 1, i64::MAX)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DurationOverflow);
    }

    #[test]
    fn test_duration_at_limit_is_valid() {
        let tasks = vec![Task::new("A", i64::MAX - 1, 0), Task::new("B", 1, 0)];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_self_dependency_is_not_a_validation_error() {
        // A self-loop is a cycle: reported as a residue at run time.
        let tasks = vec![Task::new("A", 1, 5).with_dependency("A")];
        assert!(validate_tasks(&tasks).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new("A", 0, 5),
            Task::new("A", 1, 5).with_dependency("UNKNOWN"),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_find_cycle_two_node() {
        let graph = TaskGraph::new(vec![
            Task::new("A", 1, 5),
            Task::new("B", 1, 5).with_dependency("C"),
            Task::new("C", 1, 5).with_dependency("B"),
            Task::new("D", 1, 5).with_dependency("C"),
        ])
        .unwrap();

        let cycle = find_cycle(&graph, &[1, 2, 3]).unwrap();
        assert_eq!(cycle, vec![1, 2]);
    }

    #[test]
    fn test_find_cycle_from_downstream_task() {
        // D hangs off the X -> Y -> Z -> X loop; the walk starts at D.
        let graph = TaskGraph::new(vec![
            Task::new("D", 1, 5).with_dependency("Z"),
            Task::new("X", 1, 5).with_dependency("Z"),
            Task::new("Y", 1, 5).with_dependency("X"),
            Task::new("Z", 1, 5).with_dependency("Y"),
        ])
        .unwrap();

        let cycle = find_cycle(&graph, &[0, 1, 2, 3]).unwrap();
        assert_eq!(cycle, vec![1, 2, 3]);
    }

    #[test]
    fn test_find_cycle_self_loop() {
        let graph = TaskGraph::new(vec![Task::new("A", 1, 5).with_dependency("A")]).unwrap();
        assert_eq!(find_cycle(&graph, &[0]), Some(vec![0]));
    }

    #[test]
    fn test_find_cycle_empty_residue() {
        let graph = TaskGraph::new(sample_tasks()).unwrap();
        assert_eq!(find_cycle(&graph, &[]), None);
    }

    #[test]
    fn test_verify_valid_schedule() {
        let graph = TaskGraph::new(sample_tasks()).unwrap();
        let schedule = Schedule {
            tasks: vec![placed("A", 3, 10, 0), placed("B", 2, 8, 3), placed("C", 4, 12, 5)],
        };
        assert!(verify_schedule(&graph, &schedule).is_empty());
    }

    #[test]
    fn test_verify_precedence_violation() {
        let graph = TaskGraph::new(sample_tasks()).unwrap();
        let schedule = Schedule {
            tasks: vec![placed("B", 2, 8, 0), placed("A", 3, 10, 2), placed("C", 4, 12, 5)],
        };
        let violations = verify_schedule(&graph, &schedule);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::PrecedenceViolation);
        assert_eq!(violations[0].entity_id, "B");
    }

    #[test]
    fn test_verify_missing_and_unknown() {
        let graph = TaskGraph::new(sample_tasks()).unwrap();
        let schedule = Schedule {
            tasks: vec![placed("A", 3, 10, 0), placed("Q", 1, 1, 3)],
        };
        let violations = verify_schedule(&graph, &schedule);
        let kinds: Vec<_> = violations.iter().map(|v| &v.violation_type).collect();
        assert!(kinds.contains(&&ViolationType::UnknownTask));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| ***k == ViolationType::MissingTask)
                .count(),
            2
        );
    }

    #[test]
    fn test_verify_duplicate_task() {
        let graph = TaskGraph::new(vec![Task::new("A", 3, 10)]).unwrap();
        let schedule = Schedule {
            tasks: vec![placed("A", 3, 10, 0), placed("A", 3, 10, 3)],
        };
        let violations = verify_schedule(&graph, &schedule);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::DuplicateTask));
    }

    #[test]
    fn test_verify_overlap_and_idle() {
        let graph = TaskGraph::new(vec![
            Task::new("A", 3, 10),
            Task::new("B", 2, 10),
            Task::new("C", 1, 10),
        ])
        .unwrap();
        let schedule = Schedule {
            tasks: vec![placed("A", 3, 10, 1), placed("B", 2, 10, 2), placed("C", 1, 10, 6)],
        };
        let violations = verify_schedule(&graph, &schedule);
        let kinds: Vec<_> = violations
            .iter()
            .map(|v| (v.violation_type.clone(), v.entity_id.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ViolationType::IdleGap, "A"),
                (ViolationType::Overlap, "B"),
                (ViolationType::IdleGap, "C"),
            ]
        );
    }

    #[test]
    fn test_verify_duration_mismatch() {
        let graph = TaskGraph::new(vec![Task::new("A", 3, 10)]).unwrap();
        let mut wrong = Task::new("A", 3, 10);
        wrong.start_time = Some(0);
        wrong.finish_time = Some(5);
        let schedule = Schedule { tasks: vec![wrong] };

        let violations = verify_schedule(&graph, &schedule);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::DurationMismatch);
    }

    #[test]
    fn test_verify_start_near_limit() {
        let graph = TaskGraph::new(vec![Task::new("A", 3, 10)]).unwrap();
        let mut task = Task::new("A", 3, 10);
        task.start_time = Some(i64::MAX - 1);
        task.finish_time = Some(i64::MAX);
        let schedule = Schedule { tasks: vec![task] };

        let violations = verify_schedule(&graph, &schedule);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::DurationMismatch));
    }
}
