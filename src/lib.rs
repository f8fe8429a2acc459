//! Dependency-aware Earliest-Deadline-First scheduling on a single server.
//!
//! Given tasks with durations, deadlines, and precedence constraints
//! forming a DAG, produces a total execution order with start and finish
//! times, plus lateness metrics (makespan, total tardiness).
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Task`, `Schedule`, `ScheduleEntry`, `Violation`
//! - **`graph`**: `TaskGraph`, the validated task set with its adjacency
//! - **`dispatching`**: Priority rules (EDD, MST, SPT, LPT) and the ready queue
//! - **`scheduler`**: The single-server `Scheduler` and `ScheduleKpi`
//! - **`validation`**: Input checks and post-hoc schedule verification
//!
//! # Example
//!
//! ```
//! use edf_schedule::models::Task;
//!
//! let schedule = edf_schedule::schedule_tasks(vec![
//!     Task::new("A", 3, 10),
//!     Task::new("B", 2, 8).with_dependency("A"),
//!     Task::new("C", 4, 12).with_dependency("A"),
//!     Task::new("D", 1, 11).with_dependencies(["B", "C"]),
//!     Task::new("E", 5, 7),
//! ])?;
//!
//! assert_eq!(schedule.order(), vec!["E", "A", "B", "C", "D"]);
//! assert_eq!(schedule.makespan(), 15);
//! assert_eq!(schedule.total_tardiness(), 8);
//! # Ok::<(), edf_schedule::Error>(())
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Lawler (1973), "Optimal Sequencing of a Single Machine Subject to
//!   Precedence Constraints"

pub mod dispatching;
mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Error, Result};

/// Schedules `tasks` with the default EDF scheduler.
///
/// # Errors
/// [`Error::InvalidGraph`] for duplicate names, unknown dependencies, or
/// non-positive durations; [`Error::UnschedulableResidue`] when a
/// dependency cycle keeps tasks from ever becoming ready.
pub fn schedule_tasks(tasks: Vec<models::Task>) -> Result<models::Schedule> {
    scheduler::Scheduler::new().schedule_tasks(tasks)
}
