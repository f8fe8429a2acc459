//! Dispatching rules and the ready queue.
//!
//! A dispatching rule scores ready tasks; the scheduler always starts the
//! lowest-scoring one next. The default rule is EDD (earliest deadline
//! first). Ties are broken by the order in which tasks became ready.
//!
//! # Usage
//!
//! ```
//! use edf_schedule::dispatching::{rules, DispatchingRule, ReadyQueue};
//! use edf_schedule::models::Task;
//!
//! let tasks = vec![Task::new("late", 1, 50), Task::new("early", 1, 10)];
//! let mut queue = ReadyQueue::new();
//! for (idx, task) in tasks.iter().enumerate() {
//!     queue.push(rules::Edd.evaluate(task), idx);
//! }
//! assert_eq!(queue.pop(), Some(1));
//! assert_eq!(queue.pop(), Some(0));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod queue;
pub mod rules;

pub use queue::ReadyQueue;

use crate::models::Task;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (scheduled first).
pub type RuleScore = i64;

/// A dispatching rule that evaluates task priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for tasks that should be scheduled first.
///
/// # Stability
/// A task's score is computed once, when it becomes ready, and kept while
/// it waits in the queue. Rules must therefore not depend on the clock.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "EDD", "SPT").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a task.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, task: &Task) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
