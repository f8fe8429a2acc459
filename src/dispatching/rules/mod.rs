//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Due-date**: EDD, MST
//! - **Time-based**: SPT, LPT
//!
//! # Score Convention
//! All rules return lower scores for higher priority tasks.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use super::{DispatchingRule, RuleScore};
use crate::models::Task;

// ======================== Due-date rules ========================

/// Earliest Due Date (EDD).
///
/// Prioritizes tasks with earlier deadlines. Applied to the ready set this is
/// the Earliest-Deadline-First (EDF) policy, and it is the scheduler's
/// default rule.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on a single
/// machine without precedence constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        task.deadline
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}

/// Minimum Slack Time.
///
/// Slack = (deadline - now) - duration. Every ready task shares the same
/// `now`, so ranking by `deadline - duration` gives the same order at any
/// point of the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mst;

impl DispatchingRule for Mst {
    fn name(&self) -> &'static str {
        "MST"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        task.deadline.saturating_sub(task.duration)
    }

    fn description(&self) -> &'static str {
        "Minimum Slack Time"
    }
}

// ======================== Time-based rules ========================

/// Shortest Processing Time.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        task.duration
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, task: &Task) -> RuleScore {
        -task.duration
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}
