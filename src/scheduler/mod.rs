//! Single-server scheduling and KPI evaluation.
//!
//! # Algorithm
//!
//! `Scheduler` is a dependency-aware list scheduler: readiness is purely
//! structural (all dependencies finished), and a dispatching rule (EDD by
//! default) picks among ready tasks. It is a greedy heuristic, not an
//! optimal solver; minimizing total tardiness under precedence constraints
//! is NP-hard.
//!
//! # KPI
//!
//! `ScheduleKpi` computes standard scheduling metrics: makespan, tardiness,
//! late count, on-time rate, and flow time.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod edf;
mod kpi;

pub use edf::Scheduler;
pub use kpi::ScheduleKpi;
