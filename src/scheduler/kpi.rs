//! Schedule quality metrics (KPIs).
//!
//! Computes scheduling performance indicators from a completed schedule.
//! Every metric is a pure function of the `(start, finish, deadline)`
//! triples, so recomputing from the same triples gives the same values.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Total Tardiness | Sum of max(0, completion - deadline) |
//! | Maximum Tardiness | Largest single delay |
//! | Late Count | Tasks finishing after their deadline |
//! | On-Time Rate | Fraction meeting deadlines |
//! | Avg Flow Time | Mean completion time (all tasks released at t=0) |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: i64,
    /// Sum of tardiness across all tasks.
    pub total_tardiness: i64,
    /// Maximum tardiness of any single task.
    pub max_tardiness: i64,
    /// Number of tasks finishing after their deadline.
    pub late_count: usize,
    /// Fraction of tasks completing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Average flow time: mean completion time.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule.
    ///
    /// Tasks without resolved times are ignored.
    pub fn calculate(schedule: &Schedule) -> Self {
        Self::from_times(schedule.iter().filter_map(|t| {
            Some((t.start_time?, t.finish_time?, t.deadline))
        }))
    }

    /// Computes KPIs from raw `(start, finish, deadline)` triples.
    pub fn from_times<I>(times: I) -> Self
    where
        I: IntoIterator<Item = (i64, i64, i64)>,
    {
        let mut makespan: i64 = 0;
        let mut total_tardiness: i64 = 0;
        let mut max_tardiness: i64 = 0;
        let mut late_count: usize = 0;
        let mut total_flow_time: f64 = 0.0;
        let mut counted: usize = 0;

        for (_start, finish, deadline) in times {
            counted += 1;
            makespan = makespan.max(finish);
            total_flow_time += finish as f64;

            if finish > deadline {
                let tardiness = finish.saturating_sub(deadline);
                total_tardiness = total_tardiness.saturating_add(tardiness);
                max_tardiness = max_tardiness.max(tardiness);
                late_count += 1;
            }
        }

        let on_time_rate = if counted == 0 {
            1.0
        } else {
            (counted - late_count) as f64 / counted as f64
        };

        let avg_flow_time = if counted == 0 {
            0.0
        } else {
            total_flow_time / counted as f64
        };

        Self {
            makespan,
            total_tardiness,
            max_tardiness,
            late_count,
            on_time_rate,
            avg_flow_time,
        }
    }

    /// Whether every task finished on time.
    pub fn all_on_time(&self) -> bool {
        self.late_count == 0
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_tardiness: i64, min_on_time_rate: f64) -> bool {
        self.max_tardiness <= max_tardiness && self.on_time_rate >= min_on_time_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;

    fn placed(name: &str, duration: i64, deadline: i64, start: i64) -> Task {
        let mut t = Task::new(name, duration, deadline);
        t.place_at(start);
        t
    }

    fn reference_schedule() -> Schedule {
        Schedule {
            tasks: vec![
                placed("E", 5, 7, 0),
                placed("A", 3, 10, 5),
                placed("B", 2, 8, 8),
                placed("C", 4, 12, 10),
                placed("D", 1, 11, 14),
            ],
        }
    }

    #[test]
    fn test_kpi_reference() {
        let kpi = ScheduleKpi::calculate(&reference_schedule());
        assert_eq!(kpi.makespan, 15);
        assert_eq!(kpi.total_tardiness, 8);
        assert_eq!(kpi.max_tardiness, 4);
        assert_eq!(kpi.late_count, 3);
        assert!((kpi.on_time_rate - 0.4).abs() < 1e-10);
        // (5 + 8 + 10 + 14 + 15) / 5
        assert!((kpi.avg_flow_time - 10.4).abs() < 1e-10);
        assert!(!kpi.all_on_time());
    }

    #[test]
    fn test_kpi_matches_schedule_methods() {
        let schedule = reference_schedule();
        let kpi = ScheduleKpi::calculate(&schedule);
        assert_eq!(kpi.makespan, schedule.makespan());
        assert_eq!(kpi.total_tardiness, schedule.total_tardiness());
    }

    #[test]
    fn test_kpi_from_times_agrees() {
        let schedule = reference_schedule();
        let triples: Vec<(i64, i64, i64)> = schedule
            .entries()
            .iter()
            .map(|e| (e.start_time, e.finish_time, e.deadline))
            .collect();
        assert_eq!(
            ScheduleKpi::from_times(triples),
            ScheduleKpi::calculate(&schedule)
        );
    }

    #[test]
    fn test_kpi_on_time() {
        let schedule = Schedule {
            tasks: vec![placed("J1", 1, 5, 0), placed("J2", 2, 5, 1)],
        };
        let kpi = ScheduleKpi::calculate(&schedule);
        assert_eq!(kpi.total_tardiness, 0);
        assert_eq!(kpi.max_tardiness, 0);
        assert!(kpi.all_on_time());
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_finish_on_deadline_is_on_time() {
        let kpi = ScheduleKpi::from_times([(0, 5, 5)]);
        assert_eq!(kpi.late_count, 0);
        assert_eq!(kpi.total_tardiness, 0);
    }

    #[test]
    fn test_kpi_extreme_deadlines_saturate() {
        let kpi = ScheduleKpi::from_times([(0, 1, i64::MIN), (1, 2, i64::MIN)]);
        assert_eq!(kpi.max_tardiness, i64::MAX);
        assert_eq!(kpi.total_tardiness, i64::MAX);
        assert_eq!(kpi.late_count, 2);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::new());
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.total_tardiness, 0);
        assert_eq!(kpi.late_count, 0);
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_flow_time - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_ignores_unscheduled() {
        let schedule = Schedule {
            tasks: vec![placed("J1", 1, 0, 0), Task::new("J2", 1, 0)],
        };
        let kpi = ScheduleKpi::calculate(&schedule);
        assert_eq!(kpi.late_count, 1);
        assert_eq!(kpi.makespan, 1);
    }

    #[test]
    fn test_meets_thresholds() {
        let kpi = ScheduleKpi::calculate(&reference_schedule());
        assert!(kpi.meets_thresholds(4, 0.4));
        assert!(!kpi.meets_thresholds(3, 0.0));
        assert!(!kpi.meets_thresholds(10, 0.5));
    }

    #[test]
    fn test_kpi_serialize() {
        let kpi = ScheduleKpi::calculate(&reference_schedule());
        let json = serde_json::to_value(&kpi).unwrap();
        assert_eq!(json["makespan"], 15);
        assert_eq!(json["total_tardiness"], 8);
    }
}
