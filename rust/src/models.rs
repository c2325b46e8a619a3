//! Core data types for the activity graph and its results.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::critical_path::ActivityTiming;
use crate::index::ActivityId;

/// One activity in the graph arena.
///
/// Adjacency is stored as [`ActivityId`] handles into the owning graph.
/// `predecessors` is maintained by the graph from successor declarations.
#[derive(Clone, Debug, Default)]
pub struct ActivityNode {
    pub duration: f64,
    pub successors: Vec<ActivityId>,
    pub predecessors: Vec<ActivityId>,
    pub timing: ActivityTiming,
}

/// Read-only view of one activity, with names resolved.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityReport {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub successors: Vec<String>,
    #[pyo3(get)]
    pub predecessors: Vec<String>,
    #[pyo3(get)]
    pub earliest_start: f64,
    #[pyo3(get)]
    pub earliest_finish: f64,
    #[pyo3(get)]
    pub latest_start: f64,
    #[pyo3(get)]
    pub latest_finish: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub free_slack: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ActivityReport {
    fn __repr__(&self) -> String {
        format!(
            "ActivityReport(name={:?}, duration={}, es={}, ef={}, ls={}, lf={}, slack={})",
            self.name,
            self.duration,
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Outcome of a schedule computation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleSummary {
    /// Earliest finish of the sink, the minimum project duration.
    #[pyo3(get)]
    pub project_duration: f64,
    /// Zero-slack activities in topological order.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    /// Sum of all activity durations.
    #[pyo3(get)]
    pub total_work: f64,
    #[pyo3(get)]
    pub activity_count: usize,
}

#[pymethods]
impl ScheduleSummary {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleSummary(project_duration={}, critical_path={:?}, activities={})",
            self.project_duration, self.critical_path, self.activity_count
        )
    }
}

/// An activity placed on the calendar.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledActivity {
    #[pyo3(get)]
    pub activity_id: String,
    #[pyo3(get)]
    pub earliest_start: NaiveDate,
    #[pyo3(get)]
    pub earliest_finish: NaiveDate,
    #[pyo3(get)]
    pub latest_start: NaiveDate,
    #[pyo3(get)]
    pub latest_finish: NaiveDate,
    #[pyo3(get)]
    pub slack_days: f64,
    #[pyo3(get)]
    pub critical: bool,
}

#[pymethods]
impl ScheduledActivity {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledActivity(activity_id={:?}, start={}, end={}, critical={})",
            self.activity_id, self.earliest_start, self.earliest_finish, self.critical
        )
    }
}
