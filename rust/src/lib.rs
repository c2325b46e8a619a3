//! Critical Path Method scheduling over activity graphs.
//!
//! Build an [`ActivityGraph`] from named activities, durations and successor
//! lists, run [`ActivityGraph::compute_schedule`], then read per-activity
//! earliest/latest times, slack and the critical path. The same API is
//! exposed to Python as the `cpm_rust` extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

mod calendar;
mod config;
pub mod critical_path;
mod graph;
mod index;
pub mod logging;
mod models;

pub use calendar::{project_onto_calendar, CalendarError};
pub use config::{CalendarConfig, ScheduleConfig};
pub use critical_path::{calculate_schedule, ActivityTiming, ScheduleError, SentinelRole};
pub use graph::{ActivityGraph, GraphError, DEFAULT_SINK, DEFAULT_SOURCE};
pub use index::{ActivityId, ActivityIndex};
pub use models::{ActivityNode, ActivityReport, ScheduleSummary, ScheduledActivity};

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Activity graph (PyO3 wrapper).
#[pyclass(name = "ActivityGraph")]
#[derive(Clone, Debug, Default)]
pub struct PyActivityGraph {
    inner: ActivityGraph,
}

#[pymethods]
impl PyActivityGraph {
    #[new]
    #[pyo3(signature = (source=None, sink=None))]
    fn new(source: Option<String>, sink: Option<String>) -> PyResult<Self> {
        let inner = ActivityGraph::with_sentinels(
            source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            sink.unwrap_or_else(|| DEFAULT_SINK.to_string()),
        )
        .map_err(value_error)?;
        Ok(Self { inner })
    }

    /// Register or update an activity and its successors.
    #[pyo3(signature = (name, duration=0.0, successors=None))]
    fn insert_activity(
        &mut self,
        name: String,
        duration: f64,
        successors: Option<Vec<String>>,
    ) -> PyResult<()> {
        let successors = successors.unwrap_or_default();
        self.inner
            .insert_activity(&name, duration, successors.as_slice())
            .map_err(value_error)
    }

    #[pyo3(signature = (name, duration=0.0))]
    fn declare_activity(&mut self, name: String, duration: f64) -> PyResult<()> {
        self.inner
            .declare_activity(&name, duration)
            .map(|_| ())
            .map_err(value_error)
    }

    fn link(&mut self, from: String, to: String) {
        self.inner.link(&from, &to);
    }

    /// Compute all activity timings and the critical path.
    ///
    /// Raises ValueError if the graph has a cycle or is not anchored by its
    /// source and sink.
    #[pyo3(signature = (config=None))]
    fn compute_schedule(&mut self, config: Option<ScheduleConfig>) -> PyResult<ScheduleSummary> {
        let config = config.unwrap_or_default();
        self.inner.compute_schedule(&config).map_err(value_error)
    }

    fn critical_path(&self) -> Vec<String> {
        self.inner.critical_path().to_vec()
    }

    fn project_duration(&self) -> Option<f64> {
        self.inner.project_duration()
    }

    fn node(&self, name: String) -> Option<ActivityReport> {
        self.inner.report(&name)
    }

    fn reports(&self) -> Vec<ActivityReport> {
        self.inner.reports()
    }

    fn activity_names(&self) -> Vec<String> {
        self.inner.activity_names().map(str::to_string).collect()
    }

    #[pyo3(signature = (start_date, config=None))]
    fn to_calendar(
        &self,
        start_date: NaiveDate,
        config: Option<CalendarConfig>,
    ) -> PyResult<Vec<ScheduledActivity>> {
        let config = config.unwrap_or_default();
        self.inner
            .to_calendar(start_date, &config)
            .map_err(value_error)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __contains__(&self, name: String) -> bool {
        self.inner.contains(&name)
    }

    fn __repr__(&self) -> String {
        format!(
            "ActivityGraph(activities={}, source={:?}, sink={:?}, project_duration={:?})",
            self.inner.len(),
            self.inner.source_name(),
            self.inner.sink_name(),
            self.inner.project_duration()
        )
    }
}

/// Build a graph from `(name, duration, successors)` triples and compute its schedule.
///
/// # Arguments
/// * `activities` - Activities in insertion order
/// * `config` - Optional schedule configuration
///
/// # Raises
/// * ValueError for invalid durations, cycles, or a missing "Start"/"End"
#[pyfunction]
#[pyo3(signature = (activities, config=None))]
fn run_critical_path(
    activities: Vec<(String, f64, Vec<String>)>,
    config: Option<ScheduleConfig>,
) -> PyResult<ScheduleSummary> {
    let mut graph = ActivityGraph::new();
    for (name, duration, successors) in &activities {
        graph
            .insert_activity(name, *duration, successors.as_slice())
            .map_err(value_error)?;
    }
    let config = config.unwrap_or_default();
    graph.compute_schedule(&config).map_err(value_error)
}

/// The cpm_rust Python module.
#[pymodule]
fn cpm_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Graph and results
    m.add_class::<PyActivityGraph>()?;
    m.add_class::<ActivityReport>()?;
    m.add_class::<ScheduleSummary>()?;
    m.add_class::<ScheduledActivity>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;
    m.add_class::<CalendarConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(run_critical_path, m)?)?;

    Ok(())
}
