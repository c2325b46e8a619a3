//! Configuration types for schedule computation and calendar projection.

use pyo3::prelude::*;

/// Configuration for [`ActivityGraph::compute_schedule`](crate::ActivityGraph::compute_schedule).
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Largest absolute slack still treated as zero when marking critical activities.
    #[pyo3(get, set)]
    pub slack_tolerance: f64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            slack_tolerance: 1e-9,
        }
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, slack_tolerance=None))]
    fn new(verbosity: Option<u8>, slack_tolerance: Option<f64>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            slack_tolerance: slack_tolerance.unwrap_or(defaults.slack_tolerance),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(verbosity={}, slack_tolerance={})",
            self.verbosity, self.slack_tolerance
        )
    }
}

/// Configuration for projecting a computed schedule onto calendar dates.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct CalendarConfig {
    /// Count only Monday through Friday as working days.
    #[pyo3(get, set)]
    pub skip_weekends: bool,
}

#[pymethods]
impl CalendarConfig {
    #[new]
    #[pyo3(signature = (skip_weekends=false))]
    fn new(skip_weekends: bool) -> Self {
        Self { skip_weekends }
    }

    fn __repr__(&self) -> String {
        format!("CalendarConfig(skip_weekends={})", self.skip_weekends)
    }
}
