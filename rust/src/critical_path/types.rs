//! Types shared by the critical path passes.

use std::fmt;

use thiserror::Error;

/// Per-activity schedule attributes written by the critical path computation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityTiming {
    /// Earliest possible start time (forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (backward pass).
    pub latest_finish: f64,
    /// Total slack = latest_start - earliest_start.
    pub slack: f64,
    /// Delay that leaves every successor's earliest start unchanged.
    pub free_slack: f64,
    /// Whether the activity was reported on the critical path.
    pub critical: bool,
}

impl ActivityTiming {
    pub fn has_zero_slack(&self, tolerance: f64) -> bool {
        self.slack.abs() <= tolerance
    }
}

/// Role of a designated boundary activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentinelRole {
    Source,
    Sink,
}

impl fmt::Display for SentinelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentinelRole::Source => write!(f, "Source"),
            SentinelRole::Sink => write!(f, "Sink"),
        }
    }
}

/// Errors that can occur while computing a schedule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{role} activity '{name}' is not in the graph")]
    MissingSentinel { role: SentinelRole, name: String },
    #[error("Source activity '{activity}' must not have predecessors, found '{predecessor}'")]
    SourceHasPredecessors {
        activity: String,
        predecessor: String,
    },
    #[error("Sink activity '{activity}' must not have successors, found '{successor}'")]
    SinkHasSuccessors { activity: String, successor: String },
    #[error("Activity '{activity}' has no predecessors but is not the source")]
    MultipleSources { activity: String },
    #[error("Activity '{activity}' has no successors but is not the sink")]
    MultipleSinks { activity: String },
    #[error("Circular dependency detected among activities: {activities:?}")]
    CircularDependency { activities: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slack_uses_tolerance() {
        let timing = ActivityTiming {
            earliest_start: 4.0,
            earliest_finish: 7.0,
            latest_start: 4.0 + 1e-12,
            latest_finish: 7.0 + 1e-12,
            slack: 1e-12,
            ..Default::default()
        };
        assert!(timing.has_zero_slack(1e-9));
        assert!(!timing.has_zero_slack(0.0));

        let relaxed = ActivityTiming {
            slack: 2.0,
            ..Default::default()
        };
        assert!(!relaxed.has_zero_slack(1e-9));
    }

    #[test]
    fn test_error_messages_name_the_activity() {
        let err = ScheduleError::MissingSentinel {
            role: SentinelRole::Sink,
            name: "End".to_string(),
        };
        assert_eq!(err.to_string(), "Sink activity 'End' is not in the graph");

        let err = ScheduleError::CircularDependency {
            activities: vec!["A".to_string(), "B".to_string()],
        };
        assert!(err.to_string().contains("\"A\", \"B\""));
    }
}
