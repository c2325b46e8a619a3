//! Activity graph construction and read access.
//!
//! Nodes live in an arena indexed by [`ActivityId`]. A node is created the
//! first time its name is seen, either as an inserted activity or as a
//! successor of one, and is never removed. Predecessor lists are derived from
//! successor declarations and always mirror them.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::{project_onto_calendar, CalendarError};
use crate::config::{CalendarConfig, ScheduleConfig};
use crate::critical_path::{calculate_schedule, ActivityTiming, ScheduleError};
use crate::index::{ActivityId, ActivityIndex};
use crate::models::{ActivityNode, ActivityReport, ScheduleSummary, ScheduledActivity};

/// Name of the source activity used by [`ActivityGraph::new`].
pub const DEFAULT_SOURCE: &str = "Start";
/// Name of the sink activity used by [`ActivityGraph::new`].
pub const DEFAULT_SINK: &str = "End";

/// Errors raised while building a graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Activity '{activity}' has negative duration {duration}")]
    NegativeDuration { activity: String, duration: f64 },
    #[error("Activity '{activity}' has a non-finite duration")]
    NonFiniteDuration { activity: String },
    #[error("Source and sink must be different activities, both are '{0}'")]
    SentinelConflict(String),
}

/// A project as a directed acyclic graph of activities.
#[derive(Clone, Debug)]
pub struct ActivityGraph {
    index: ActivityIndex,
    nodes: Vec<ActivityNode>,
    source: String,
    sink: String,
    critical_path: Vec<String>,
    summary: Option<ScheduleSummary>,
}

impl Default for ActivityGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityGraph {
    /// Create an empty graph whose source is "Start" and sink is "End".
    pub fn new() -> Self {
        Self {
            index: ActivityIndex::default(),
            nodes: Vec::new(),
            source: DEFAULT_SOURCE.to_string(),
            sink: DEFAULT_SINK.to_string(),
            critical_path: Vec::new(),
            summary: None,
        }
    }

    /// Create an empty graph with custom source and sink activity names.
    pub fn with_sentinels(
        source: impl Into<String>,
        sink: impl Into<String>,
    ) -> Result<Self, GraphError> {
        let source = source.into();
        let sink = sink.into();
        if source == sink {
            return Err(GraphError::SentinelConflict(source));
        }
        Ok(Self {
            source,
            sink,
            ..Self::new()
        })
    }

    /// Register or update an activity and its outgoing edges.
    ///
    /// If `name` already exists (for example as a placeholder created by an
    /// earlier successor reference) its duration and successor list are
    /// replaced; its predecessors are kept. Successors that do not exist yet
    /// are created as zero-duration placeholders.
    pub fn insert_activity<S: AsRef<str>>(
        &mut self,
        name: &str,
        duration: f64,
        successors: &[S],
    ) -> Result<(), GraphError> {
        check_duration(name, duration)?;
        let id = self.ensure_node(name);
        self.nodes[id as usize].duration = duration;

        // Drop the back-edges of the successor list being replaced
        let previous = std::mem::take(&mut self.nodes[id as usize].successors);
        for old in previous {
            let predecessors = &mut self.nodes[old as usize].predecessors;
            if let Some(pos) = predecessors.iter().position(|&p| p == id) {
                predecessors.remove(pos);
            }
        }

        for successor in successors {
            let successor_id = self.ensure_node(successor.as_ref());
            self.add_edge(id, successor_id);
        }

        self.invalidate();
        Ok(())
    }

    /// Declare an activity without touching its edges.
    ///
    /// Together with [`link`](Self::link) this allows building the graph in
    /// two phases, nodes first and edges second.
    pub fn declare_activity(&mut self, name: &str, duration: f64) -> Result<ActivityId, GraphError> {
        check_duration(name, duration)?;
        let id = self.ensure_node(name);
        self.nodes[id as usize].duration = duration;
        self.invalidate();
        Ok(id)
    }

    /// Add one edge `from -> to`, creating missing endpoints as placeholders.
    pub fn link(&mut self, from: &str, to: &str) -> (ActivityId, ActivityId) {
        let from_id = self.ensure_node(from);
        let to_id = self.ensure_node(to);
        self.add_edge(from_id, to_id);
        self.invalidate();
        (from_id, to_id)
    }

    /// Run the critical path computation and store its results on the nodes.
    ///
    /// On error the graph is left exactly as it was.
    pub fn compute_schedule(
        &mut self,
        config: &ScheduleConfig,
    ) -> Result<ScheduleSummary, ScheduleError> {
        let (timings, summary) = calculate_schedule(self, config)?;
        for (node, timing) in self.nodes.iter_mut().zip(timings) {
            node.timing = timing;
        }
        self.critical_path = summary.critical_path.clone();
        self.summary = Some(summary.clone());
        Ok(summary)
    }

    /// Place the computed schedule on the calendar, starting at `start`.
    pub fn to_calendar(
        &self,
        start: NaiveDate,
        config: &CalendarConfig,
    ) -> Result<Vec<ScheduledActivity>, CalendarError> {
        project_onto_calendar(self, start, config)
    }

    pub fn source_name(&self) -> &str {
        &self.source
    }

    pub fn sink_name(&self) -> &str {
        &self.sink
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.get(name).is_some()
    }

    /// Activity names in insertion order.
    pub fn activity_names(&self) -> impl Iterator<Item = &str> {
        self.index.names()
    }

    pub fn node(&self, name: &str) -> Option<&ActivityNode> {
        self.index.get(name).map(|id| &self.nodes[id as usize])
    }

    pub fn duration(&self, name: &str) -> Option<f64> {
        self.node(name).map(|node| node.duration)
    }

    pub fn successors(&self, name: &str) -> Option<Vec<&str>> {
        self.node(name).map(|node| self.names_of(&node.successors))
    }

    pub fn predecessors(&self, name: &str) -> Option<Vec<&str>> {
        self.node(name).map(|node| self.names_of(&node.predecessors))
    }

    pub fn timing(&self, name: &str) -> Option<&ActivityTiming> {
        self.node(name).map(|node| &node.timing)
    }

    /// Critical activities from the last computation, empty if the graph
    /// changed since.
    pub fn critical_path(&self) -> &[String] {
        &self.critical_path
    }

    pub fn summary(&self) -> Option<&ScheduleSummary> {
        self.summary.as_ref()
    }

    pub fn project_duration(&self) -> Option<f64> {
        self.summary.as_ref().map(|s| s.project_duration)
    }

    pub fn report(&self, name: &str) -> Option<ActivityReport> {
        self.index.get(name).map(|id| self.report_for(id))
    }

    /// Reports for every activity in insertion order.
    pub fn reports(&self) -> Vec<ActivityReport> {
        (0..self.nodes.len() as ActivityId)
            .map(|id| self.report_for(id))
            .collect()
    }

    pub(crate) fn arena(&self) -> &[ActivityNode] {
        &self.nodes
    }

    pub(crate) fn index(&self) -> &ActivityIndex {
        &self.index
    }

    fn report_for(&self, id: ActivityId) -> ActivityReport {
        let node = &self.nodes[id as usize];
        let timing = &node.timing;
        ActivityReport {
            name: self.index.name(id).to_string(),
            duration: node.duration,
            successors: to_owned(self.names_of(&node.successors)),
            predecessors: to_owned(self.names_of(&node.predecessors)),
            earliest_start: timing.earliest_start,
            earliest_finish: timing.earliest_finish,
            latest_start: timing.latest_start,
            latest_finish: timing.latest_finish,
            slack: timing.slack,
            free_slack: timing.free_slack,
            critical: timing.critical,
        }
    }

    fn names_of(&self, ids: &[ActivityId]) -> Vec<&str> {
        ids.iter().map(|&id| self.index.name(id)).collect()
    }

    fn ensure_node(&mut self, name: &str) -> ActivityId {
        let (id, created) = self.index.get_or_insert(name);
        if created {
            self.nodes.push(ActivityNode::default());
        }
        id
    }

    fn add_edge(&mut self, from: ActivityId, to: ActivityId) {
        self.nodes[from as usize].successors.push(to);
        self.nodes[to as usize].predecessors.push(from);
    }

    fn invalidate(&mut self) {
        self.critical_path.clear();
        self.summary = None;
    }
}

fn check_duration(name: &str, duration: f64) -> Result<(), GraphError> {
    if !duration.is_finite() {
        return Err(GraphError::NonFiniteDuration {
            activity: name.to_string(),
        });
    }
    if duration < 0.0 {
        return Err(GraphError::NegativeDuration {
            activity: name.to_string(),
            duration,
        });
    }
    Ok(())
}

fn to_owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_string).collect()
}
