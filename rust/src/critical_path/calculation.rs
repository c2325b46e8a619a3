//! Critical path calculation using forward and backward passes.

use crate::config::ScheduleConfig;
use crate::graph::ActivityGraph;
use crate::index::ActivityId;
use crate::models::{ActivityNode, ScheduleSummary};
use crate::{log_changes, log_checks, log_debug};

use super::topology::{resolve_sentinels, topological_order};
use super::types::{ActivityTiming, ScheduleError};

/// Compute timings for every activity in `graph` and extract the critical path.
///
/// Returns one [`ActivityTiming`] per activity, indexed by [`ActivityId`], and
/// the summary of the run. The graph itself is not modified; see
/// [`ActivityGraph::compute_schedule`] for the variant that stores results.
///
/// # Errors
/// * `InvalidConfig` if the slack tolerance is negative or not finite
/// * `MissingSentinel`, `SourceHasPredecessors`, `SinkHasSuccessors`,
///   `MultipleSources`, `MultipleSinks` if the graph is not anchored by its
///   designated source and sink
/// * `CircularDependency` if the graph has a cycle
pub fn calculate_schedule(
    graph: &ActivityGraph,
    config: &ScheduleConfig,
) -> Result<(Vec<ActivityTiming>, ScheduleSummary), ScheduleError> {
    if !config.slack_tolerance.is_finite() || config.slack_tolerance < 0.0 {
        return Err(ScheduleError::InvalidConfig(format!(
            "slack_tolerance must be finite and non-negative, got {}",
            config.slack_tolerance
        )));
    }

    let (source, sink) = resolve_sentinels(graph)?;
    let nodes = graph.arena();
    let index = graph.index();

    let order = topological_order(nodes, index)?;
    log_debug!(
        config.verbosity,
        "[cpm] Topological order: {:?}",
        order.iter().map(|&id| index.name(id)).collect::<Vec<_>>()
    );

    let mut timings = vec![ActivityTiming::default(); nodes.len()];

    forward_pass(nodes, &order, source, &mut timings);
    let project_duration = timings[sink as usize].earliest_finish;
    log_changes!(
        config.verbosity,
        "[cpm] Forward pass complete: project duration {}",
        project_duration
    );

    backward_pass(nodes, &order, sink, &mut timings);
    assign_slack(nodes, project_duration, config.slack_tolerance, &mut timings);

    for &id in &order {
        let timing = &timings[id as usize];
        log_checks!(
            config.verbosity,
            "[cpm]   {}: ES={} EF={} LS={} LF={} slack={}{}",
            index.name(id),
            timing.earliest_start,
            timing.earliest_finish,
            timing.latest_start,
            timing.latest_finish,
            timing.slack,
            if timing.critical { " (critical)" } else { "" }
        );
    }

    // Every zero-slack activity, in topological order
    let critical_path: Vec<String> = order
        .iter()
        .filter(|&&id| timings[id as usize].critical)
        .map(|&id| index.name(id).to_string())
        .collect();
    log_changes!(config.verbosity, "[cpm] Critical path: {:?}", critical_path);

    let total_work = nodes.iter().map(|n| n.duration).sum();

    let summary = ScheduleSummary {
        project_duration,
        critical_path,
        total_work,
        activity_count: nodes.len(),
    };
    Ok((timings, summary))
}

/// Earliest start = max of all predecessor finish times; the source starts at 0.
fn forward_pass(
    nodes: &[ActivityNode],
    order: &[ActivityId],
    source: ActivityId,
    timings: &mut [ActivityTiming],
) {
    for &id in order {
        let node = &nodes[id as usize];
        let earliest_start = if id == source {
            0.0
        } else {
            node.predecessors
                .iter()
                .map(|&p| timings[p as usize].earliest_finish)
                .fold(0.0, f64::max)
        };

        let timing = &mut timings[id as usize];
        timing.earliest_start = earliest_start;
        timing.earliest_finish = earliest_start + node.duration;
    }
}

/// Latest finish = min of all successor latest starts; the sink is anchored
/// to its own earliest finish.
fn backward_pass(
    nodes: &[ActivityNode],
    order: &[ActivityId],
    sink: ActivityId,
    timings: &mut [ActivityTiming],
) {
    let project_duration = timings[sink as usize].earliest_finish;

    for &id in order.iter().rev() {
        let node = &nodes[id as usize];
        let latest_finish = if id == sink {
            project_duration
        } else {
            let earliest_required = node
                .successors
                .iter()
                .map(|&s| timings[s as usize].latest_start)
                .fold(f64::INFINITY, f64::min);
            if earliest_required.is_finite() {
                earliest_required
            } else {
                project_duration
            }
        };

        let timing = &mut timings[id as usize];
        timing.latest_finish = latest_finish;
        timing.latest_start = latest_finish - node.duration;
    }
}

fn assign_slack(
    nodes: &[ActivityNode],
    project_duration: f64,
    tolerance: f64,
    timings: &mut [ActivityTiming],
) {
    for (id, node) in nodes.iter().enumerate() {
        let next_start = node
            .successors
            .iter()
            .map(|&s| timings[s as usize].earliest_start)
            .fold(f64::INFINITY, f64::min);
        let next_start = if next_start.is_finite() {
            next_start
        } else {
            project_duration
        };

        let timing = &mut timings[id];
        timing.slack = timing.latest_start - timing.earliest_start;
        timing.free_slack = next_start - timing.earliest_finish;
        timing.critical = timing.has_zero_slack(tolerance);
    }
}
