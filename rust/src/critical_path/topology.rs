//! Structural checks and topological ordering of the activity graph.

use std::collections::VecDeque;

use crate::graph::ActivityGraph;
use crate::index::{ActivityId, ActivityIndex};
use crate::models::ActivityNode;

use super::types::{ScheduleError, SentinelRole};

/// Resolve the designated source and sink and check that they are the only
/// boundary activities.
///
/// The source must have no predecessors, the sink no successors, and every
/// other activity must have both.
pub(crate) fn resolve_sentinels(
    graph: &ActivityGraph,
) -> Result<(ActivityId, ActivityId), ScheduleError> {
    let index = graph.index();
    let nodes = graph.arena();

    let source = lookup(index, graph.source_name(), SentinelRole::Source)?;
    let sink = lookup(index, graph.sink_name(), SentinelRole::Sink)?;

    if let Some(&predecessor) = nodes[source as usize].predecessors.first() {
        return Err(ScheduleError::SourceHasPredecessors {
            activity: graph.source_name().to_string(),
            predecessor: index.name(predecessor).to_string(),
        });
    }
    if let Some(&successor) = nodes[sink as usize].successors.first() {
        return Err(ScheduleError::SinkHasSuccessors {
            activity: graph.sink_name().to_string(),
            successor: index.name(successor).to_string(),
        });
    }

    for (id, node) in nodes.iter().enumerate() {
        let id = id as ActivityId;
        if id != source && node.predecessors.is_empty() {
            return Err(ScheduleError::MultipleSources {
                activity: index.name(id).to_string(),
            });
        }
        if id != sink && node.successors.is_empty() {
            return Err(ScheduleError::MultipleSinks {
                activity: index.name(id).to_string(),
            });
        }
    }

    Ok((source, sink))
}

fn lookup(index: &ActivityIndex, name: &str, role: SentinelRole) -> Result<ActivityId, ScheduleError> {
    index.get(name).ok_or_else(|| ScheduleError::MissingSentinel {
        role,
        name: name.to_string(),
    })
}

/// Order activities so that every activity follows all of its predecessors.
///
/// Kahn's algorithm with a FIFO queue. Activities without predecessors seed
/// the queue in insertion order and successors are released in declaration
/// order, so the order is deterministic for a given construction sequence.
pub(crate) fn topological_order(
    nodes: &[ActivityNode],
    index: &ActivityIndex,
) -> Result<Vec<ActivityId>, ScheduleError> {
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.predecessors.len()).collect();

    let mut queue: VecDeque<ActivityId> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, &degree)| degree == 0)
        .map(|(id, _)| id as ActivityId)
        .collect();

    let mut order: Vec<ActivityId> = Vec::with_capacity(nodes.len());

    while let Some(id) = queue.pop_front() {
        order.push(id);

        for &successor in &nodes[id as usize].successors {
            let degree = &mut in_degree[successor as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(successor);
            }
        }
    }

    if order.len() != nodes.len() {
        // Anything still holding in-degree sits on or behind a cycle
        let activities = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree > 0)
            .map(|(id, _)| index.name(id as ActivityId).to_string())
            .collect();
        return Err(ScheduleError::CircularDependency { activities });
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(activities: &[(&str, f64, &[&str])]) -> ActivityGraph {
        let mut graph = ActivityGraph::new();
        for &(name, duration, successors) in activities {
            graph.insert_activity(name, duration, successors).unwrap();
        }
        graph
    }

    fn order_names(graph: &ActivityGraph) -> Vec<String> {
        topological_order(graph.arena(), graph.index())
            .unwrap()
            .into_iter()
            .map(|id| graph.index().name(id).to_string())
            .collect()
    }

    #[test]
    fn test_resolves_default_sentinels() {
        let graph = make_graph(&[("Start", 0.0, &["A"]), ("A", 1.0, &["End"])]);
        let (source, sink) = resolve_sentinels(&graph).unwrap();

        assert_eq!(graph.index().name(source), "Start");
        assert_eq!(graph.index().name(sink), "End");
    }

    #[test]
    fn test_missing_source() {
        let graph = make_graph(&[("A", 1.0, &["End"])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MissingSentinel {
                role: SentinelRole::Source,
                name: "Start".to_string()
            })
        );
    }

    #[test]
    fn test_missing_sink() {
        let graph = make_graph(&[("Start", 0.0, &["A"]), ("A", 1.0, &[])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MissingSentinel {
                role: SentinelRole::Sink,
                name: "End".to_string()
            })
        );
    }

    #[test]
    fn test_empty_graph_reports_missing_source() {
        let graph = ActivityGraph::new();

        assert!(matches!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MissingSentinel {
                role: SentinelRole::Source,
                ..
            })
        ));
    }

    #[test]
    fn test_source_with_predecessor() {
        let graph = make_graph(&[("Start", 0.0, &["End"]), ("A", 1.0, &["Start"])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::SourceHasPredecessors {
                activity: "Start".to_string(),
                predecessor: "A".to_string()
            })
        );
    }

    #[test]
    fn test_sink_with_successor() {
        let graph = make_graph(&[("Start", 0.0, &["End"]), ("End", 0.0, &["A"])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::SinkHasSuccessors {
                activity: "End".to_string(),
                successor: "A".to_string()
            })
        );
    }

    #[test]
    fn test_second_source_rejected() {
        let graph = make_graph(&[("Start", 0.0, &["End"]), ("Orphan", 2.0, &["End"])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MultipleSources {
                activity: "Orphan".to_string()
            })
        );
    }

    #[test]
    fn test_second_sink_rejected() {
        let graph = make_graph(&[("Start", 0.0, &["A", "End"])]);

        assert_eq!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MultipleSinks {
                activity: "A".to_string()
            })
        );
    }

    #[test]
    fn test_custom_sentinels() {
        let mut graph = ActivityGraph::with_sentinels("Kickoff", "Launch").unwrap();
        graph.insert_activity("Kickoff", 0.0, &["Build"]).unwrap();
        graph.insert_activity("Build", 3.0, &["Launch"]).unwrap();

        let (source, sink) = resolve_sentinels(&graph).unwrap();
        assert_eq!(graph.index().name(source), "Kickoff");
        assert_eq!(graph.index().name(sink), "Launch");

        // The default names carry no meaning once custom ones are chosen
        let mut graph = ActivityGraph::with_sentinels("Kickoff", "Launch").unwrap();
        graph.insert_activity("Start", 0.0, &["End"]).unwrap();
        assert!(matches!(
            resolve_sentinels(&graph),
            Err(ScheduleError::MissingSentinel { .. })
        ));
    }

    #[test]
    fn test_cycle_detected() {
        let graph = make_graph(&[
            ("Start", 0.0, &["A"]),
            ("A", 1.0, &["B"]),
            ("B", 1.0, &["A", "End"]),
        ]);
        assert!(resolve_sentinels(&graph).is_ok());

        assert_eq!(
            topological_order(graph.arena(), graph.index()),
            Err(ScheduleError::CircularDependency {
                activities: vec!["A".to_string(), "B".to_string(), "End".to_string()]
            })
        );
    }

    #[test]
    fn test_self_loop_detected() {
        let graph = make_graph(&[("Start", 0.0, &["A"]), ("A", 1.0, &["A", "End"])]);

        assert!(matches!(
            topological_order(graph.arena(), graph.index()),
            Err(ScheduleError::CircularDependency { activities }) if activities.contains(&"A".to_string())
        ));
    }

    #[test]
    fn test_order_waits_for_all_predecessors() {
        // Z is discovered from X before its other predecessor W is settled
        let graph = make_graph(&[
            ("Start", 0.0, &["X", "Y"]),
            ("X", 1.0, &["Z"]),
            ("Y", 1.0, &["W"]),
            ("W", 1.0, &["Z"]),
            ("Z", 1.0, &["End"]),
        ]);

        assert_eq!(order_names(&graph), vec!["Start", "X", "Y", "W", "Z", "End"]);
    }

    #[test]
    fn test_order_follows_declaration_on_balanced_graph() {
        let graph = make_graph(&[
            ("Start", 0.0, &["A"]),
            ("A", 4.0, &["B", "C", "D"]),
            ("B", 2.0, &["E"]),
            ("C", 3.0, &["E"]),
            ("D", 1.0, &["End"]),
            ("E", 5.0, &["End"]),
        ]);

        assert_eq!(
            order_names(&graph),
            vec!["Start", "A", "B", "C", "D", "E", "End"]
        );
    }
}
