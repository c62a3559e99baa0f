//! Topological ordering of the condensation using Kahn's algorithm.

use std::collections::VecDeque;
use thiserror::Error;

use crate::condensation::ComponentId;
use crate::graph::{Graph, NodeId};
use crate::metrics::Metrics;
use crate::scc::Component;

/// Error types for topological ordering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologicalError {
    /// The graph contains a cycle; only `ordered` of `total` nodes could be placed.
    #[error("Cycle detected: ordered {ordered} of {total} nodes")]
    CycleDetected { ordered: usize, total: usize },
    /// A component order lists an id outside `0..total` or lists it twice.
    #[error("Invalid component order: component {component} is out of range or repeated")]
    InvalidComponentOrder { component: ComponentId },
    /// A component order does not cover every component.
    #[error("Component order has {actual} entries, expected {expected}")]
    ComponentOrderLength { expected: usize, actual: usize },
}

/// Perform topological sort of an acyclic graph using Kahn's algorithm.
///
/// Zero in-degree nodes seed the frontier in increasing id order, and the
/// frontier is processed first-in first-out, so the result is deterministic.
/// A graph with no nodes yields an empty order.
pub fn topological_order(graph: &Graph) -> Result<Vec<NodeId>, TopologicalError> {
    topological_order_with_metrics(graph, &mut Metrics::default())
}

/// Same as [`topological_order`], counting frontier pushes and pops.
pub fn topological_order_with_metrics(
    graph: &Graph,
    metrics: &mut Metrics,
) -> Result<Vec<NodeId>, TopologicalError> {
    let n = graph.node_count();

    // Calculate in-degrees
    let mut in_degree = vec![0usize; n];
    for edge in graph.edges() {
        in_degree[edge.v] += 1;
    }

    let mut queue: VecDeque<NodeId> = VecDeque::with_capacity(n);
    for (node, _) in in_degree.iter().enumerate().filter(|(_, &d)| d == 0) {
        queue.push_back(node);
        metrics.kahn_pushes += 1;
    }

    let mut result: Vec<NodeId> = Vec::with_capacity(n);

    while let Some(node) = queue.pop_front() {
        metrics.kahn_pops += 1;
        result.push(node);

        for edge in graph.neighbors(node) {
            let degree = &mut in_degree[edge.v];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(edge.v);
                metrics.kahn_pushes += 1;
            }
        }
    }

    if result.len() != n {
        return Err(TopologicalError::CycleDetected {
            ordered: result.len(),
            total: n,
        });
    }

    Ok(result)
}

/// Expand a component order into an order over original nodes.
///
/// Members of each component are emitted as a contiguous block, in the order
/// the SCC finder produced them. `component_order` must list every component
/// of `sccs` exactly once.
pub fn expand_task_order(
    component_order: &[ComponentId],
    sccs: &[Component],
) -> Result<Vec<NodeId>, TopologicalError> {
    if component_order.len() != sccs.len() {
        return Err(TopologicalError::ComponentOrderLength {
            expected: sccs.len(),
            actual: component_order.len(),
        });
    }

    let mut placed = vec![false; sccs.len()];
    let mut order = Vec::with_capacity(sccs.iter().map(Vec::len).sum());
    for &component in component_order {
        match placed.get_mut(component) {
            Some(flag) if !*flag => *flag = true,
            _ => return Err(TopologicalError::InvalidComponentOrder { component }),
        }
        order.extend_from_slice(&sccs[component]);
    }
    Ok(order)
}

/// Position of every node in `order`; `None` for nodes the order omits.
pub fn order_positions(order: &[NodeId], n: usize) -> Vec<Option<usize>> {
    let mut positions = vec![None; n];
    for (pos, &node) in order.iter().enumerate() {
        if let Some(slot) = positions.get_mut(node) {
            *slot = Some(pos);
        }
    }
    positions
}
