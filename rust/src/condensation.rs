//! Collapse strongly connected components into a DAG.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::EdgeMergePolicy;
use crate::graph::{Edge, Graph, NodeId, Weight};
use crate::scc::Component;

/// Component identifier: index into the SCC sequence.
pub type ComponentId = usize;

/// Errors raised when the supplied components do not partition the graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CondenseError {
    #[error("Component {component} lists node {node}, outside 0..{n}")]
    NodeOutOfRange {
        component: ComponentId,
        node: NodeId,
        n: usize,
    },
    #[error("Node {node} assigned to both component {first} and component {second}")]
    DuplicateAssignment {
        node: NodeId,
        first: ComponentId,
        second: ComponentId,
    },
    #[error("Node {0} is not assigned to any component")]
    UnassignedNode(NodeId),
    #[error("Summed weight between components {from} and {to} overflows")]
    WeightOverflow { from: ComponentId, to: ComponentId },
}

/// Condensation of a graph: one node per component plus the projection map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condensation {
    /// Acyclic graph over component ids.
    pub graph: Graph,
    /// `node_to_component[node]` is the component containing `node`.
    pub node_to_component: Vec<ComponentId>,
}

impl Condensation {
    /// Number of components.
    pub fn component_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Component containing `node`, if `node` is in range.
    pub fn component_of(&self, node: NodeId) -> Option<ComponentId> {
        self.node_to_component.get(node).copied()
    }
}

/// Map each node to the index of the component that contains it.
///
/// Fails if the components do not partition `0..n` exactly.
pub fn build_node_to_component(
    n: usize,
    sccs: &[Component],
) -> Result<Vec<ComponentId>, CondenseError> {
    let mut assignment: Vec<Option<ComponentId>> = vec![None; n];

    for (component, members) in sccs.iter().enumerate() {
        for &node in members {
            let slot = assignment
                .get_mut(node)
                .ok_or(CondenseError::NodeOutOfRange { component, node, n })?;
            if let Some(first) = *slot {
                return Err(CondenseError::DuplicateAssignment {
                    node,
                    first,
                    second: component,
                });
            }
            *slot = Some(component);
        }
    }

    assignment
        .into_iter()
        .enumerate()
        .map(|(node, c)| c.ok_or(CondenseError::UnassignedNode(node)))
        .collect()
}

/// Collapse each component to a single node, keeping the first-seen weight
/// for parallel inter-component edges.
pub fn condense(graph: &Graph, sccs: &[Component]) -> Result<Condensation, CondenseError> {
    condense_with_policy(graph, sccs, EdgeMergePolicy::First)
}

/// Collapse each component to a single node.
///
/// Original edges are projected through the component map in edge-list order.
/// Edges inside one component are dropped. Edges that land on an already-seen
/// `(from, to)` pair are merged into it according to `policy`; the position of
/// each condensed edge is that of its first occurrence.
pub fn condense_with_policy(
    graph: &Graph,
    sccs: &[Component],
    policy: EdgeMergePolicy,
) -> Result<Condensation, CondenseError> {
    let node_to_component = build_node_to_component(graph.node_count(), sccs)?;

    let mut edges: Vec<Edge> = Vec::new();
    let mut seen: FxHashMap<(ComponentId, ComponentId), usize> = FxHashMap::default();

    for edge in graph.edges() {
        let from = node_to_component[edge.u];
        let to = node_to_component[edge.v];
        if from == to {
            continue;
        }

        match seen.get(&(from, to)) {
            Some(&pos) => {
                let merged = merge_weight(policy, edges[pos].w, edge.w)
                    .ok_or(CondenseError::WeightOverflow { from, to })?;
                edges[pos].w = merged;
            }
            None => {
                seen.insert((from, to), edges.len());
                edges.push(Edge::new(from, to, edge.w));
            }
        }
    }

    Ok(Condensation {
        graph: Graph::from_valid_edges(sccs.len(), edges),
        node_to_component,
    })
}

fn merge_weight(policy: EdgeMergePolicy, kept: Weight, incoming: Weight) -> Option<Weight> {
    match policy {
        EdgeMergePolicy::First => Some(kept),
        EdgeMergePolicy::Min => Some(kept.min(incoming)),
        EdgeMergePolicy::Max => Some(kept.max(incoming)),
        EdgeMergePolicy::Sum => kept.checked_add(incoming),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::find_sccs;

    fn weighted(n: usize, edges: &[(NodeId, NodeId, Weight)]) -> Graph {
        Graph::new(n, edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect()).unwrap()
    }

    #[test]
    fn test_cycle_collapses_and_self_loops_drop() {
        let g = weighted(4, &[(0, 1, 1), (1, 2, 1), (2, 0, 1), (1, 3, 5)]);
        let sccs = find_sccs(&g); // [[3], [2, 1, 0]]
        let cond = condense(&g, &sccs).unwrap();

        assert_eq!(cond.component_count(), 2);
        assert_eq!(cond.node_to_component, vec![1, 1, 1, 0]);
        assert_eq!(cond.graph.edges(), &[Edge::new(1, 0, 5)]);
        assert_eq!(cond.component_of(3), Some(0));
        assert_eq!(cond.component_of(4), None);
    }

    #[test]
    fn test_duplicate_edges_keep_first_weight() {
        // {0,1} cycle feeding 2 through two different original edges
        let g = weighted(3, &[(0, 1, 1), (1, 0, 1), (0, 2, 7), (1, 2, 3)]);
        let sccs = vec![vec![1, 0], vec![2]];
        let cond = condense(&g, &sccs).unwrap();
        assert_eq!(cond.graph.edges(), &[Edge::new(0, 1, 7)]);
    }

    #[test]
    fn test_merge_policies() {
        let g = weighted(3, &[(0, 1, 1), (1, 0, 1), (0, 2, 7), (1, 2, 3), (0, 2, 5)]);
        let sccs = vec![vec![1, 0], vec![2]];

        let weight = |policy| condense_with_policy(&g, &sccs, policy).unwrap().graph.edges()[0].w;
        assert_eq!(weight(EdgeMergePolicy::First), 7);
        assert_eq!(weight(EdgeMergePolicy::Min), 3);
        assert_eq!(weight(EdgeMergePolicy::Max), 7);
        assert_eq!(weight(EdgeMergePolicy::Sum), 15);
    }

    #[test]
    fn test_sum_overflow_reported() {
        let g = weighted(2, &[(0, 1, Weight::MAX), (0, 1, 1)]);
        let sccs = vec![vec![0], vec![1]];
        let result = condense_with_policy(&g, &sccs, EdgeMergePolicy::Sum);
        assert_eq!(result, Err(CondenseError::WeightOverflow { from: 0, to: 1 }));
    }

    #[test]
    fn test_isolated_nodes_condense_to_edgeless_graph() {
        let g = weighted(3, &[]);
        let cond = condense(&g, &find_sccs(&g)).unwrap();
        assert_eq!(cond.component_count(), 3);
        assert_eq!(cond.graph.edge_count(), 0);
    }

    #[test]
    fn test_partition_violations() {
        assert_eq!(
            build_node_to_component(2, &[vec![0]]),
            Err(CondenseError::UnassignedNode(1))
        );
        assert_eq!(
            build_node_to_component(2, &[vec![0, 1], vec![1]]),
            Err(CondenseError::DuplicateAssignment {
                node: 1,
                first: 0,
                second: 1
            })
        );
        assert_eq!(
            build_node_to_component(1, &[vec![0, 4]]),
            Err(CondenseError::NodeOutOfRange {
                component: 0,
                node: 4,
                n: 1
            })
        );
    }
}
