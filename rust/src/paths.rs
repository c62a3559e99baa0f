//! Shortest, longest and critical paths over a DAG in topological order.
//!
//! Each pass visits nodes once in the given order and relaxes the outgoing
//! edges of nodes already reached from the source. Unreached nodes are `None`
//! and are never relaxed from. Weights may be negative; the graph must not
//! contain cycles.

use thiserror::Error;

use crate::graph::{Graph, NodeId, Weight};
use crate::metrics::Metrics;
use crate::models::CriticalPath;
use crate::topological::order_positions;

/// Accumulated weight from the source per node; `None` when unreachable.
pub type Distances = Vec<Option<Weight>>;

/// Errors raised when path-analysis inputs break their contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Source node {node} outside 0..{n}")]
    SourceOutOfRange { node: NodeId, n: usize },
    #[error("Topological order has {actual} nodes, graph has {expected}")]
    OrderLengthMismatch { expected: usize, actual: usize },
    #[error("Topological order is not a permutation of the graph nodes (bad entry {node})")]
    OrderNotPermutation { node: NodeId },
    #[error("Topological order places {v} before its predecessor {u}")]
    OrderViolatesEdge { u: NodeId, v: NodeId },
    #[error("Distance to node {node} overflows")]
    DistanceOverflow { node: NodeId },
}

/// Which distance a relaxation pass is optimising.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Objective {
    Shortest,
    Longest,
}

impl Objective {
    #[inline]
    fn improves(self, candidate: Weight, current: Weight) -> bool {
        match self {
            Self::Shortest => candidate < current,
            Self::Longest => candidate > current,
        }
    }
}

/// Distances plus the predecessor that last improved each node.
struct Relaxation {
    dist: Distances,
    prev: Vec<Option<NodeId>>,
}

/// Check that `order` is a topological order of `graph` and `source` is a node.
pub fn validate_order(graph: &Graph, order: &[NodeId], source: NodeId) -> Result<(), PathError> {
    let n = graph.node_count();
    if source >= n {
        return Err(PathError::SourceOutOfRange { node: source, n });
    }
    if order.len() != n {
        return Err(PathError::OrderLengthMismatch {
            expected: n,
            actual: order.len(),
        });
    }

    let mut seen = vec![false; n];
    for &node in order {
        match seen.get_mut(node) {
            Some(flag) if !*flag => *flag = true,
            _ => return Err(PathError::OrderNotPermutation { node }),
        }
    }

    let positions = order_positions(order, n);
    if let Some(edge) = graph
        .edges()
        .iter()
        .find(|e| positions[e.u] >= positions[e.v])
    {
        return Err(PathError::OrderViolatesEdge {
            u: edge.u,
            v: edge.v,
        });
    }

    Ok(())
}

fn relax_in_order(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
    objective: Objective,
    metrics: &mut Metrics,
) -> Result<Relaxation, PathError> {
    validate_order(graph, order, source)?;

    let n = graph.node_count();
    let mut dist: Distances = vec![None; n];
    let mut prev: Vec<Option<NodeId>> = vec![None; n];
    dist[source] = Some(0);

    for &node in order {
        let Some(base) = dist[node] else {
            continue;
        };

        for edge in graph.neighbors(node) {
            metrics.relaxations += 1;
            let candidate = base
                .checked_add(edge.w)
                .ok_or(PathError::DistanceOverflow { node: edge.v })?;

            let better = match dist[edge.v] {
                None => true,
                Some(current) => objective.improves(candidate, current),
            };
            if better {
                dist[edge.v] = Some(candidate);
                prev[edge.v] = Some(node);
            }
        }
    }

    Ok(Relaxation { dist, prev })
}

/// Minimum accumulated weight from `source` to every node.
pub fn shortest_paths(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
) -> Result<Distances, PathError> {
    shortest_paths_with_metrics(graph, order, source, &mut Metrics::default())
}

pub fn shortest_paths_with_metrics(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
    metrics: &mut Metrics,
) -> Result<Distances, PathError> {
    relax_in_order(graph, order, source, Objective::Shortest, metrics).map(|r| r.dist)
}

/// Maximum accumulated weight from `source` to every node.
pub fn longest_paths(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
) -> Result<Distances, PathError> {
    longest_paths_with_metrics(graph, order, source, &mut Metrics::default())
}

pub fn longest_paths_with_metrics(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
    metrics: &mut Metrics,
) -> Result<Distances, PathError> {
    relax_in_order(graph, order, source, Objective::Longest, metrics).map(|r| r.dist)
}

/// Longest path from `source` to the node with the greatest longest-distance.
///
/// Ties go to the lowest node id. When nothing is reachable beyond the source
/// (or every reachable node has a negative distance) the path is just the
/// source with length 0.
pub fn critical_path(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
) -> Result<CriticalPath, PathError> {
    critical_path_with_metrics(graph, order, source, &mut Metrics::default())
}

pub fn critical_path_with_metrics(
    graph: &Graph,
    order: &[NodeId],
    source: NodeId,
    metrics: &mut Metrics,
) -> Result<CriticalPath, PathError> {
    let Relaxation { dist, prev } =
        relax_in_order(graph, order, source, Objective::Longest, metrics)?;

    // Strictly greater replaces, so the lowest id wins ties
    let mut end = source;
    let mut length: Weight = 0;
    let mut best: Option<Weight> = None;
    for (node, d) in dist.iter().enumerate() {
        if let Some(d) = *d {
            if best.map_or(true, |b| d > b) {
                best = Some(d);
                end = node;
                length = d;
            }
        }
    }

    Ok(CriticalPath {
        path: reconstruct_path(&prev, end),
        length,
    })
}

/// Follow predecessor links from `end` back to the source, then reverse.
fn reconstruct_path(prev: &[Option<NodeId>], end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut at = end;
    while let Some(p) = prev[at] {
        path.push(p);
        at = p;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;

    fn weighted(n: usize, edges: &[(NodeId, NodeId, Weight)]) -> Graph {
        Graph::new(n, edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect()).unwrap()
    }

    fn sample() -> Graph {
        weighted(4, &[(0, 1, 1), (0, 2, 4), (1, 2, 2), (1, 3, 6), (2, 3, 3)])
    }

    #[test]
    fn test_shortest_paths() {
        let dist = shortest_paths(&sample(), &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(1), Some(3), Some(6)]);
    }

    #[test]
    fn test_longest_paths() {
        // 0->2 (4) beats 0->1->2 (3); 0->1->3 and 0->2->3 both reach 7
        let dist = longest_paths(&sample(), &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(dist, vec![Some(0), Some(1), Some(4), Some(7)]);
    }

    #[test]
    fn test_critical_path() {
        let cp = critical_path(&sample(), &[0, 1, 2, 3], 0).unwrap();
        assert_eq!(cp.length, 7);
        // 3 first reached at 7 via 1; 2->3 only ties, so the predecessor stays 1
        assert_eq!(cp.path, vec![0, 1, 3]);
    }

    #[test]
    fn test_unreachable_nodes_stay_none() {
        // Node 2 is unreachable but its edge to 3 must not be relaxed
        let g = weighted(4, &[(0, 1, 2), (2, 3, 100)]);
        let order = [2, 0, 1, 3];
        let shortest = shortest_paths(&g, &order, 0).unwrap();
        let longest = longest_paths(&g, &order, 0).unwrap();
        assert_eq!(shortest, vec![Some(0), Some(2), None, None]);
        assert_eq!(longest, vec![Some(0), Some(2), None, None]);
    }

    #[test]
    fn test_isolated_source() {
        let g = weighted(3, &[(1, 2, 5)]);
        let cp = critical_path(&g, &[0, 1, 2], 0).unwrap();
        assert_eq!(cp.path, vec![0]);
        assert_eq!(cp.length, 0);
        assert_eq!(
            shortest_paths(&g, &[0, 1, 2], 0).unwrap(),
            vec![Some(0), None, None]
        );
    }

    #[test]
    fn test_negative_weights() {
        let g = weighted(3, &[(0, 1, -4), (0, 2, 1), (1, 2, -1)]);
        let order = [0, 1, 2];
        assert_eq!(
            shortest_paths(&g, &order, 0).unwrap(),
            vec![Some(0), Some(-4), Some(-5)]
        );
        assert_eq!(
            longest_paths(&g, &order, 0).unwrap(),
            vec![Some(0), Some(-4), Some(1)]
        );
        let cp = critical_path(&g, &order, 0).unwrap();
        assert_eq!(cp.path, vec![0, 2]);
        assert_eq!(cp.length, 1);
    }

    #[test]
    fn test_all_negative_keeps_source() {
        let g = weighted(2, &[(0, 1, -3)]);
        let cp = critical_path(&g, &[0, 1], 0).unwrap();
        assert_eq!(cp.path, vec![0]);
        assert_eq!(cp.length, 0);
    }

    #[test]
    fn test_critical_tie_prefers_lowest_id() {
        let g = weighted(3, &[(0, 2, 5), (0, 1, 5)]);
        let cp = critical_path(&g, &[0, 1, 2], 0).unwrap();
        assert_eq!(cp.path, vec![0, 1]);
    }

    #[test]
    fn test_source_not_first_in_order() {
        let g = weighted(3, &[(0, 1, 1), (1, 2, 1)]);
        let dist = shortest_paths(&g, &[0, 1, 2], 1).unwrap();
        assert_eq!(dist, vec![None, Some(0), Some(1)]);
    }

    #[test]
    fn test_invalid_inputs() {
        let g = sample();
        assert_eq!(
            shortest_paths(&g, &[0, 1, 2, 3], 9),
            Err(PathError::SourceOutOfRange { node: 9, n: 4 })
        );
        assert_eq!(
            shortest_paths(&g, &[0, 1, 2], 0),
            Err(PathError::OrderLengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            longest_paths(&g, &[0, 1, 1, 3], 0),
            Err(PathError::OrderNotPermutation { node: 1 })
        );
        assert_eq!(
            critical_path(&g, &[0, 2, 1, 3], 0),
            Err(PathError::OrderViolatesEdge { u: 1, v: 2 })
        );
    }

    #[test]
    fn test_overflow_reported() {
        let g = weighted(3, &[(0, 1, Weight::MAX), (1, 2, 1)]);
        assert_eq!(
            longest_paths(&g, &[0, 1, 2], 0),
            Err(PathError::DistanceOverflow { node: 2 })
        );
    }

    #[test]
    fn test_relaxation_count() {
        let g = weighted(4, &[(0, 1, 1), (2, 3, 1)]);
        let mut metrics = Metrics::default();
        shortest_paths_with_metrics(&g, &[0, 2, 1, 3], 0, &mut metrics).unwrap();
        // Only the edge out of the reached node 0 is relaxed
        assert_eq!(metrics.relaxations, 1);
    }

    #[test]
    fn test_repeat_runs_identical() {
        let g = sample();
        let order = [0, 1, 2, 3];
        assert_eq!(
            critical_path(&g, &order, 0).unwrap(),
            critical_path(&g, &order, 0).unwrap()
        );
    }
}
