//! Strongly connected components via Tarjan's algorithm.
//!
//! The depth-first traversal runs on an explicit frame stack, so a chain of
//! any length only costs heap memory, never native call-stack depth.

use crate::graph::{Graph, NodeId};
use crate::metrics::Metrics;

/// One strongly connected component: the original node ids it contains,
/// in the order they were popped off the Tarjan stack.
pub type Component = Vec<NodeId>;

/// Suspended visit of `node`; `next_edge` is the position in its adjacency list.
struct Frame {
    node: NodeId,
    next_edge: usize,
}

struct TarjanState {
    next_index: usize,
    /// Discovery index per node, `None` until visited.
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<NodeId>,
    components: Vec<Component>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            next_index: 0,
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn discover(&mut self, node: NodeId, metrics: &mut Metrics) {
        metrics.dfs_visits += 1;
        self.index[node] = Some(self.next_index);
        self.lowlink[node] = self.next_index;
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    fn strong_connect(&mut self, graph: &Graph, root: NodeId, metrics: &mut Metrics) {
        let mut frames = vec![Frame {
            node: root,
            next_edge: 0,
        }];
        self.discover(root, metrics);

        while let Some(frame) = frames.last_mut() {
            let v = frame.node;

            if let Some(edge) = graph.neighbors(v).get(frame.next_edge) {
                frame.next_edge += 1;
                metrics.dfs_edges += 1;
                let w = edge.v;

                match self.index[w] {
                    None => {
                        self.discover(w, metrics);
                        frames.push(Frame {
                            node: w,
                            next_edge: 0,
                        });
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.lowlink[v] = self.lowlink[v].min(w_index);
                    }
                    // Already assigned to a closed component
                    Some(_) => {}
                }
                continue;
            }

            // Every outgoing edge of v has been handled
            frames.pop();
            if Some(self.lowlink[v]) == self.index[v] {
                self.close_component(v);
            }
            if let Some(parent) = frames.last() {
                let p = parent.node;
                self.lowlink[p] = self.lowlink[p].min(self.lowlink[v]);
            }
        }
    }

    /// Pop the stack down to and including `root`, forming one component.
    fn close_component(&mut self, root: NodeId) {
        let mut component = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack[w] = false;
            component.push(w);
            if w == root {
                break;
            }
        }
        self.components.push(component);
    }
}

/// Decompose `graph` into strongly connected components.
///
/// Components are returned in Tarjan completion order, which is a reverse
/// topological order of the condensation. Every node appears in exactly one
/// component.
pub fn find_sccs(graph: &Graph) -> Vec<Component> {
    find_sccs_with_metrics(graph, &mut Metrics::default())
}

/// Same as [`find_sccs`], counting discoveries and examined edges.
pub fn find_sccs_with_metrics(graph: &Graph, metrics: &mut Metrics) -> Vec<Component> {
    let n = graph.node_count();
    let mut state = TarjanState::new(n);

    for node in 0..n {
        if state.index[node].is_none() {
            state.strong_connect(graph, node, metrics);
        }
    }

    state.components
}

/// Size of each component, in component order.
pub fn scc_sizes(sccs: &[Component]) -> Vec<usize> {
    sccs.iter().map(Vec::len).collect()
}

/// Indices of components that contain a cycle: more than one member, or a
/// single member with a self-loop.
pub fn cyclic_components(sccs: &[Component], graph: &Graph) -> Vec<usize> {
    sccs.iter()
        .enumerate()
        .filter(|(_, component)| match component.as_slice() {
            [single] => graph.neighbors(*single).iter().any(|e| e.v == *single),
            members => members.len() > 1,
        })
        .map(|(i, _)| i)
        .collect()
}
