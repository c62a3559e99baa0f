//! Seeded synthetic task graphs for benchmarks and demos.
//!
//! Every generator produces simple graphs: no self-loops and at most one edge
//! per ordered `(u, v)` pair. Regular edges weigh 1..=5, edges of planted
//! cycles 1..=3. The same seed always yields the same graph.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;

use crate::graph::{Edge, Graph, NodeId, Weight};

const EDGE_WEIGHT_MAX: Weight = 5;
const CYCLE_WEIGHT_MAX: Weight = 3;

/// One named dataset of the standard suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatasetSpec {
    pub name: &'static str,
    pub nodes: usize,
    pub target_edges: usize,
    pub dense: bool,
    pub include_cycles: bool,
}

const fn dataset(
    name: &'static str,
    nodes: usize,
    target_edges: usize,
    dense: bool,
    include_cycles: bool,
) -> DatasetSpec {
    DatasetSpec {
        name,
        nodes,
        target_edges,
        dense,
        include_cycles,
    }
}

/// Small, medium and large graphs: sparse ones with planted cycles and dense
/// ones without planted cycles.
pub const DATASET_SUITE: [DatasetSpec; 9] = [
    dataset("small1", 6, 8, false, true),
    dataset("small2", 8, 20, true, false),
    dataset("small3", 10, 15, false, true),
    dataset("medium1", 12, 18, false, true),
    dataset("medium2", 15, 45, true, false),
    dataset("medium3", 18, 30, false, true),
    dataset("large1", 20, 35, false, true),
    dataset("large2", 30, 120, true, false),
    dataset("large3", 40, 70, false, true),
];

/// Edge list that rejects self-loops and repeated `(u, v)` pairs.
struct EdgeSet {
    n: usize,
    edges: Vec<Edge>,
    seen: FxHashSet<(NodeId, NodeId)>,
}

impl EdgeSet {
    fn new(n: usize) -> Self {
        Self {
            n,
            edges: Vec::new(),
            seen: FxHashSet::default(),
        }
    }

    fn add(&mut self, u: NodeId, v: NodeId, w: Weight) {
        if u != v && self.seen.insert((u, v)) {
            self.edges.push(Edge::new(u, v, w));
        }
    }

    fn len(&self) -> usize {
        self.edges.len()
    }

    fn into_graph(self) -> Graph {
        Graph::from_valid_edges(self.n, self.edges)
    }
}

/// Maximum number of edges in a simple directed graph on `n` nodes.
fn max_edges(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1))
}

/// Seeded random graph generator.
pub struct GraphGenerator {
    rng: StdRng,
}

impl GraphGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn weight(&mut self) -> Weight {
        self.rng.random_range(1..=EDGE_WEIGHT_MAX)
    }

    fn random_pair(&mut self, n: usize) -> (NodeId, NodeId) {
        (self.rng.random_range(0..n), self.rng.random_range(0..n))
    }

    /// Plant a directed cycle through 3 or 4 distinct random nodes.
    fn plant_cycle(&mut self, edges: &mut EdgeSet) {
        let n = edges.n;
        if n < 3 {
            return;
        }
        let size = (3 + self.rng.random_range(0..2)).min(n);
        let members = rand::seq::index::sample(&mut self.rng, n, size).into_vec();

        for i in 0..size {
            let w = self.rng.random_range(1..=CYCLE_WEIGHT_MAX);
            edges.add(members[i], members[(i + 1) % size], w);
        }
    }

    fn plant_cycles(&mut self, edges: &mut EdgeSet) {
        let cycles = 1 + self.rng.random_range(0..2);
        for _ in 0..cycles {
            self.plant_cycle(edges);
        }
    }

    /// Sparse graph: a forward spine, optional planted cycles, then random
    /// fill up to `target_edges` (capped at `n * (n - 1)`).
    pub fn generate_sparse(
        &mut self,
        nodes: usize,
        target_edges: usize,
        include_cycles: bool,
    ) -> Graph {
        let mut edges = EdgeSet::new(nodes);

        // Every node except the last gets one edge to some later node
        for i in 0..nodes.saturating_sub(1) {
            let j = i + 1 + self.rng.random_range(0..nodes - i - 1);
            let w = self.weight();
            edges.add(i, j, w);
        }

        if include_cycles {
            self.plant_cycles(&mut edges);
        }

        let max = max_edges(nodes);
        let target = target_edges.min(max);
        let mut attempts = 0;
        while edges.len() < target && attempts < max.saturating_mul(3) {
            let (u, v) = self.random_pair(nodes);
            if u != v && self.rng.random_bool(0.8) {
                let w = self.weight();
                edges.add(u, v, w);
            }
            attempts += 1;
        }

        // Systematic sweep if random fill fell short
        'sweep: for u in 0..nodes {
            for v in 0..nodes {
                if edges.len() >= target {
                    break 'sweep;
                }
                let w = self.weight();
                edges.add(u, v, w);
            }
        }

        edges.into_graph()
    }

    /// Dense graph: every ordered pair is tried with probability 0.6, then
    /// random fill continues until `target_edges` or 80% of all possible edges.
    pub fn generate_dense(
        &mut self,
        nodes: usize,
        target_edges: usize,
        include_cycles: bool,
    ) -> Graph {
        let mut edges = EdgeSet::new(nodes);
        let max = max_edges(nodes);
        let target = target_edges.min(max);

        'pairs: for u in 0..nodes {
            for v in 0..nodes {
                if edges.len() >= target {
                    break 'pairs;
                }
                if u != v && self.rng.random_bool(0.6) {
                    let w = self.weight();
                    edges.add(u, v, w);
                }
            }
        }

        // floor(max * 4 / 5) without overflowing
        let cap = max / 5 * 4 + max % 5 * 4 / 5;
        while edges.len() < target && edges.len() < cap {
            let (u, v) = self.random_pair(nodes);
            let w = self.weight();
            edges.add(u, v, w);
        }

        if include_cycles {
            self.plant_cycles(&mut edges);
        }

        edges.into_graph()
    }

    /// Acyclic graph: `edges` attempts, each from an earlier to a later node
    /// of a shuffled order. Repeated pairs are skipped, so the result may
    /// hold fewer edges.
    pub fn generate_dag(&mut self, nodes: usize, edges: usize) -> Graph {
        let mut set = EdgeSet::new(nodes);
        if nodes < 2 {
            return set.into_graph();
        }

        let mut order: Vec<NodeId> = (0..nodes).collect();
        order.shuffle(&mut self.rng);

        for _ in 0..edges {
            let from = self.rng.random_range(0..nodes - 1);
            let to = from + 1 + self.rng.random_range(0..nodes - from - 1);
            let w = self.weight();
            set.add(order[from], order[to], w);
        }

        set.into_graph()
    }

    /// Graph with `cycles` planted cycles plus random edges up to `edges`
    /// (capped at `n * (n - 1)`).
    pub fn generate_cyclic(&mut self, nodes: usize, edges: usize, cycles: usize) -> Graph {
        let mut set = EdgeSet::new(nodes);
        for _ in 0..cycles {
            self.plant_cycle(&mut set);
        }

        let target = edges.min(max_edges(nodes));
        while set.len() < target {
            let (u, v) = self.random_pair(nodes);
            let w = self.weight();
            set.add(u, v, w);
        }

        set.into_graph()
    }

    /// Generate one dataset of the suite.
    pub fn generate(&mut self, spec: &DatasetSpec) -> Graph {
        if spec.dense {
            self.generate_dense(spec.nodes, spec.target_edges, spec.include_cycles)
        } else {
            self.generate_sparse(spec.nodes, spec.target_edges, spec.include_cycles)
        }
    }
}

/// Generate every dataset of [`DATASET_SUITE`] from one seed.
pub fn generate_suite(seed: u64) -> Vec<(&'static str, Graph)> {
    let mut generator = GraphGenerator::new(seed);
    DATASET_SUITE
        .iter()
        .map(|spec| (spec.name, generator.generate(spec)))
        .collect()
}
