//! End-to-end analysis: SCCs, condensation, ordering and DAG paths.

use std::fmt;
use std::time::Instant;
use thiserror::Error;

use crate::condensation::{condense_with_policy, CondenseError};
use crate::config::{AnalysisConfig, ConfigError};
use crate::graph::{Graph, GraphError, Weight};
use crate::io::IoError;
use crate::metrics::{Metrics, StageMetrics};
use crate::models::{AnalysisReport, CriticalPath};
use crate::paths::{
    critical_path_with_metrics, longest_paths_with_metrics, shortest_paths_with_metrics, PathError,
};
use crate::scc::{cyclic_components, find_sccs_with_metrics, scc_sizes};
use crate::topological::{expand_task_order, topological_order_with_metrics, TopologicalError};
use crate::{log_debug, log_details, log_stages};

/// Any failure of the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Condense(#[from] CondenseError),
    /// A cycle survived condensation or the component order was malformed.
    /// Either indicates a bug in SCC detection.
    #[error("Ordering the condensation failed: {0}")]
    Topological(#[from] TopologicalError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("Source node {node} outside 0..{n}")]
    SourceOutOfRange { node: usize, n: usize },
}

/// Run every stage on `graph` and collect the results.
///
/// The configured source is an original node id; path analysis starts from
/// the component containing it. A graph with no nodes produces an empty
/// report.
pub fn analyze(graph: &Graph, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let verbosity = config.verbosity;
    let policy = config.edge_merge_policy()?;
    let n = graph.node_count();

    if n > 0 && config.source >= n {
        return Err(AnalysisError::SourceOutOfRange {
            node: config.source,
            n,
        });
    }

    log_stages!(
        verbosity,
        "Analyzing graph: {} nodes, {} edges",
        n,
        graph.edge_count()
    );

    // Stage 1: strongly connected components
    let mut metrics = Metrics::new();
    let started = Instant::now();
    let sccs = find_sccs_with_metrics(graph, &mut metrics);
    let scc_metrics = StageMetrics::new(metrics, started.elapsed());
    let sizes = scc_sizes(&sccs);
    let cyclic = cyclic_components(&sccs, graph);

    log_stages!(
        verbosity,
        "SCC: {} components ({} cyclic) in {} ns",
        sccs.len(),
        cyclic.len(),
        scc_metrics.elapsed_ns
    );
    log_details!(verbosity, "  SCCs: {:?}", sccs);
    log_details!(verbosity, "  sizes: {:?}", sizes);

    // Stage 2: condensation
    let condensation = condense_with_policy(graph, &sccs, policy)?;
    let cond_graph = &condensation.graph;

    log_stages!(
        verbosity,
        "Condensation: {} components, {} edges (merge={})",
        cond_graph.node_count(),
        cond_graph.edge_count(),
        policy
    );
    for edge in cond_graph.edges() {
        log_debug!(verbosity, "  C{} -> C{} (w={})", edge.u, edge.v, edge.w);
    }

    // Stage 3: topological order
    let mut metrics = Metrics::new();
    let started = Instant::now();
    let component_order = topological_order_with_metrics(cond_graph, &mut metrics)?;
    let task_order = expand_task_order(&component_order, &sccs)?;
    let topo_metrics = StageMetrics::new(metrics, started.elapsed());

    log_stages!(
        verbosity,
        "Topological order: {} components in {} ns",
        component_order.len(),
        topo_metrics.elapsed_ns
    );
    log_details!(verbosity, "  component order: {:?}", component_order);
    log_details!(verbosity, "  task order: {:?}", task_order);

    // Stage 4: DAG paths from the source component
    let source_component = condensation.component_of(config.source);
    let mut metrics = Metrics::new();
    let started = Instant::now();
    let (shortest, longest, critical_path) = match source_component {
        Some(source) => (
            shortest_paths_with_metrics(cond_graph, &component_order, source, &mut metrics)?,
            longest_paths_with_metrics(cond_graph, &component_order, source, &mut metrics)?,
            critical_path_with_metrics(cond_graph, &component_order, source, &mut metrics)?,
        ),
        None => (Vec::new(), Vec::new(), CriticalPath::default()),
    };
    let path_metrics = StageMetrics::new(metrics, started.elapsed());

    log_stages!(
        verbosity,
        "Paths: critical length {} over {} components in {} ns",
        critical_path.length,
        critical_path.path.len(),
        path_metrics.elapsed_ns
    );
    log_details!(verbosity, "  critical path: {:?}", critical_path.path);

    Ok(AnalysisReport {
        sccs,
        scc_sizes: sizes,
        cyclic_components: cyclic,
        condensation_nodes: cond_graph.node_count(),
        condensation_edges: cond_graph.edges().iter().map(|e| (e.u, e.v, e.w)).collect(),
        node_to_component: condensation.node_to_component,
        component_order,
        task_order,
        source_component,
        shortest,
        longest,
        critical_path,
        scc_metrics,
        topo_metrics,
        path_metrics,
    })
}

struct DistanceList<'a> {
    dist: &'a [Option<Weight>],
    unreached: &'static str,
}

impl fmt::Display for DistanceList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.dist.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match d {
                Some(d) => write!(f, "{d}")?,
                None => f.write_str(self.unreached)?,
            }
        }
        f.write_str("]")
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Strongly Connected Components ===")?;
        writeln!(f, "SCCs: {:?}", self.sccs)?;
        writeln!(f, "SCC Sizes: {:?}", self.scc_sizes)?;
        writeln!(f, "Cyclic components: {:?}", self.cyclic_components)?;
        writeln!(f, "Time: {} ns", self.scc_metrics.elapsed_ns)?;
        writeln!(f, "DFS Visits: {}", self.scc_metrics.counters.dfs_visits)?;
        writeln!(f, "DFS Edges: {}", self.scc_metrics.counters.dfs_edges)?;
        writeln!(f)?;

        writeln!(f, "=== Condensation Graph ===")?;
        writeln!(f, "Number of components: {}", self.condensation_nodes)?;
        writeln!(f, "Edges between components: {}", self.condensation_edges.len())?;
        writeln!(f)?;

        writeln!(f, "=== Topological Order ===")?;
        writeln!(f, "Component Order: {:?}", self.component_order)?;
        writeln!(f, "Task Order: {:?}", self.task_order)?;
        writeln!(f, "Time: {} ns", self.topo_metrics.elapsed_ns)?;
        writeln!(f, "Kahn Pushes: {}", self.topo_metrics.counters.kahn_pushes)?;
        writeln!(f, "Kahn Pops: {}", self.topo_metrics.counters.kahn_pops)?;
        writeln!(f)?;

        writeln!(f, "=== Paths ===")?;
        match self.source_component {
            Some(c) => writeln!(f, "Source component: {c}")?,
            None => writeln!(f, "Source component: none (empty graph)")?,
        }
        writeln!(
            f,
            "Shortest distances from source: {}",
            DistanceList {
                dist: &self.shortest,
                unreached: "INF"
            }
        )?;
        writeln!(
            f,
            "Longest distances from source: {}",
            DistanceList {
                dist: &self.longest,
                unreached: "-INF"
            }
        )?;
        writeln!(f, "Critical Path: {:?}", self.critical_path.path)?;
        writeln!(f, "Critical Path Length: {}", self.critical_path.length)?;
        writeln!(f, "Time: {} ns", self.path_metrics.elapsed_ns)?;
        writeln!(f, "Relaxations: {}", self.path_metrics.counters.relaxations)
    }
}

/// Human-readable report, one section per stage.
pub fn render_report(report: &AnalysisReport) -> String {
    report.to_string()
}
