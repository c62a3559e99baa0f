//! Dependency graph analysis for task scheduling.
//!
//! Finds strongly connected components of a weighted task graph, condenses
//! them into a DAG, orders the DAG topologically and runs shortest, longest
//! and critical path analysis over it. Everything is exposed both as a Rust
//! library and as the `rust` Python extension module.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

pub mod condensation;
pub mod config;
pub mod generator;
pub mod graph;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod scc;
pub mod topological;

pub use condensation::{condense, condense_with_policy, ComponentId, Condensation, CondenseError};
pub use config::{AnalysisConfig, ConfigError, EdgeMergePolicy};
pub use graph::{Edge, Graph, GraphError, NodeId, Weight};
pub use metrics::{Metrics, StageMetrics};
pub use models::{AnalysisReport, CriticalPath};
pub use paths::{critical_path, longest_paths, shortest_paths, Distances, PathError};
pub use pipeline::{analyze, render_report, AnalysisError};
pub use scc::{find_sccs, Component};
pub use topological::{expand_task_order, topological_order, TopologicalError};

fn value_error(e: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(e.to_string())
}

/// Strongly connected components in Tarjan completion order.
#[pyfunction]
#[pyo3(name = "find_sccs")]
fn py_find_sccs(graph: PyRef<'_, Graph>) -> Vec<Component> {
    find_sccs(&graph)
}

/// Condense `graph` along `sccs`.
///
/// # Returns
/// * `(node_to_component, condensed_graph)`
///
/// # Raises
/// * ValueError if `sccs` does not partition the nodes or the policy is unknown
#[pyfunction]
#[pyo3(name = "condense", signature = (graph, sccs, edge_merge="first"))]
fn py_condense(
    graph: PyRef<'_, Graph>,
    sccs: Vec<Component>,
    edge_merge: &str,
) -> PyResult<(Vec<ComponentId>, Graph)> {
    let policy: EdgeMergePolicy = edge_merge.parse().map_err(value_error)?;
    let condensation = condense_with_policy(&graph, &sccs, policy).map_err(value_error)?;
    Ok((condensation.node_to_component, condensation.graph))
}

/// Kahn topological order of an acyclic graph.
///
/// # Raises
/// * ValueError if the graph contains a cycle
#[pyfunction]
#[pyo3(name = "topological_order")]
fn py_topological_order(graph: PyRef<'_, Graph>) -> PyResult<Vec<NodeId>> {
    topological_order(&graph).map_err(value_error)
}

/// Minimum distances from `source`; unreachable nodes are `None`.
#[pyfunction]
#[pyo3(name = "shortest_paths")]
fn py_shortest_paths(
    graph: PyRef<'_, Graph>,
    order: Vec<NodeId>,
    source: NodeId,
) -> PyResult<Distances> {
    shortest_paths(&graph, &order, source).map_err(value_error)
}

/// Maximum distances from `source`; unreachable nodes are `None`.
#[pyfunction]
#[pyo3(name = "longest_paths")]
fn py_longest_paths(
    graph: PyRef<'_, Graph>,
    order: Vec<NodeId>,
    source: NodeId,
) -> PyResult<Distances> {
    longest_paths(&graph, &order, source).map_err(value_error)
}

#[pyfunction]
#[pyo3(name = "critical_path")]
fn py_critical_path(
    graph: PyRef<'_, Graph>,
    order: Vec<NodeId>,
    source: NodeId,
) -> PyResult<CriticalPath> {
    critical_path(&graph, &order, source).map_err(value_error)
}

/// Run the full pipeline: SCCs, condensation, ordering and paths.
///
/// # Raises
/// * ValueError if the source is out of range or the policy is unknown
#[pyfunction]
#[pyo3(signature = (graph, config=None))]
fn analyze_graph(
    graph: PyRef<'_, Graph>,
    config: Option<AnalysisConfig>,
) -> PyResult<AnalysisReport> {
    let config = config.unwrap_or_default();
    analyze(&graph, &config).map_err(value_error)
}

/// Read a JSON graph file.
///
/// # Returns
/// * `(graph, source)` where `source` is the document's source task
#[pyfunction]
#[pyo3(name = "load_graph")]
fn py_load_graph(path: std::path::PathBuf) -> PyResult<(Graph, NodeId)> {
    let (graph, doc) = io::load_graph(&path).map_err(value_error)?;
    Ok((graph, doc.source))
}

/// Python module definition
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Graph types
    m.add_class::<Edge>()?;
    m.add_class::<Graph>()?;

    // Config and results
    m.add_class::<AnalysisConfig>()?;
    m.add_class::<AnalysisReport>()?;
    m.add_class::<CriticalPath>()?;
    m.add_class::<Metrics>()?;
    m.add_class::<StageMetrics>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_find_sccs, m)?)?;
    m.add_function(wrap_pyfunction!(py_condense, m)?)?;
    m.add_function(wrap_pyfunction!(py_topological_order, m)?)?;
    m.add_function(wrap_pyfunction!(py_shortest_paths, m)?)?;
    m.add_function(wrap_pyfunction!(py_longest_paths, m)?)?;
    m.add_function(wrap_pyfunction!(py_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_graph, m)?)?;
    m.add_function(wrap_pyfunction!(py_load_graph, m)?)?;

    Ok(())
}
