//! Result types returned by the analysis stages.

use pyo3::prelude::*;

use crate::condensation::ComponentId;
use crate::graph::{NodeId, Weight};
use crate::metrics::StageMetrics;
use crate::scc::Component;

/// Longest path from the source and its accumulated weight.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPath {
    #[pyo3(get)]
    pub path: Vec<NodeId>,
    #[pyo3(get)]
    pub length: Weight,
}

#[pymethods]
impl CriticalPath {
    fn __repr__(&self) -> String {
        format!("CriticalPath(path={:?}, length={})", self.path, self.length)
    }
}

/// Everything produced by one run of the analysis pipeline.
///
/// Path results are indexed by component id and refer to the condensation;
/// `source_component` is the component of the configured source task.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    #[pyo3(get)]
    pub sccs: Vec<Component>,
    #[pyo3(get)]
    pub scc_sizes: Vec<usize>,
    /// Components with an internal cycle.
    #[pyo3(get)]
    pub cyclic_components: Vec<ComponentId>,
    #[pyo3(get)]
    pub node_to_component: Vec<ComponentId>,
    #[pyo3(get)]
    pub condensation_nodes: usize,
    /// Condensation edges as `(from, to, weight)`.
    #[pyo3(get)]
    pub condensation_edges: Vec<(ComponentId, ComponentId, Weight)>,
    #[pyo3(get)]
    pub component_order: Vec<ComponentId>,
    #[pyo3(get)]
    pub task_order: Vec<NodeId>,
    #[pyo3(get)]
    pub source_component: Option<ComponentId>,
    #[pyo3(get)]
    pub shortest: Vec<Option<Weight>>,
    #[pyo3(get)]
    pub longest: Vec<Option<Weight>>,
    #[pyo3(get)]
    pub critical_path: CriticalPath,
    #[pyo3(get)]
    pub scc_metrics: StageMetrics,
    #[pyo3(get)]
    pub topo_metrics: StageMetrics,
    #[pyo3(get)]
    pub path_metrics: StageMetrics,
}

#[pymethods]
impl AnalysisReport {
    fn __repr__(&self) -> String {
        format!(
            "AnalysisReport(sccs={}, condensation_edges={}, critical_path_length={})",
            self.sccs.len(),
            self.condensation_edges.len(),
            self.critical_path.length
        )
    }

    fn __str__(&self) -> String {
        crate::pipeline::render_report(self)
    }
}
