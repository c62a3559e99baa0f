//! Event counters for the analysis stages.
//!
//! A `Metrics` record is owned by the caller and handed to the `*_with_metrics`
//! entry points by mutable reference. Counting never influences results.

use pyo3::prelude::*;
use std::time::Duration;

/// Counters incremented by the graph algorithms.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Metrics {
    /// Nodes discovered by the SCC depth-first traversal.
    #[pyo3(get)]
    pub dfs_visits: u64,
    /// Outgoing edges examined by the SCC traversal.
    #[pyo3(get)]
    pub dfs_edges: u64,
    /// Nodes enqueued on the Kahn frontier.
    #[pyo3(get)]
    pub kahn_pushes: u64,
    /// Nodes dequeued from the Kahn frontier.
    #[pyo3(get)]
    pub kahn_pops: u64,
    /// Edges relaxed from reached nodes during path analysis.
    #[pyo3(get)]
    pub relaxations: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[pymethods]
impl Metrics {
    fn __repr__(&self) -> String {
        format!(
            "Metrics(dfs_visits={}, dfs_edges={}, kahn_pushes={}, kahn_pops={}, relaxations={})",
            self.dfs_visits, self.dfs_edges, self.kahn_pushes, self.kahn_pops, self.relaxations
        )
    }
}

/// Counters and wall-clock time for one pipeline stage.
#[pyclass]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageMetrics {
    #[pyo3(get)]
    pub counters: Metrics,
    #[pyo3(get)]
    pub elapsed_ns: u64,
}

impl StageMetrics {
    pub fn new(counters: Metrics, elapsed: Duration) -> Self {
        Self {
            counters,
            // Saturate rather than wrap for absurdly long stages
            elapsed_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }
}

#[pymethods]
impl StageMetrics {
    fn __repr__(&self) -> String {
        format!(
            "StageMetrics(elapsed_ns={}, counters={})",
            self.elapsed_ns,
            self.counters.__repr__()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_zeroes_counters() {
        let mut metrics = Metrics {
            dfs_visits: 3,
            dfs_edges: 4,
            kahn_pushes: 5,
            kahn_pops: 5,
            relaxations: 9,
        };
        metrics.reset();
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn test_stage_metrics_elapsed() {
        let stage = StageMetrics::new(Metrics::new(), Duration::from_micros(3));
        assert_eq!(stage.elapsed_ns, 3_000);
    }
}
