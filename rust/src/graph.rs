//! Directed weighted graph with an immutable adjacency list.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Node identifier (nodes are numbered `0..n`).
pub type NodeId = usize;

/// Edge weight and accumulated distance type.
pub type Weight = i64;

/// Errors raised while constructing a graph.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Edge {index} ({u} -> {v}) references a node outside 0..{n}")]
    EndpointOutOfRange {
        index: usize,
        u: NodeId,
        v: NodeId,
        n: usize,
    },
}

/// A directed edge `u -> v` carrying a weight (cost or duration).
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    #[pyo3(get, set)]
    pub u: NodeId,
    #[pyo3(get, set)]
    pub v: NodeId,
    #[pyo3(get, set)]
    pub w: Weight,
}

impl Edge {
    pub fn new(u: NodeId, v: NodeId, w: Weight) -> Self {
        Self { u, v, w }
    }
}

#[pymethods]
impl Edge {
    #[new]
    #[pyo3(signature = (u, v, w=1))]
    fn py_new(u: NodeId, v: NodeId, w: Weight) -> Self {
        Self::new(u, v, w)
    }

    fn __repr__(&self) -> String {
        format!("Edge(u={}, v={}, w={})", self.u, self.v, self.w)
    }
}

/// Directed weighted graph over nodes `0..n`.
///
/// The adjacency list is built once in the constructor. There is no way to
/// mutate the edge set afterwards; build a new graph instead.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    #[pyo3(get)]
    n: usize,
    #[pyo3(get)]
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Build a graph, checking that every edge endpoint lies in `0..n`.
    pub fn new(n: usize, edges: Vec<Edge>) -> Result<Self, GraphError> {
        if let Some((index, edge)) = edges
            .iter()
            .enumerate()
            .find(|(_, e)| e.u >= n || e.v >= n)
        {
            return Err(GraphError::EndpointOutOfRange {
                index,
                u: edge.u,
                v: edge.v,
                n,
            });
        }
        Ok(Self::from_valid_edges(n, edges))
    }

    /// Build a graph from edges already known to be in range.
    pub(crate) fn from_valid_edges(n: usize, edges: Vec<Edge>) -> Self {
        let mut adjacency: Vec<Vec<Edge>> = vec![Vec::new(); n];
        for edge in &edges {
            adjacency[edge.u].push(*edge);
        }
        Self {
            n,
            edges,
            adjacency,
        }
    }

    /// Graph with `n` nodes and no edges.
    pub fn empty(n: usize) -> Self {
        Self::from_valid_edges(n, Vec::new())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Number of edges (parallel edges counted separately).
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Outgoing edges of `node`, in insertion order.
    ///
    /// # Panics
    /// Panics if `node >= n`.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[Edge] {
        &self.adjacency[node]
    }

    pub fn adjacency(&self) -> &[Vec<Edge>] {
        &self.adjacency
    }
}

#[pymethods]
impl Graph {
    #[new]
    #[pyo3(signature = (n, edges=Vec::new()))]
    fn py_new(n: usize, edges: Vec<Edge>) -> PyResult<Self> {
        Self::new(n, edges).map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    #[pyo3(name = "neighbors")]
    fn py_neighbors(&self, node: NodeId) -> PyResult<Vec<Edge>> {
        self.adjacency.get(node).cloned().ok_or_else(|| {
            pyo3::exceptions::PyIndexError::new_err(format!(
                "Node {} outside 0..{}",
                node, self.n
            ))
        })
    }

    fn __len__(&self) -> usize {
        self.n
    }

    fn __repr__(&self) -> String {
        format!("Graph(n={}, edges={})", self.n, self.edges.len())
    }
}
