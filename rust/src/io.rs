//! JSON persistence for graphs.
//!
//! Document format:
//! `{"n": 4, "edges": [{"u": 0, "v": 1, "w": 3}], "source": 0, "weight_model": "edge"}`

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::graph::{Edge, Graph, GraphError, NodeId};

/// Errors raised while reading or writing graph documents.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid graph JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}

fn default_weight_model() -> String {
    "edge".to_string()
}

/// Serialized form of a graph plus the metadata stored alongside it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub n: usize,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub source: NodeId,
    #[serde(default = "default_weight_model")]
    pub weight_model: String,
}

impl GraphDocument {
    pub fn new(n: usize, edges: Vec<Edge>) -> Self {
        Self {
            n,
            edges,
            source: 0,
            weight_model: default_weight_model(),
        }
    }

    /// Validate the document and build its graph.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        Graph::new(self.n, self.edges.clone())
    }
}

impl From<&Graph> for GraphDocument {
    fn from(graph: &Graph) -> Self {
        Self::new(graph.node_count(), graph.edges().to_vec())
    }
}

/// Parse a JSON document from a string.
pub fn parse_document(json: &str) -> Result<GraphDocument, IoError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse and validate a graph from a JSON string.
pub fn parse_graph(json: &str) -> Result<(Graph, GraphDocument), IoError> {
    let doc = parse_document(json)?;
    let graph = doc.to_graph()?;
    Ok((graph, doc))
}

/// Read and validate a graph file.
pub fn load_graph(path: impl AsRef<Path>) -> Result<(Graph, GraphDocument), IoError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_graph(&json)
}

/// Pretty-printed JSON for a document.
pub fn to_json(doc: &GraphDocument) -> Result<String, IoError> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Write a document as pretty-printed JSON.
pub fn save_graph(path: impl AsRef<Path>, doc: &GraphDocument) -> Result<(), IoError> {
    let path = path.as_ref();
    let json = to_json(doc)?;
    fs::write(path, json).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "n": 3,
            "edges": [{"u": 0, "v": 1, "w": 2}, {"u": 1, "v": 2, "w": 5}],
            "source": 1,
            "weight_model": "edge"
        }"#;
        let (graph, doc) = parse_graph(json).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.neighbors(1), &[Edge::new(1, 2, 5)]);
        assert_eq!(doc.source, 1);
    }

    #[test]
    fn test_optional_fields_default() {
        let doc = parse_document(r#"{"n": 2}"#).unwrap();
        assert!(doc.edges.is_empty());
        assert_eq!(doc.source, 0);
        assert_eq!(doc.weight_model, "edge");
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let json = r#"{"n": 2, "edges": [{"u": 0, "v": 2, "w": 1}]}"#;
        assert!(matches!(
            parse_graph(json),
            Err(IoError::Graph(GraphError::EndpointOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(parse_graph("{\"n\": }"), Err(IoError::Json(_))));
        assert!(matches!(
            parse_graph(r#"{"n": -1}"#),
            Err(IoError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let doc = GraphDocument {
            source: 2,
            ..GraphDocument::new(3, vec![Edge::new(2, 0, 4)])
        };

        save_graph(&path, &doc).unwrap();
        let (graph, loaded) = load_graph(&path).unwrap();

        assert_eq!(loaded, doc);
        assert_eq!(graph.edges(), &[Edge::new(2, 0, 4)]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_graph(dir.path().join("absent.json"));
        assert!(matches!(result, Err(IoError::Read { .. })));
    }
}
