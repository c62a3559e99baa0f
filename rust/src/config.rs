//! Configuration types for graph analysis.

use pyo3::prelude::*;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from invalid configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown edge merge policy: {0} (expected first, min, max or sum)")]
    UnknownEdgeMerge(String),
}

/// How parallel edges between the same two components are merged during
/// condensation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeMergePolicy {
    /// Keep the weight of the first edge in edge-list order.
    #[default]
    First,
    Min,
    Max,
    Sum,
}

impl EdgeMergePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
        }
    }
}

impl FromStr for EdgeMergePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "sum" => Ok(Self::Sum),
            other => Err(ConfigError::UnknownEdgeMerge(other.to_string())),
        }
    }
}

impl fmt::Display for EdgeMergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a full analysis run.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Source task (original node id) for path analysis
    #[pyo3(get, set)]
    pub source: usize,
    /// Edge merge policy for condensation: "first", "min", "max" or "sum"
    #[pyo3(get, set)]
    pub edge_merge: String,
    /// Verbosity level: 0=silent, 1=stages, 2=details, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            source: 0,
            edge_merge: EdgeMergePolicy::default().as_str().to_string(),
            verbosity: 0,
        }
    }
}

impl AnalysisConfig {
    /// Parse the configured edge merge policy.
    pub fn edge_merge_policy(&self) -> Result<EdgeMergePolicy, ConfigError> {
        self.edge_merge.parse()
    }
}

#[pymethods]
impl AnalysisConfig {
    #[new]
    #[pyo3(signature = (source=None, edge_merge=None, verbosity=None))]
    fn new(source: Option<usize>, edge_merge: Option<String>, verbosity: Option<u8>) -> Self {
        let defaults = Self::default();
        Self {
            source: source.unwrap_or(defaults.source),
            edge_merge: edge_merge.unwrap_or(defaults.edge_merge),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "AnalysisConfig(source={}, edge_merge={:?}, verbosity={})",
            self.source, self.edge_merge, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.source, 0);
        assert_eq!(config.edge_merge, "first");
        assert_eq!(config.verbosity, 0);
        assert_eq!(config.edge_merge_policy(), Ok(EdgeMergePolicy::First));
    }

    #[test]
    fn test_edge_merge_parsing() {
        for policy in [
            EdgeMergePolicy::First,
            EdgeMergePolicy::Min,
            EdgeMergePolicy::Max,
            EdgeMergePolicy::Sum,
        ] {
            assert_eq!(policy.to_string().parse::<EdgeMergePolicy>(), Ok(policy));
        }
        assert_eq!(
            "average".parse::<EdgeMergePolicy>(),
            Err(ConfigError::UnknownEdgeMerge("average".to_string()))
        );
    }

    #[test]
    fn test_unknown_policy_in_config() {
        let config = AnalysisConfig {
            edge_merge: "median".to_string(),
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.edge_merge_policy(),
            Err(ConfigError::UnknownEdgeMerge(_))
        ));
    }
}
