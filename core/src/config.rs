//! Engine configuration
//!
//! A JSON document selecting solver parameters and display options. Every
//! field is optional; missing fields take the solver defaults.
//!
//! ```json
//! {
//!   "all_pairs": { "verify_result": true },
//!   "single_source": { "selection": "binary_heap" },
//!   "spanning_tree": { "path_compression": true },
//!   "display": { "precision": 3 }
//! }
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::graph::max_flow::EdmondsKarp;
use crate::algorithm::graph::mst::Kruskal;
use crate::algorithm::path_finding::dijkstra::{Dijkstra, VertexSelection};
use crate::algorithm::path_finding::floyd_warshall::FloydWarshall;
use crate::algorithm::traits::{Algorithm, AlgorithmError};
use crate::presentation::DisplayOptions;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Parameter rejected: {0}")]
    Parameter(#[from] AlgorithmError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllPairsConfig {
    pub verify_result: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleSourceConfig {
    pub selection: VertexSelection,
    pub verify_result: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanningTreeConfig {
    pub path_compression: bool,
    pub enforce_symmetry: bool,
}

impl Default for SpanningTreeConfig {
    fn default() -> Self {
        Self {
            path_compression: false,
            enforce_symmetry: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaxFlowConfig {
    pub verify_result: bool,
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub all_pairs: AllPairsConfig,
    pub single_source: SingleSourceConfig,
    pub spanning_tree: SpanningTreeConfig,
    pub max_flow: MaxFlowConfig,
    pub display: DisplayOptions,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading engine configuration from {}", path.display());
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn floyd_warshall(&self) -> Result<FloydWarshall, ConfigError> {
        let mut solver = FloydWarshall::new();
        solver.set_parameter("verify_result", flag(self.all_pairs.verify_result))?;
        Ok(solver)
    }

    pub fn dijkstra(&self) -> Result<Dijkstra, ConfigError> {
        let mut solver = Dijkstra::new();
        solver.set_parameter("selection", self.single_source.selection.as_str())?;
        solver.set_parameter("verify_result", flag(self.single_source.verify_result))?;
        Ok(solver)
    }

    pub fn kruskal(&self) -> Result<Kruskal, ConfigError> {
        let mut solver = Kruskal::new();
        solver.set_parameter("path_compression", flag(self.spanning_tree.path_compression))?;
        solver.set_parameter("enforce_symmetry", flag(self.spanning_tree.enforce_symmetry))?;
        Ok(solver)
    }

    pub fn edmonds_karp(&self) -> Result<EdmondsKarp, ConfigError> {
        let mut solver = EdmondsKarp::new();
        solver.set_parameter("verify_result", flag(self.max_flow.verify_result))?;
        Ok(solver)
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
