//! Minimum Spanning Tree Implementation
//!
//! Kruskal's algorithm over the undirected graph described by the lower
//! triangle of a symmetric weight matrix.
//!
//! # Edge Enumeration
//! Candidate edges are read from the pairs `(i, j)` with `i > j` in the order
//! the caller supplied the vertices, row by row. Only strictly positive
//! weights become candidates. Candidates are then sorted ascending by weight
//! with a stable sort, so equal weights keep their enumeration order.
//!
//! # Greedy Selection
//! Each candidate whose endpoints lie in different disjoint-set components
//! is selected and its components merged. Selection stops after |V|-1 edges
//! or when candidates run out; a disconnected graph simply yields a forest
//! with fewer edges.
//!
//! # Complexity
//! - Time: O(V² log V) for enumeration and sorting, plus the disjoint-set work
//! - Space: O(V²) candidates
//!
//! Copyright (c) 2025 Mohammad Atashi. All rights reserved.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{
    bool_parameter, parse_bool_parameter, Algorithm, AlgorithmError, AlgorithmProfiler,
    ExecutionStatistics,
};
use crate::data_structures::disjoint_set::DisjointSet;
use crate::data_structures::graph::{Graph, GraphError, Weight};

/// MST-specific error types
#[derive(Debug, Error)]
pub enum MSTError {
    #[error("Weight matrix is not symmetric: ({row}, {column}) differs from ({column}, {row})")]
    AsymmetricMatrix { row: String, column: String },

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),
}

/// Undirected weighted edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MSTEdge<W> {
    /// Endpoint later in caller order
    pub source: String,
    /// Endpoint earlier in caller order
    pub target: String,
    pub weight: W,
}

/// Selected tree edges and their total weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MSTResult<W> {
    /// Edges in the order they were selected
    pub edges: Vec<MSTEdge<W>>,
    pub total_weight: W,
    /// Every candidate edge, in the order it was examined
    pub candidate_edges: Vec<MSTEdge<W>>,
    /// Number of vertices in the input graph
    pub vertex_count: usize,
    pub statistics: ExecutionStatistics,
}

impl<W> MSTResult<W> {
    /// Whether the selected edges connect every vertex
    pub fn is_spanning(&self) -> bool {
        self.edges.len() + 1 == self.vertex_count
    }
}

/// Kruskal's algorithm
///
/// # Parameters
/// - `path_compression` (`true`/`false`, default `false`): flatten
///   disjoint-set chains during `find`. Selection output is unaffected.
/// - `enforce_symmetry` (`true`/`false`, default `true`): reject matrices
///   whose weights differ across the diagonal. When disabled the upper
///   triangle is ignored and a warning is logged.
#[derive(Debug, Clone)]
pub struct Kruskal {
    parameters: HashMap<String, String>,
}

impl Kruskal {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("path_compression".to_string(), "false".to_string());
        parameters.insert("enforce_symmetry".to_string(), "true".to_string());
        Self { parameters }
    }

    /// Computes a minimum spanning tree (or forest)
    pub fn solve<W: Weight>(&self, graph: &Graph<W>) -> Result<MSTResult<W>, MSTError> {
        if let Some((i, j)) = graph.first_asymmetry() {
            if bool_parameter(&self.parameters, "enforce_symmetry") {
                return Err(MSTError::AsymmetricMatrix {
                    row: graph.vertex(i).to_owned(),
                    column: graph.vertex(j).to_owned(),
                });
            }
            warn!(
                "asymmetric weights at ({}, {}); upper triangle ignored",
                graph.vertex(i),
                graph.vertex(j)
            );
        }

        Ok(self.run(graph))
    }

    fn run<W: Weight>(&self, graph: &Graph<W>) -> MSTResult<W> {
        let n = graph.len();
        let mut profiler = AlgorithmProfiler::started();

        let mut candidates = lower_triangle_edges(graph);
        // Vec::sort_by is stable
        candidates.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));
        debug!("Kruskal over {} vertices, {} candidate edges", n, candidates.len());

        let mut components = DisjointSet::new(n)
            .with_path_compression(bool_parameter(&self.parameters, "path_compression"));
        let mut edges = Vec::with_capacity(n.saturating_sub(1));
        let mut total_weight = W::zero();

        for &(i, j, weight) in &candidates {
            if edges.len() + 1 >= n {
                break;
            }
            profiler.record_step();

            if components.union(i, j) {
                trace!("selected {} - {} ({})", graph.vertex(i), graph.vertex(j), weight);
                total_weight = total_weight.combine(weight);
                edges.push(edge(graph, i, j, weight));
                profiler.record_update();
            }
        }

        if edges.len() + 1 < n {
            debug!(
                "graph is disconnected: {} components remain",
                components.components()
            );
        }
        profiler.record_comparisons(components.hops());

        MSTResult {
            edges,
            total_weight,
            candidate_edges: candidates
                .into_iter()
                .map(|(i, j, w)| edge(graph, i, j, w))
                .collect(),
            vertex_count: n,
            statistics: profiler.finish(),
        }
    }
}

fn edge<W: Weight>(graph: &Graph<W>, i: usize, j: usize, weight: W) -> MSTEdge<W> {
    MSTEdge {
        source: graph.vertex(i).to_owned(),
        target: graph.vertex(j).to_owned(),
        weight,
    }
}

/// Positive-weight pairs `(i, j)`, `i > j`, in row-major caller order
fn lower_triangle_edges<W: Weight>(graph: &Graph<W>) -> Vec<(usize, usize, W)> {
    let n = graph.len();
    (0..n)
        .flat_map(|i| (0..i).map(move |j| (i, j)))
        .filter_map(|(i, j)| {
            graph
                .weight_at(i, j)
                .filter(|w| *w > W::zero())
                .map(|w| (i, j, w))
        })
        .collect()
}

impl Default for Kruskal {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Kruskal {
    fn name(&self) -> &'static str {
        "Kruskal"
    }

    fn category(&self) -> &'static str {
        "mst"
    }

    fn description(&self) -> &'static str {
        "Kruskal's minimum spanning tree over the lower triangle of a symmetric matrix, stable-sorted candidates and a disjoint-set forest, O(E log E)."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "path_compression" | "enforce_symmetry" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter {
                name: name.to_string(),
                valid: "path_compression, enforce_symmetry".to_string(),
            }),
        }
    }

    fn get_parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(|s| s.as_str())
    }

    fn get_parameters(&self) -> HashMap<String, String> {
        self.parameters.clone()
    }
}

/// Minimum spanning tree with default settings
pub fn minimum_spanning_tree<W: Weight>(graph: &Graph<W>) -> Result<MSTResult<W>, MSTError> {
    Kruskal::new().solve(graph)
}
