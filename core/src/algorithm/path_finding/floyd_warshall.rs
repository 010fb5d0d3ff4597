//! All-Pairs Shortest Path Implementation
//!
//! This module implements Floyd–Warshall triple relaxation in two modes
//! sharing one relaxation core:
//!
//! - **Plain**: integer weights, final distance and predecessor matrices.
//! - **Incremental vertex insertion**: float weights, plus a snapshot of the
//!   full distance matrix before the first round and after every processed
//!   vertex, so the convergence can be replayed step by step.
//!
//! # Algorithm
//! Distances start at 0 on the diagonal, at the direct edge weight where an
//! edge exists (predecessor = edge source), and at "unreachable" elsewhere.
//! For every vertex `k`, in the order the caller supplied the vertices,
//! every pair `(i, j)` is relaxed: when `d(i,k)` and `d(k,j)` are both
//! finite and their sum is strictly smaller than `d(i,j)`, the sum replaces
//! `d(i,j)` and `pred(i,j)` takes `pred(k,j)`.
//!
//! A negative cycle is reported iff some diagonal distance ends below zero.
//! Distances in such a graph are not meaningful.
//!
//! # Complexity
//! - Time: O(V³)
//! - Space: O(V²), plus O(V³) for the incremental snapshot history
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    bool_parameter, parse_bool_parameter, Algorithm, AlgorithmError, AlgorithmProfiler,
    ExecutionStatistics,
};
use crate::data_structures::graph::{Graph, Weight};
use crate::data_structures::matrix::{Distance, LabelledMatrix};
use crate::execution::history::{SnapshotHistory, StepLabel};
use crate::validation::correctness;

/// Final state of an all-pairs computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllPairsResult<W> {
    /// Shortest distances, sorted by vertex identifier
    pub distances: LabelledMatrix<Distance<W>>,
    /// Vertex preceding the column vertex on the best path from the row vertex
    pub predecessors: LabelledMatrix<Option<String>>,
    /// Some diagonal distance went below zero
    pub has_negative_cycle: bool,
    pub statistics: ExecutionStatistics,
}

impl<W: Weight> AllPairsResult<W> {
    /// Distance from `source` to `target`, `None` for unknown vertices
    pub fn distance(&self, source: &str, target: &str) -> Option<Distance<W>> {
        self.distances.get(source, target).copied()
    }

    /// Predecessor of `target` on the best path from `source`
    pub fn predecessor(&self, source: &str, target: &str) -> Option<&str> {
        self.predecessors.get(source, target)?.as_deref()
    }

    /// Reconstructs the path from `source` to `target` by walking predecessors
    ///
    /// Returns `None` when the target is unreachable, a vertex is unknown, or
    /// the predecessor chain does not lead back to `source` within |V| hops
    /// (possible only when a negative cycle is present).
    pub fn path(&self, source: &str, target: &str) -> Option<Vec<String>> {
        if !self.distance(source, target)?.is_finite() {
            return None;
        }

        let mut path = vec![target.to_owned()];
        let mut current = target;
        while current != source {
            if path.len() > self.distances.order() {
                return None;
            }
            current = self.predecessor(source, current)?;
            path.push(current.to_owned());
        }

        path.reverse();
        Some(path)
    }
}

/// Result of the incremental vertex-insertion mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncrementalResult {
    pub paths: AllPairsResult<f64>,
    /// Initial state followed by one snapshot per processed vertex
    pub history: SnapshotHistory<f64>,
}

/// Dense working state of one run, indexed by caller positions
#[derive(Debug)]
struct Relaxation<W> {
    n: usize,
    dist: Vec<Distance<W>>,
    pred: Vec<Option<usize>>,
}

impl<W: Weight> Relaxation<W> {
    fn initialise(graph: &Graph<W>) -> Self {
        let n = graph.len();
        let mut dist = vec![Distance::Unreachable; n * n];
        let mut pred = vec![None; n * n];

        for i in 0..n {
            dist[i * n + i] = Distance::Finite(W::zero());
        }
        for (i, j, w) in graph.edges() {
            dist[i * n + j] = Distance::Finite(w);
            pred[i * n + j] = Some(i);
        }

        Self { n, dist, pred }
    }

    /// Relaxes every pair through `k`, returning the number of improvements
    fn relax_through(&mut self, k: usize, profiler: &mut AlgorithmProfiler) -> usize {
        let n = self.n;
        let mut improved = 0;

        for i in 0..n {
            let to_k = self.dist[i * n + k];
            if !to_k.is_finite() {
                continue;
            }
            for j in 0..n {
                profiler.record_comparisons(1);
                let Some(via) = to_k.through(self.dist[k * n + j]) else {
                    continue;
                };
                if Distance::Finite(via) < self.dist[i * n + j] {
                    self.dist[i * n + j] = Distance::Finite(via);
                    self.pred[i * n + j] = self.pred[k * n + j];
                    profiler.record_update();
                    improved += 1;
                }
            }
        }

        improved
    }

    fn has_negative_cycle(&self) -> bool {
        (0..self.n).any(|i| self.dist[i * self.n + i] < Distance::Finite(W::zero()))
    }

    fn distances(&self, graph: &Graph<W>) -> LabelledMatrix<Distance<W>> {
        LabelledMatrix::sorted_from_graph(graph, |i, j| self.dist[i * self.n + j])
    }

    fn predecessors(&self, graph: &Graph<W>) -> LabelledMatrix<Option<String>> {
        LabelledMatrix::sorted_from_graph(graph, |i, j| {
            self.pred[i * self.n + j].map(|p| graph.vertex(p).to_owned())
        })
    }
}

/// Floyd–Warshall solver
///
/// # Parameters
/// - `verify_result` (`true`/`false`, default `false`): check the triangle
///   inequality on the final matrix when no negative cycle was found.
#[derive(Debug, Clone)]
pub struct FloydWarshall {
    parameters: HashMap<String, String>,
}

impl FloydWarshall {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("verify_result".to_string(), "false".to_string());
        Self { parameters }
    }

    /// Computes all-pairs shortest paths
    pub fn solve<W: Weight>(&self, graph: &Graph<W>) -> Result<AllPairsResult<W>, AlgorithmError> {
        let result = self.run(graph, |_, _, _| {});
        self.verify(&result)?;
        Ok(result)
    }

    /// Computes all-pairs shortest paths, recording a snapshot per processed vertex
    pub fn solve_incremental(&self, graph: &Graph<f64>) -> Result<IncrementalResult, AlgorithmError> {
        let mut history = SnapshotHistory::with_capacity(graph.len() + 1);
        let paths = self.run(graph, |label, state, graph| {
            history.record(label, state.distances(graph));
        });
        self.verify(&paths)?;
        Ok(IncrementalResult { paths, history })
    }

    fn run<W, F>(&self, graph: &Graph<W>, mut on_step: F) -> AllPairsResult<W>
    where
        W: Weight,
        F: FnMut(StepLabel, &Relaxation<W>, &Graph<W>),
    {
        debug!("Floyd-Warshall over {} vertices, {} edges", graph.len(), graph.edge_count());

        let mut profiler = AlgorithmProfiler::started();
        let mut state = Relaxation::initialise(graph);
        on_step(StepLabel::Initial, &state, graph);

        for (k, vertex) in graph.insertion_order().iter().enumerate() {
            let improved = state.relax_through(k, &mut profiler);
            profiler.record_step();
            trace!("vertex {} applied {} relaxations", vertex, improved);
            on_step(StepLabel::AfterVertex(vertex.clone()), &state, graph);
        }

        let has_negative_cycle = state.has_negative_cycle();
        if has_negative_cycle {
            warn!("negative cycle detected; distances are not meaningful");
        }

        AllPairsResult {
            distances: state.distances(graph),
            predecessors: state.predecessors(graph),
            has_negative_cycle,
            statistics: profiler.finish(),
        }
    }

    fn verify<W: Weight>(&self, result: &AllPairsResult<W>) -> Result<(), AlgorithmError> {
        if bool_parameter(&self.parameters, "verify_result") && !result.has_negative_cycle {
            correctness::verify_triangle_inequality(result)?;
        }
        Ok(())
    }
}

impl Default for FloydWarshall {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for FloydWarshall {
    fn name(&self) -> &'static str {
        "Floyd-Warshall"
    }

    fn category(&self) -> &'static str {
        "shortest_path"
    }

    fn description(&self) -> &'static str {
        "All-pairs shortest paths by triple relaxation through each vertex in caller order, O(V^3). Reports a negative cycle when any vertex reaches itself at negative cost."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "verify_result" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter {
                name: name.to_string(),
                valid: "verify_result".to_string(),
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

/// Plain all-pairs shortest paths over integer weights
pub fn all_pairs_shortest_paths(graph: &Graph<i64>) -> AllPairsResult<i64> {
    FloydWarshall::new().run(graph, |_, _, _| {})
}

/// Incremental vertex-insertion shortest paths over float weights
pub fn incremental_shortest_paths(graph: &Graph<f64>) -> IncrementalResult {
    let mut history = SnapshotHistory::with_capacity(graph.len() + 1);
    let paths = FloydWarshall::new().run(graph, |label, state, graph| {
        history.record(label, state.distances(graph));
    });
    IncrementalResult { paths, history }
}
