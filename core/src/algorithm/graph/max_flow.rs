//! Maximum Flow Implementation
//!
//! Edmonds–Karp: Ford–Fulkerson with breadth-first augmenting paths over a
//! dense residual matrix, followed by a minimum cut read off the final
//! residual graph.
//!
//! # Residual Graph
//! Every ordered pair has a residual entry. Pairs with positive capacity
//! start at that capacity, all others (including negative or malformed
//! cells) start at zero, so reverse residual edges exist for every pair as
//! soon as flow is pushed.
//!
//! # Augmentation
//! BFS from the source over strictly positive residual entries, scanning
//! neighbors in caller order and stopping as soon as the sink is
//! discovered. The bottleneck of the discovered path is added to the total;
//! each path edge `(u, v)` loses the bottleneck and `(v, u)` gains it.
//!
//! Residual entries are held as `i128`: a reverse entry can reach the sum of
//! two `i64` capacities. A total flow that does not fit in `i64` is reported
//! as [`FlowError::CapacityOverflow`].
//!
//! # Complexity
//! - Time: O(V · E²) augmentations bound, O(V²) per BFS on the dense matrix
//! - Space: O(V²)
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeSet, HashMap, VecDeque};

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::{
    bool_parameter, parse_bool_parameter, Algorithm, AlgorithmError, AlgorithmProfiler,
    ExecutionStatistics,
};
use crate::data_structures::graph::{Graph, GraphError};
use crate::data_structures::matrix::LabelledMatrix;
use crate::validation::correctness::{self, CorrectnessError};

/// Flow algorithm error types
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Source and sink must differ: {0}")]
    SourceEqualsSink(String),

    #[error("Unknown {role} vertex: {vertex}")]
    UnknownTerminal { role: &'static str, vertex: String },

    #[error("Maximum flow from {source_vertex} to {sink} exceeds the i64 range")]
    CapacityOverflow { source_vertex: String, sink: String },

    #[error("Invalid graph: {0}")]
    Graph(#[from] GraphError),

    #[error("Result verification failed: {0}")]
    Verification(#[from] CorrectnessError),
}

/// Original positive-capacity edge with the flow it carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub capacity: i64,
    pub flow: i64,
}

/// Edge crossing the minimum cut
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutEdge {
    pub source: String,
    pub target: String,
    pub capacity: i64,
}

/// Source side of the final residual graph and the edges leaving it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinCut {
    /// Vertices reachable from the source in the final residual graph
    pub reachable: BTreeSet<String>,
    /// Original positive-capacity edges from a reachable to an unreachable vertex
    pub edges: Vec<CutEdge>,
}

impl MinCut {
    /// Total capacity crossing the cut, saturating at `i64::MAX`
    pub fn capacity(&self) -> i64 {
        self.edges.iter().fold(0_i64, |total, e| total.saturating_add(e.capacity))
    }
}

/// One BFS augmentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AugmentingPath {
    /// Source first, sink last
    pub vertices: Vec<String>,
    pub bottleneck: i64,
}

/// Complete maximum flow result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxFlowResult {
    pub source: String,
    pub sink: String,
    pub max_flow: i64,
    /// Flow per ordered pair, zero wherever the original capacity was not positive
    pub flow_matrix: LabelledMatrix<i64>,
    /// Every original positive-capacity edge, row-major in caller order
    pub edges: Vec<FlowEdge>,
    pub min_cut: MinCut,
    /// Augmenting paths in the order they were found
    pub augmenting_paths: Vec<AugmentingPath>,
    pub statistics: ExecutionStatistics,
}

impl MaxFlowResult {
    /// Flow carried from `source` to `target`, `None` for unknown vertices
    pub fn flow(&self, source: &str, target: &str) -> Option<i64> {
        self.flow_matrix.get(source, target).copied()
    }
}

/// Dense residual capacities indexed by caller positions
#[derive(Debug)]
struct Residual {
    n: usize,
    capacity: Vec<i64>,
    residual: Vec<i128>,
}

impl Residual {
    fn initialise(graph: &Graph<i64>) -> Self {
        let n = graph.len();
        let mut capacity = vec![0; n * n];
        for (i, j, c) in graph.edges() {
            capacity[i * n + j] = c.max(0);
        }
        let residual = capacity.iter().map(|&c| i128::from(c)).collect();
        Self {
            n,
            capacity,
            residual,
        }
    }

    /// BFS over positive residual entries
    ///
    /// Returns the discovery predecessor of every visited vertex; the search
    /// stops early once `sink` is discovered.
    fn search(
        &self,
        source: usize,
        sink: Option<usize>,
        profiler: &mut AlgorithmProfiler,
    ) -> Vec<Option<usize>> {
        let n = self.n;
        let mut visited = vec![false; n];
        let mut parent = vec![None; n];
        let mut queue = VecDeque::from([source]);
        visited[source] = true;

        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                profiler.record_comparisons(1);
                if visited[v] || self.residual[u * n + v] <= 0 {
                    continue;
                }
                visited[v] = true;
                parent[v] = Some(u);
                if Some(v) == sink {
                    return parent;
                }
                queue.push_back(v);
            }
        }

        parent
    }

    /// Source-to-sink path through `parent`, if the sink was reached
    fn path(parent: &[Option<usize>], source: usize, sink: usize) -> Option<Vec<usize>> {
        let mut path = vec![sink];
        let mut v = sink;
        while v != source {
            v = parent[v]?;
            path.push(v);
        }
        path.reverse();
        Some(path)
    }

    fn augment(&mut self, path: &[usize]) -> i128 {
        let n = self.n;
        let bottleneck = path
            .windows(2)
            .map(|e| self.residual[e[0] * n + e[1]])
            .min()
            .unwrap_or(0);

        for e in path.windows(2) {
            self.residual[e[0] * n + e[1]] -= bottleneck;
            self.residual[e[1] * n + e[0]] += bottleneck;
        }
        bottleneck
    }

    /// Flow on an original edge, always within `[0, capacity]`
    fn flow(&self, i: usize, j: usize) -> i64 {
        let k = i * self.n + j;
        let capacity = self.capacity[k];
        if capacity <= 0 {
            return 0;
        }
        let used = (i128::from(capacity) - self.residual[k]).clamp(0, i128::from(capacity));
        i64::try_from(used).unwrap_or(capacity)
    }
}

/// Edmonds–Karp maximum flow solver
///
/// # Parameters
/// - `verify_result` (`true`/`false`, default `false`): check capacity
///   bounds, conservation and max-flow/min-cut equality on the result
#[derive(Debug, Clone)]
pub struct EdmondsKarp {
    parameters: HashMap<String, String>,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert("verify_result".to_string(), "false".to_string());
        Self { parameters }
    }

    /// Computes the maximum flow from `source` to `sink`
    pub fn solve(
        &self,
        graph: &Graph<i64>,
        source: &str,
        sink: &str,
    ) -> Result<MaxFlowResult, FlowError> {
        let s = graph.index_of(source).ok_or_else(|| FlowError::UnknownTerminal {
            role: "source",
            vertex: source.to_owned(),
        })?;
        let t = graph.index_of(sink).ok_or_else(|| FlowError::UnknownTerminal {
            role: "sink",
            vertex: sink.to_owned(),
        })?;
        if s == t {
            return Err(FlowError::SourceEqualsSink(source.to_owned()));
        }

        let result = self.run(graph, s, t)?;
        if bool_parameter(&self.parameters, "verify_result") {
            correctness::verify_flow(graph, &result)?;
        }
        Ok(result)
    }

    fn run(&self, graph: &Graph<i64>, s: usize, t: usize) -> Result<MaxFlowResult, FlowError> {
        let n = graph.len();
        debug!(
            "Edmonds-Karp from {} to {} over {} vertices",
            graph.vertex(s),
            graph.vertex(t),
            n
        );

        let mut profiler = AlgorithmProfiler::started();
        let mut residual = Residual::initialise(graph);
        let overflow = || FlowError::CapacityOverflow {
            source_vertex: graph.vertex(s).to_owned(),
            sink: graph.vertex(t).to_owned(),
        };
        let mut max_flow = 0_i128;
        let mut augmenting_paths = Vec::new();

        loop {
            let parent = residual.search(s, Some(t), &mut profiler);
            let Some(path) = Residual::path(&parent, s, t) else {
                break;
            };

            let bottleneck = residual.augment(&path);
            max_flow += bottleneck;
            let bottleneck = i64::try_from(bottleneck).map_err(|_| overflow())?;
            profiler.record_step();
            profiler.record_update();

            let vertices: Vec<String> = path.iter().map(|&v| graph.vertex(v).to_owned()).collect();
            trace!("augmented {} along {}", bottleneck, vertices.join(" -> "));
            augmenting_paths.push(AugmentingPath {
                vertices,
                bottleneck,
            });
        }

        // Reachability in the final residual graph
        let parent = residual.search(s, None, &mut profiler);
        let reachable: Vec<bool> = (0..n).map(|v| v == s || parent[v].is_some()).collect();

        let mut edges = Vec::new();
        let mut cut_edges = Vec::new();
        for (i, j, _) in graph.edges() {
            let capacity = residual.capacity[i * n + j];
            if capacity <= 0 {
                continue;
            }
            edges.push(FlowEdge {
                source: graph.vertex(i).to_owned(),
                target: graph.vertex(j).to_owned(),
                capacity,
                flow: residual.flow(i, j),
            });
            if reachable[i] && !reachable[j] {
                cut_edges.push(CutEdge {
                    source: graph.vertex(i).to_owned(),
                    target: graph.vertex(j).to_owned(),
                    capacity,
                });
            }
        }

        let max_flow = i64::try_from(max_flow).map_err(|_| overflow())?;
        debug!("maximum flow {} after {} augmentations", max_flow, augmenting_paths.len());

        Ok(MaxFlowResult {
            source: graph.vertex(s).to_owned(),
            sink: graph.vertex(t).to_owned(),
            max_flow,
            flow_matrix: LabelledMatrix::sorted_from_graph(graph, |i, j| residual.flow(i, j)),
            edges,
            min_cut: MinCut {
                reachable: (0..n)
                    .filter(|&v| reachable[v])
                    .map(|v| graph.vertex(v).to_owned())
                    .collect(),
                edges: cut_edges,
            },
            augmenting_paths,
            statistics: profiler.finish(),
        })
    }
}

impl Default for EdmondsKarp {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for EdmondsKarp {
    fn name(&self) -> &'static str {
        "Edmonds-Karp"
    }

    fn category(&self) -> &'static str {
        "max_flow"
    }

    fn description(&self) -> &'static str {
        "Maximum flow by repeated breadth-first augmenting paths in a dense residual matrix, O(V E^2). Reports the flow matrix and the minimum cut."
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

/// Maximum flow with default settings
pub fn maximum_flow(graph: &Graph<i64>, source: &str, sink: &str) -> Result<MaxFlowResult, FlowError> {
    EdmondsKarp::new().solve(graph, source, sink)
}
