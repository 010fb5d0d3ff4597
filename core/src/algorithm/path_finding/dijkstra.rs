//! Single-Source Shortest Path Implementation
//!
//! Dijkstra-style vertex settling with predecessor tracking, path
//! reconstruction and a post-hoc negative-cycle heuristic.
//!
//! # Algorithm
//! 1. Every distance starts "unreachable" except the source (0).
//! 2. Repeatedly pick the unsettled vertex with the smallest distance. Ties go
//!    to the vertex whose identifier sorts first. Stop if that distance is
//!    "unreachable".
//! 3. Settle it and relax each outgoing edge on strict improvement, setting
//!    the neighbor's predecessor to the settled vertex. Settled neighbors are
//!    relaxed too; with negative weights their distance can still drop.
//! 4. After termination, any edge `(u, v)` with `d(u) + w(u,v) < d(v)` flags a
//!    negative cycle. This is a heuristic over the non-reoptimized result,
//!    not a Bellman–Ford certificate.
//!
//! # Vertex Selection
//! `linear_scan` scans all unsettled vertices each round, O(V²) overall.
//! `binary_heap` keeps them in an indexed min-heap keyed by
//! `(distance, sorted rank)`, which selects the same vertex every round.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{BTreeMap, HashMap};

use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    bool_parameter, parse_bool_parameter, Algorithm, AlgorithmError, AlgorithmProfiler,
    ExecutionStatistics,
};
use crate::data_structures::graph::Graph;
use crate::data_structures::matrix::Distance;
use crate::data_structures::priority_queue::IndexedMinQueue;
use crate::validation::correctness;

/// Unsettled-vertex selection strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VertexSelection {
    /// Scan all unsettled vertices each round
    #[default]
    LinearScan,
    /// Indexed binary heap with decrease-key
    BinaryHeap,
}

impl VertexSelection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LinearScan => "linear_scan",
            Self::BinaryHeap => "binary_heap",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "linear_scan" => Some(Self::LinearScan),
            "binary_heap" => Some(Self::BinaryHeap),
            _ => None,
        }
    }
}

/// Distances and predecessors from one source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSourceResult {
    pub source: String,
    /// Distance to every vertex, keyed (and ordered) by identifier
    pub distances: BTreeMap<String, Distance<i64>>,
    /// Last hop into every vertex, `None` for the source and unreached vertices
    pub predecessors: BTreeMap<String, Option<String>>,
    /// Vertices in the order they were settled
    pub settled_order: Vec<String>,
    /// Some edge could still be relaxed after termination
    pub has_negative_cycle: bool,
    pub statistics: ExecutionStatistics,
}

/// Concrete route to one destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Source first, destination last; empty when no path exists
    pub vertices: Vec<String>,
    /// Reported length, "unreachable" whenever `vertices` is empty
    pub length: Distance<i64>,
}

impl ShortestPath {
    fn none() -> Self {
        Self {
            vertices: Vec::new(),
            length: Distance::Unreachable,
        }
    }

    #[inline]
    pub fn exists(&self) -> bool {
        !self.vertices.is_empty()
    }
}

/// Single-source tree plus the route to one requested destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub tree: SingleSourceResult,
    pub destination: String,
    pub path: ShortestPath,
}

/// Errors raised for path queries on unknown vertices
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Unknown source vertex: {0}")]
    UnknownSource(String),

    #[error("Unknown destination vertex: {0}")]
    UnknownDestination(String),
}

impl SingleSourceResult {
    /// Distance to `vertex`, `None` for unknown vertices
    pub fn distance(&self, vertex: &str) -> Option<Distance<i64>> {
        self.distances.get(vertex).copied()
    }

    pub fn predecessor(&self, vertex: &str) -> Option<&str> {
        self.predecessors.get(vertex)?.as_deref()
    }

    /// Follows predecessors back from `destination`
    ///
    /// If the walk does not end exactly at the source, the path is reported
    /// as non-existent even when a finite distance was computed. The walk is
    /// capped at |V| hops, since negative edges can leave a predecessor loop.
    pub fn path_to(&self, destination: &str) -> Result<ShortestPath, PathError> {
        let length = self
            .distance(destination)
            .ok_or_else(|| PathError::UnknownDestination(destination.to_owned()))?;
        if !length.is_finite() {
            return Ok(ShortestPath::none());
        }

        let mut vertices = vec![destination.to_owned()];
        let mut current = destination;
        while let Some(previous) = self.predecessor(current) {
            if vertices.len() > self.distances.len() {
                debug!("predecessor chain from {} does not terminate", destination);
                return Ok(ShortestPath::none());
            }
            vertices.push(previous.to_owned());
            current = previous;
        }
        vertices.reverse();

        if vertices.first().map(String::as_str) != Some(self.source.as_str()) {
            return Ok(ShortestPath::none());
        }

        Ok(ShortestPath { vertices, length })
    }
}

/// Dijkstra-style single-source solver
///
/// # Parameters
/// - `selection`: `linear_scan` (default) or `binary_heap`
/// - `verify_result` (`true`/`false`, default `false`): check that every
///   reconstructed path weighs exactly its reported distance
#[derive(Debug, Clone)]
pub struct Dijkstra {
    parameters: HashMap<String, String>,
}

impl Dijkstra {
    pub fn new() -> Self {
        let mut parameters = HashMap::new();
        parameters.insert(
            "selection".to_string(),
            VertexSelection::default().as_str().to_string(),
        );
        parameters.insert("verify_result".to_string(), "false".to_string());
        Self { parameters }
    }

    /// Configured selection strategy
    pub fn selection(&self) -> VertexSelection {
        self.parameters
            .get("selection")
            .and_then(|v| VertexSelection::parse(v))
            .unwrap_or_default()
    }

    /// Computes distances and predecessors from `source`
    pub fn solve(&self, graph: &Graph<i64>, source: &str) -> Result<SingleSourceResult, AlgorithmError> {
        let source_index = graph
            .index_of(source)
            .ok_or_else(|| PathError::UnknownSource(source.to_owned()))?;

        let result = self.run(graph, source_index);

        if bool_parameter(&self.parameters, "verify_result") && !result.has_negative_cycle {
            correctness::verify_single_source(graph, &result)?;
        }
        Ok(result)
    }

    /// Runs one independent solve from every vertex, in parallel
    ///
    /// Invocations share the graph by reference and nothing else.
    pub fn solve_from_each(
        &self,
        graph: &Graph<i64>,
    ) -> Result<BTreeMap<String, SingleSourceResult>, AlgorithmError> {
        graph
            .vertices()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|source| Ok((source.to_owned(), self.solve(graph, source)?)))
            .collect()
    }

    /// Computes the shortest route from `source` to `destination`
    pub fn shortest_path(
        &self,
        graph: &Graph<i64>,
        source: &str,
        destination: &str,
    ) -> Result<PathResult, AlgorithmError> {
        if !graph.contains(destination) {
            return Err(PathError::UnknownDestination(destination.to_owned()).into());
        }

        let tree = self.solve(graph, source)?;
        let path = tree.path_to(destination)?;
        Ok(PathResult {
            tree,
            destination: destination.to_owned(),
            path,
        })
    }

    fn run(&self, graph: &Graph<i64>, source: usize) -> SingleSourceResult {
        let n = graph.len();
        let selection = self.selection();
        debug!(
            "Dijkstra from {} over {} vertices using {}",
            graph.vertex(source),
            n,
            selection.as_str()
        );

        let mut profiler = AlgorithmProfiler::started();
        let mut dist = vec![Distance::Unreachable; n];
        let mut pred: Vec<Option<usize>> = vec![None; n];
        dist[source] = Distance::Finite(0);

        // Tie-break rank: position in sorted identifier order
        let mut rank = vec![0; n];
        for (r, &i) in graph.sorted_positions().iter().enumerate() {
            rank[i] = r;
        }

        let mut frontier = Frontier::new(selection, &dist, &rank);
        let mut settled_order = Vec::with_capacity(n);

        while let Some(current) = frontier.pick(&dist, &rank, &mut profiler) {
            let Distance::Finite(base) = dist[current] else {
                break;
            };
            profiler.record_step();
            settled_order.push(graph.vertex(current).to_owned());
            trace!("settled {} at {}", graph.vertex(current), base);

            for (neighbor, weight) in graph.out_edges(current) {
                let candidate = Distance::Finite(base.saturating_add(weight));
                if candidate < dist[neighbor] {
                    dist[neighbor] = candidate;
                    pred[neighbor] = Some(current);
                    frontier.lowered(neighbor, candidate);
                    profiler.record_update();
                }
            }
        }

        let has_negative_cycle = graph
            .edges()
            .any(|(u, v, w)| dist[u].is_finite() && dist[u].extend(w) < dist[v]);
        if has_negative_cycle {
            warn!("edge still relaxable after settling; negative cycle reported");
        }

        SingleSourceResult {
            source: graph.vertex(source).to_owned(),
            distances: (0..n).map(|i| (graph.vertex(i).to_owned(), dist[i])).collect(),
            predecessors: (0..n)
                .map(|i| (graph.vertex(i).to_owned(), pred[i].map(|p| graph.vertex(p).to_owned())))
                .collect(),
            settled_order,
            has_negative_cycle,
            statistics: profiler.finish(),
        }
    }
}

/// Unsettled vertex set under either selection strategy
enum Frontier {
    Scan(Vec<bool>),
    Heap(IndexedMinQueue<Distance<i64>>),
}

impl Frontier {
    fn new(selection: VertexSelection, dist: &[Distance<i64>], rank: &[usize]) -> Self {
        match selection {
            VertexSelection::LinearScan => Frontier::Scan(vec![true; dist.len()]),
            VertexSelection::BinaryHeap => {
                let mut queue = IndexedMinQueue::new(dist.len());
                for (i, &d) in dist.iter().enumerate() {
                    queue.push(i, rank[i], d);
                }
                Frontier::Heap(queue)
            }
        }
    }

    /// Removes and returns the unsettled vertex with the lowest `(distance, rank)`
    fn pick(
        &mut self,
        dist: &[Distance<i64>],
        rank: &[usize],
        profiler: &mut AlgorithmProfiler,
    ) -> Option<usize> {
        match self {
            Frontier::Scan(unsettled) => {
                let mut best: Option<usize> = None;
                for i in (0..dist.len()).filter(|&i| unsettled[i]) {
                    profiler.record_comparisons(1);
                    best = match best {
                        Some(b) if (dist[b], rank[b]) <= (dist[i], rank[i]) => Some(b),
                        _ => Some(i),
                    };
                }
                if let Some(b) = best {
                    if dist[b].is_finite() {
                        unsettled[b] = false;
                    }
                }
                best
            }
            Frontier::Heap(queue) => {
                let before = queue.comparisons();
                let picked = queue.pop().map(|(i, _)| i);
                profiler.record_comparisons(queue.comparisons() - before);
                picked
            }
        }
    }

    /// Records an improved distance for a vertex that may still be unsettled
    fn lowered(&mut self, vertex: usize, distance: Distance<i64>) {
        if let Frontier::Heap(queue) = self {
            queue.decrease_key(vertex, distance);
        }
    }
}

impl Default for Dijkstra {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn category(&self) -> &'static str {
        "shortest_path"
    }

    fn description(&self) -> &'static str {
        "Single-source shortest paths by settling the closest unsettled vertex, O(V^2) with a linear scan or O((V + E) log V) with a binary heap. Flags a negative cycle when an edge remains relaxable afterwards."
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> Result<(), AlgorithmError> {
        match name {
            "selection" => {
                if VertexSelection::parse(value).is_none() {
                    return Err(AlgorithmError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!(
                            "invalid selection: {}. Valid options: linear_scan, binary_heap",
                            value
                        ),
                    });
                }
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            "verify_result" => {
                parse_bool_parameter(name, value)?;
                self.parameters.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(AlgorithmError::UnknownParameter {
                name: name.to_string(),
                valid: "selection, verify_result".to_string(),
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

/// Shortest route from `source` to `destination` with default settings
pub fn shortest_path(
    graph: &Graph<i64>,
    source: &str,
    destination: &str,
) -> Result<PathResult, AlgorithmError> {
    Dijkstra::new().shortest_path(graph, source, destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Graph<i64> {
        Graph::builder(["A", "B", "C"])
            .unwrap()
            .edge("A", "B", 1)
            .unwrap()
            .edge("B", "C", 2)
            .unwrap()
            .edge("A", "C", 10)
            .unwrap()
            .build()
    }

    fn heap_solver() -> Dijkstra {
        let mut solver = Dijkstra::new();
        solver.set_parameter("selection", "binary_heap").unwrap();
        solver
    }

    #[test]
    fn test_route_through_cheaper_intermediate() {
        let result = shortest_path(&chain(), "A", "C").unwrap();

        assert_eq!(result.path.vertices, vec!["A", "B", "C"]);
        assert_eq!(result.path.length, Distance::Finite(3));
        assert_eq!(result.tree.predecessor("C"), Some("B"));
        assert_eq!(result.tree.predecessor("B"), Some("A"));
        assert_eq!(result.tree.predecessor("A"), None);
        assert_eq!(result.tree.settled_order, vec!["A", "B", "C"]);
        assert!(!result.tree.has_negative_cycle);
    }

    #[test]
    fn test_unreachable_destination_has_empty_path() {
        let result = shortest_path(&chain(), "C", "A").unwrap();

        assert!(!result.path.exists());
        assert_eq!(result.path.length, Distance::Unreachable);
        assert_eq!(result.tree.distance("B"), Some(Distance::Unreachable));
        assert_eq!(result.tree.settled_order, vec!["C"]);
    }

    #[test]
    fn test_source_path_is_single_vertex() {
        let result = shortest_path(&chain(), "B", "B").unwrap();
        assert_eq!(result.path.vertices, vec!["B"]);
        assert_eq!(result.path.length, Distance::Finite(0));
    }

    #[test]
    fn test_ties_settle_in_sorted_order() {
        let graph = Graph::builder(["S", "Y", "X"])
            .unwrap()
            .edge("S", "Y", 4)
            .unwrap()
            .edge("S", "X", 4)
            .unwrap()
            .build();

        let linear = Dijkstra::new().solve(&graph, "S").unwrap();
        let heap = heap_solver().solve(&graph, "S").unwrap();

        assert_eq!(linear.settled_order, vec!["S", "X", "Y"]);
        assert_eq!(heap.settled_order, linear.settled_order);
    }

    #[test]
    fn test_negative_edge_flags_cycle_heuristic() {
        // B is settled before the cheaper route through C is discovered
        let graph: Graph<i64> = Graph::from_rows(
            ["A", "B", "C", "D"],
            &[
                vec![0, 1, 5, 0],
                vec![0, 0, 0, 1],
                vec![0, -10, 0, 0],
                vec![0, 0, 0, 0],
            ],
        )
        .unwrap();

        let result = Dijkstra::new().solve(&graph, "A").unwrap();
        assert_eq!(result.distance("B"), Some(Distance::Finite(-5)));
        assert_eq!(result.distance("D"), Some(Distance::Finite(2)));
        assert!(result.has_negative_cycle);
    }

    #[test]
    fn test_predecessor_loop_yields_no_path() {
        // Settling B lowers the already settled source to -4, closing A <-> B
        let graph: Graph<i64> = Graph::from_rows(["A", "B"], &[vec![0, 1], vec![-5, 0]]).unwrap();

        for solver in [Dijkstra::new(), heap_solver()] {
            let result = solver.shortest_path(&graph, "A", "B").unwrap();
            assert!(result.tree.has_negative_cycle);
            assert_eq!(result.tree.predecessor("A"), Some("B"));
            assert_eq!(result.tree.predecessor("B"), Some("A"));
            assert!(!result.path.exists());
            assert_eq!(result.path.length, Distance::Unreachable);
        }
    }

    #[test]
    fn test_unknown_vertices_are_rejected() {
        assert!(matches!(
            shortest_path(&chain(), "Z", "A"),
            Err(AlgorithmError::Path(PathError::UnknownSource(v))) if v == "Z"
        ));
        assert!(matches!(
            shortest_path(&chain(), "A", "Q"),
            Err(AlgorithmError::Path(PathError::UnknownDestination(v))) if v == "Q"
        ));
        assert!(matches!(
            Dijkstra::new().solve(&chain(), "Z"),
            Err(AlgorithmError::Path(PathError::UnknownSource(_)))
        ));

        let tree = Dijkstra::new().solve(&chain(), "A").unwrap();
        assert_eq!(
            tree.path_to("Q").unwrap_err(),
            PathError::UnknownDestination("Q".into())
        );
    }

    #[test]
    fn test_path_not_ending_at_source_is_reported_missing() {
        let mut tree = Dijkstra::new().solve(&chain(), "A").unwrap();
        // Cut the chain between B and A
        tree.predecessors.insert("B".into(), None);

        let path = tree.path_to("C").unwrap();
        assert!(!path.exists());
        assert_eq!(path.length, Distance::Unreachable);
        // The computed distance itself is untouched
        assert_eq!(tree.distance("C"), Some(Distance::Finite(3)));
    }

    #[test]
    fn test_solve_from_each_matches_individual_runs() {
        let graph = chain();
        let solver = heap_solver();
        let all = solver.solve_from_each(&graph).unwrap();

        assert_eq!(all.keys().collect::<Vec<_>>(), vec!["A", "B", "C"]);
        for (source, tree) in &all {
            let single = solver.solve(&graph, source).unwrap();
            assert_eq!(tree.distances, single.distances);
            assert_eq!(tree.settled_order, single.settled_order);
        }
        assert_eq!(all["B"].distance("C"), Some(Distance::Finite(2)));
    }

    #[test]
    fn test_parameters() {
        let mut solver = Dijkstra::new();
        assert_eq!(solver.selection(), VertexSelection::LinearScan);
        assert!(solver.set_parameter("selection", "fibonacci").is_err());
        assert!(solver.set_parameter("selection", "binary_heap").is_ok());
        assert_eq!(solver.selection(), VertexSelection::BinaryHeap);
        assert!(solver.set_parameter("verify_result", "true").is_ok());
        assert!(solver.set_parameter("heuristic", "none").is_err());

        let result = solver.solve(&chain(), "A").unwrap();
        assert_eq!(result.distance("C"), Some(Distance::Finite(3)));
    }
}
