//! Named-vertex adjacency matrix graph model
//!
//! This module implements the graph representation shared by every solver in
//! the engine: a finite, non-empty set of case-sensitive vertex identifiers
//! and a dense weight assignment for every ordered pair of vertices.
//!
//! # Encoding Conventions
//! - A stored weight of exactly zero and a missing edge are the same thing.
//!   Zero always means "no edge" (or "no capacity" for flow networks).
//! - The diagonal never carries an edge, whatever the input says.
//! - Malformed cell text never raises: it resolves to "no edge".
//!
//! Graphs are immutable once built. Every solver reads a `Graph` by shared
//! reference and allocates its own working state, so one graph can feed any
//! number of concurrent invocations.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;
use std::fmt::{Debug, Display};

use num_traits::Zero;
use serde::Serialize;
use thiserror::Error;

/// Numeric weight usable as an edge weight, distance or capacity
pub trait Weight: Copy + PartialOrd + Zero + Debug + Display + Send + Sync + 'static {
    /// Whether values of this type are whole numbers (affects display only)
    const INTEGRAL: bool;

    /// Parses one raw matrix cell, returning `None` for malformed text
    fn parse_cell(cell: &str) -> Option<Self>;

    /// Length of the concatenation of two path segments
    fn combine(self, other: Self) -> Self;

    /// Lossy conversion used by presentation and verification code
    fn to_f64(self) -> f64;
}

impl Weight for i64 {
    const INTEGRAL: bool = true;

    #[inline]
    fn parse_cell(cell: &str) -> Option<Self> {
        cell.trim().parse::<i64>().ok()
    }

    #[inline]
    fn combine(self, other: Self) -> Self {
        self.saturating_add(other)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Weight for f64 {
    const INTEGRAL: bool = false;

    #[inline]
    fn parse_cell(cell: &str) -> Option<Self> {
        // "inf" and "NaN" parse as floats but are not usable weights
        cell.trim().parse::<f64>().ok().filter(|w| w.is_finite())
    }

    /// Saturates at the largest finite magnitude, like the `i64` impl
    #[inline]
    fn combine(self, other: Self) -> Self {
        (self + other).clamp(f64::MIN, f64::MAX)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Structural contract violations detected while building or querying a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Graph must contain at least one vertex")]
    EmptyVertexSet,

    #[error("Vertex identifier at position {0} is empty")]
    EmptyIdentifier(usize),

    #[error("Duplicate vertex identifier: {0}")]
    DuplicateVertex(String),

    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("Matrix row {row} has {found} cells, expected {expected}")]
    DimensionMismatch {
        expected: usize,
        row: usize,
        found: usize,
    },
}

/// Dense weighted graph over named vertices
///
/// Vertices keep the order in which the caller supplied them
/// ([`Graph::insertion_order`]); the incremental all-pairs solver and the
/// lower-triangular MST edge enumeration depend on it. All other iteration
/// ([`Graph::vertices`]) follows the sorted order of identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph<W> {
    /// Identifiers in caller-supplied order
    vertices: Vec<String>,

    /// Positions into `vertices`, sorted by identifier
    #[serde(skip)]
    sorted: Vec<usize>,

    /// Identifier to position lookup
    #[serde(skip)]
    index: HashMap<String, usize>,

    /// Row-major `n * n` weights, `None` for "no edge"
    weights: Vec<Option<W>>,
}

impl<W: Weight> Graph<W> {
    /// Starts building a graph over the given vertices with no edges
    pub fn builder<I, S>(vertices: I) -> Result<GraphBuilder<W>, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (vertices, index) = index_vertices(vertices)?;
        let n = vertices.len();

        Ok(GraphBuilder {
            graph: Graph {
                sorted: sorted_positions(&vertices),
                vertices,
                index,
                weights: vec![None; n * n],
            },
        })
    }

    /// Builds a graph from a grid of raw cell strings
    ///
    /// `rows[i][j]` holds the weight of the edge from the i-th to the j-th
    /// vertex, both in caller order. Blank, non-numeric and zero cells are
    /// all "no edge".
    pub fn from_cells<I, S, C>(vertices: I, rows: &[Vec<C>]) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: AsRef<str>,
    {
        let mut builder = Self::builder(vertices)?;
        let n = builder.graph.len();
        check_dimensions(n, rows.iter().map(Vec::len), rows.len())?;

        for (i, row) in rows.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                builder.graph.assign(i, j, W::parse_cell(cell.as_ref()));
            }
        }

        Ok(builder.build())
    }

    /// Builds a graph from already-numeric rows, zero meaning "no edge"
    pub fn from_rows<I, S>(vertices: I, rows: &[Vec<W>]) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::builder(vertices)?;
        let n = builder.graph.len();
        check_dimensions(n, rows.iter().map(Vec::len), rows.len())?;

        for (i, row) in rows.iter().enumerate() {
            for (j, &weight) in row.iter().enumerate() {
                builder.graph.assign(i, j, Some(weight));
            }
        }

        Ok(builder.build())
    }

    /// Number of vertices (never zero)
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; construction rejects empty vertex sets
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertex identifiers in sorted order
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.sorted.iter().map(move |&i| self.vertices[i].as_str())
    }

    /// Vertex identifiers in the order the caller supplied them
    #[inline]
    pub fn insertion_order(&self) -> &[String] {
        &self.vertices
    }

    /// Positions of the vertices, sorted by identifier
    #[inline]
    pub fn sorted_positions(&self) -> &[usize] {
        &self.sorted
    }

    /// Identifier of the vertex at caller position `i`
    #[inline]
    pub fn vertex(&self, i: usize) -> &str {
        &self.vertices[i]
    }

    /// Caller position of a vertex identifier
    #[inline]
    pub fn index_of(&self, vertex: &str) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    /// Caller position of a vertex identifier, failing on unknown vertices
    pub fn require(&self, vertex: &str) -> Result<usize, GraphError> {
        self.index_of(vertex)
            .ok_or_else(|| GraphError::UnknownVertex(vertex.to_owned()))
    }

    /// Whether `vertex` belongs to the graph
    #[inline]
    pub fn contains(&self, vertex: &str) -> bool {
        self.index.contains_key(vertex)
    }

    /// Weight of the edge `source -> target`, `None` when absent or unknown
    pub fn weight(&self, source: &str, target: &str) -> Option<W> {
        let i = self.index_of(source)?;
        let j = self.index_of(target)?;
        self.weight_at(i, j)
    }

    /// Weight of the edge between caller positions `i` and `j`
    #[inline]
    pub fn weight_at(&self, i: usize, j: usize) -> Option<W> {
        self.weights[i * self.len() + j]
    }

    /// All edges as `(source, target, weight)` positions, row-major in caller order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        let n = self.len();
        self.weights
            .iter()
            .enumerate()
            .filter_map(move |(cell, w)| w.map(|w| (cell / n, cell % n, w)))
    }

    /// Outgoing edges of caller position `i` as `(target, weight)`
    pub fn out_edges(&self, i: usize) -> impl Iterator<Item = (usize, W)> + '_ {
        let n = self.len();
        self.weights[i * n..(i + 1) * n]
            .iter()
            .enumerate()
            .filter_map(|(j, w)| w.map(|w| (j, w)))
    }

    /// Number of stored edges
    pub fn edge_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    /// First ordered pair `(i, j)`, `i > j`, whose weight differs from `(j, i)`
    pub fn first_asymmetry(&self) -> Option<(usize, usize)> {
        let n = self.len();
        (0..n)
            .flat_map(|i| (0..i).map(move |j| (i, j)))
            .find(|&(i, j)| self.weight_at(i, j) != self.weight_at(j, i))
    }

    fn assign(&mut self, i: usize, j: usize, weight: Option<W>) {
        if i == j {
            return;
        }
        let n = self.len();
        self.weights[i * n + j] = weight.filter(|w| !w.is_zero());
    }
}

/// Incremental constructor for [`Graph`]
///
/// The builder is the only way to mutate a graph; [`GraphBuilder::build`]
/// freezes it.
#[derive(Debug, Clone)]
pub struct GraphBuilder<W> {
    graph: Graph<W>,
}

impl<W: Weight> GraphBuilder<W> {
    /// Sets the weight of `source -> target`; zero or diagonal entries store nothing
    pub fn edge(mut self, source: &str, target: &str, weight: W) -> Result<Self, GraphError> {
        let i = self.graph.require(source)?;
        let j = self.graph.require(target)?;
        self.graph.assign(i, j, Some(weight));
        Ok(self)
    }

    /// Sets `source -> target` from raw cell text
    pub fn cell(mut self, source: &str, target: &str, cell: &str) -> Result<Self, GraphError> {
        let i = self.graph.require(source)?;
        let j = self.graph.require(target)?;
        self.graph.assign(i, j, W::parse_cell(cell));
        Ok(self)
    }

    /// Sets both directions of an undirected edge
    pub fn undirected(self, a: &str, b: &str, weight: W) -> Result<Self, GraphError> {
        self.edge(a, b, weight)?.edge(b, a, weight)
    }

    pub fn build(self) -> Graph<W> {
        self.graph
    }
}

fn index_vertices<I, S>(vertices: I) -> Result<(Vec<String>, HashMap<String, usize>), GraphError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let vertices: Vec<String> = vertices.into_iter().map(Into::into).collect();
    if vertices.is_empty() {
        return Err(GraphError::EmptyVertexSet);
    }

    let mut index = HashMap::with_capacity(vertices.len());
    for (position, vertex) in vertices.iter().enumerate() {
        if vertex.is_empty() {
            return Err(GraphError::EmptyIdentifier(position));
        }
        if index.insert(vertex.clone(), position).is_some() {
            return Err(GraphError::DuplicateVertex(vertex.clone()));
        }
    }

    Ok((vertices, index))
}

fn sorted_positions(vertices: &[String]) -> Vec<usize> {
    let mut sorted: Vec<usize> = (0..vertices.len()).collect();
    sorted.sort_by(|&a, &b| vertices[a].cmp(&vertices[b]));
    sorted
}

fn check_dimensions(
    n: usize,
    row_lengths: impl Iterator<Item = usize>,
    row_count: usize,
) -> Result<(), GraphError> {
    if row_count != n {
        return Err(GraphError::DimensionMismatch {
            expected: n,
            row: row_count.min(n),
            found: row_count,
        });
    }
    for (row, found) in row_lengths.enumerate() {
        if found != n {
            return Err(GraphError::DimensionMismatch { expected: n, row, found });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_resolve_malformed_and_zero_to_no_edge() {
        let graph: Graph<i64> = Graph::from_cells(
            ["A", "B", "C"],
            &[
                vec!["0", "4", "x"],
                vec![" 2 ", "0", "0"],
                vec!["", "-3", "7"],
            ],
        )
        .unwrap();

        assert_eq!(graph.weight("A", "B"), Some(4));
        assert_eq!(graph.weight("A", "C"), None);
        assert_eq!(graph.weight("B", "A"), Some(2));
        assert_eq!(graph.weight("B", "C"), None);
        assert_eq!(graph.weight("C", "A"), None);
        assert_eq!(graph.weight("C", "B"), Some(-3));
        // Diagonal is never an edge
        assert_eq!(graph.weight("C", "C"), None);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_float_cells_reject_non_finite() {
        let graph: Graph<f64> = Graph::from_cells(
            ["A", "B"],
            &[vec!["0", "inf"], vec!["2.5", "0"]],
        )
        .unwrap();

        assert_eq!(graph.weight("A", "B"), None);
        assert_eq!(graph.weight("B", "A"), Some(2.5));
    }

    #[test]
    fn test_combined_lengths_stay_finite() {
        assert_eq!(1e308_f64.combine(1e308), f64::MAX);
        assert_eq!((-1e308_f64).combine(-1e308), f64::MIN);
        assert_eq!(1.5_f64.combine(-0.25), 1.25);
        assert_eq!(i64::MAX.combine(1), i64::MAX);
    }

    #[test]
    fn test_vertex_order_views() {
        let graph: Graph<i64> = Graph::builder(["c", "A", "b"]).unwrap().build();

        assert_eq!(graph.insertion_order(), &["c", "A", "b"]);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec!["A", "b", "c"]);
        assert_eq!(graph.index_of("b"), Some(2));
        assert!(!graph.contains("B"));
    }

    #[test]
    fn test_structural_errors() {
        let empty: Vec<&str> = Vec::new();
        assert_eq!(
            Graph::<i64>::builder(empty).unwrap_err(),
            GraphError::EmptyVertexSet
        );
        assert_eq!(
            Graph::<i64>::builder(["A", "A"]).unwrap_err(),
            GraphError::DuplicateVertex("A".into())
        );
        assert_eq!(
            Graph::<i64>::builder(["A", ""]).unwrap_err(),
            GraphError::EmptyIdentifier(1)
        );
        assert!(matches!(
            Graph::<i64>::from_rows(["A", "B"], &[vec![0, 1]]),
            Err(GraphError::DimensionMismatch { expected: 2, .. })
        ));
        assert!(matches!(
            Graph::<i64>::from_rows(["A", "B"], &[vec![0, 1], vec![0]]),
            Err(GraphError::DimensionMismatch { row: 1, found: 1, .. })
        ));
    }

    #[test]
    fn test_builder_and_edge_iteration() {
        let graph = Graph::builder(["A", "B", "C"])
            .unwrap()
            .edge("A", "B", 1)
            .unwrap()
            .edge("B", "C", 2)
            .unwrap()
            .edge("A", "C", 0)
            .unwrap()
            .build();

        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1, 1), (1, 2, 2)]);
        assert_eq!(graph.out_edges(0).collect::<Vec<_>>(), vec![(1, 1)]);
        assert!(graph.weight("A", "Z").is_none());
        assert!(matches!(
            Graph::<i64>::builder(["A"]).unwrap().edge("A", "Z", 3),
            Err(GraphError::UnknownVertex(v)) if v == "Z"
        ));
    }

    #[test]
    fn test_first_asymmetry() {
        let symmetric = Graph::builder(["A", "B", "C"])
            .unwrap()
            .undirected("A", "B", 3)
            .unwrap()
            .build();
        assert_eq!(symmetric.first_asymmetry(), None);

        let skewed: Graph<i64> =
            Graph::from_rows(["A", "B", "C"], &[vec![0, 1, 0], vec![1, 0, 5], vec![0, 4, 0]])
                .unwrap();
        assert_eq!(skewed.first_asymmetry(), Some((2, 1)));
    }
}
