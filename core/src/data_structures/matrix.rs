//! Distance sentinel and labelled square matrices
//!
//! Result matrices handed to consumers are always labelled by vertex
//! identifier and laid out in sorted identifier order, independent of the
//! order in which the caller supplied the vertices.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

use serde::{Deserialize, Serialize};

use super::graph::{Graph, Weight};

/// Shortest-path distance with an explicit "unreachable" sentinel
///
/// The derived ordering places every finite distance below `Unreachable`,
/// which is exactly the comparison relaxation needs.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance<W> {
    Finite(W),
    Unreachable,
}

impl<W> Default for Distance<W> {
    fn default() -> Self {
        Distance::Unreachable
    }
}

impl<W: Weight> Distance<W> {
    #[inline]
    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    #[inline]
    pub fn finite(self) -> Option<W> {
        match self {
            Distance::Finite(w) => Some(w),
            Distance::Unreachable => None,
        }
    }

    /// Length of this path followed by an edge of weight `weight`
    #[inline]
    pub fn extend(self, weight: W) -> Distance<W> {
        match self {
            Distance::Finite(w) => Distance::Finite(w.combine(weight)),
            Distance::Unreachable => Distance::Unreachable,
        }
    }

    /// Length of this path followed by `rest`, only when both are finite
    #[inline]
    pub fn through(self, rest: Distance<W>) -> Option<W> {
        match (self, rest) {
            (Distance::Finite(a), Distance::Finite(b)) => Some(a.combine(b)),
            _ => None,
        }
    }
}

impl<W: fmt::Display> fmt::Display for Distance<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(w) => write!(f, "{}", w),
            Distance::Unreachable => f.write_str("∞"),
        }
    }
}

/// Square matrix addressed by vertex identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelledMatrix<T> {
    labels: Vec<String>,
    cells: Vec<T>,
}

impl<T> LabelledMatrix<T> {
    /// Builds a matrix by evaluating `cell(row, column)` for every position
    pub fn from_fn<F>(labels: Vec<String>, mut cell: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let n = labels.len();
        let cells = (0..n * n).map(|k| cell(k / n, k % n)).collect();
        Self { labels, cells }
    }

    /// Builds a matrix over `graph`'s vertices in sorted order
    ///
    /// `cell` receives caller positions, so solvers can index their own
    /// working state directly.
    pub fn sorted_from_graph<W, F>(graph: &Graph<W>, mut cell: F) -> Self
    where
        W: Weight,
        F: FnMut(usize, usize) -> T,
    {
        let order = graph.sorted_positions();
        let labels = graph.vertices().map(str::to_owned).collect();
        Self::from_fn(labels, |r, c| cell(order[r], order[c]))
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows (and columns)
    #[inline]
    pub fn order(&self) -> usize {
        self.labels.len()
    }

    /// Position of a label
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Cell addressed by row and column labels
    pub fn get(&self, row: &str, column: &str) -> Option<&T> {
        let r = self.position(row)?;
        let c = self.position(column)?;
        Some(self.at(r, c))
    }

    /// Cell addressed by row and column positions
    #[inline]
    pub fn at(&self, row: usize, column: usize) -> &T {
        &self.cells[row * self.order() + column]
    }

    /// One row as a slice
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let n = self.order();
        &self.cells[row * n..(row + 1) * n]
    }

    /// Rows paired with their labels
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[T])> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(move |(r, label)| (label.as_str(), self.row(r)))
    }

    /// Applies `f` to every cell, keeping labels
    pub fn map<U, F>(&self, f: F) -> LabelledMatrix<U>
    where
        F: FnMut(&T) -> U,
    {
        LabelledMatrix {
            labels: self.labels.clone(),
            cells: self.cells.iter().map(f).collect(),
        }
    }
}
