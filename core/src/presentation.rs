//! Tabular rendering of solver results
//!
//! Converts result matrices into labelled rows of display strings, with the
//! "unreachable" and "no predecessor" sentinels rendered distinctly from any
//! finite value. Tables serialise to JSON for whatever front end consumes
//! them.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::data_structures::graph::{Graph, Weight};
use crate::data_structures::matrix::{Distance, LabelledMatrix};
use crate::execution::history::{SnapshotHistory, StepLabel};

/// Rendering options for tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Decimal places kept for non-integral weights
    pub precision: usize,
    /// Text shown for an unreachable distance
    pub infinity_symbol: String,
    /// Text shown for a missing predecessor
    pub none_symbol: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            precision: 2,
            infinity_symbol: "∞".to_string(),
            none_symbol: "-".to_string(),
        }
    }
}

impl DisplayOptions {
    /// Renders a weight, rounding floats to `precision` places
    ///
    /// Trailing zeros are dropped but one decimal digit is always kept, so
    /// `3.0` renders as "3.0" and `3.256` as "3.26".
    pub fn weight<W: Weight>(&self, weight: W) -> String {
        if W::INTEGRAL {
            return weight.to_string();
        }

        let text = format!("{:.*}", self.precision, weight.to_f64());
        match text.find('.') {
            Some(dot) => {
                let trimmed = text.trim_end_matches('0');
                if trimmed.len() == dot + 1 {
                    format!("{}0", trimmed)
                } else {
                    trimmed.to_string()
                }
            }
            None => format!("{}.0", text),
        }
    }

    pub fn distance<W: Weight>(&self, distance: &Distance<W>) -> String {
        match distance {
            Distance::Finite(w) => self.weight(*w),
            Distance::Unreachable => self.infinity_symbol.clone(),
        }
    }

    pub fn predecessor(&self, predecessor: Option<&str>) -> String {
        predecessor.map_or_else(|| self.none_symbol.clone(), str::to_owned)
    }
}

/// One labelled row of display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub vertex: String,
    pub values: Vec<String>,
}

/// Square table in sorted vertex order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    fn from_matrix<T, F>(matrix: &LabelledMatrix<T>, mut render: F) -> Self
    where
        F: FnMut(&T) -> String,
    {
        Self {
            columns: matrix.labels().to_vec(),
            rows: matrix
                .rows()
                .map(|(vertex, cells)| TableRow {
                    vertex: vertex.to_owned(),
                    values: cells.iter().map(&mut render).collect(),
                })
                .collect(),
        }
    }

    /// Display string at `(row, column)`
    pub fn cell(&self, row: &str, column: &str) -> Option<&str> {
        let c = self.columns.iter().position(|l| l == column)?;
        let r = self.rows.iter().find(|r| r.vertex == row)?;
        r.values.get(c).map(String::as_str)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Snapshot table tagged with the step it was taken after
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTable {
    pub step: usize,
    /// "initial" or the identifier of the processed vertex
    pub label: String,
    pub table: Table,
}

/// Distance matrix with the infinity symbol for unreachable pairs
pub fn distance_table<W: Weight>(distances: &LabelledMatrix<Distance<W>>, options: &DisplayOptions) -> Table {
    Table::from_matrix(distances, |d| options.distance(d))
}

/// Predecessor matrix with the none symbol for missing predecessors
pub fn predecessor_table(predecessors: &LabelledMatrix<Option<String>>, options: &DisplayOptions) -> Table {
    Table::from_matrix(predecessors, |p| options.predecessor(p.as_deref()))
}

/// Input weights in sorted order, "0" where there is no edge
pub fn weight_table<W: Weight>(graph: &Graph<W>, options: &DisplayOptions) -> Table {
    let weights = LabelledMatrix::sorted_from_graph(graph, |i, j| graph.weight_at(i, j));
    Table::from_matrix(&weights, |w| match w {
        Some(w) => options.weight(*w),
        None => "0".to_string(),
    })
}

/// Flow carried per ordered pair
pub fn flow_table(result: &MaxFlowResult) -> Table {
    Table::from_matrix(&result.flow_matrix, |f| f.to_string())
}

/// One distance table per recorded step
pub fn snapshot_tables<W: Weight>(history: &SnapshotHistory<W>, options: &DisplayOptions) -> Vec<SnapshotTable> {
    history
        .iter()
        .map(|snapshot| SnapshotTable {
            step: snapshot.step,
            label: match &snapshot.label {
                StepLabel::Initial => "initial".to_string(),
                StepLabel::AfterVertex(v) => v.clone(),
            },
            table: distance_table(&snapshot.distances, options),
        })
        .collect()
}
