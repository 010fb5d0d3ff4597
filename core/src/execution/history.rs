//! Snapshot history for incremental algorithm runs
//!
//! The incremental all-pairs solver records the full distance matrix once
//! before any vertex is processed and once after each vertex. The history is
//! materialised in full and handed to the consumer, who needs random access
//! across steps to replay the convergence.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_structures::matrix::{Distance, LabelledMatrix};

/// Error types for snapshot history lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Invalid snapshot index: {index} (history has {len} snapshots)")]
    InvalidIndex { index: usize, len: usize },

    #[error("No snapshot recorded after vertex: {0}")]
    UnknownStep(String),
}

/// What a snapshot was taken after
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "vertex")]
pub enum StepLabel {
    /// Direct edges only, before any intermediate vertex
    Initial,
    /// After relaxing every pair through this vertex
    AfterVertex(String),
}

impl StepLabel {
    /// Vertex processed in this step, if any
    pub fn vertex(&self) -> Option<&str> {
        match self {
            StepLabel::Initial => None,
            StepLabel::AfterVertex(v) => Some(v),
        }
    }
}

/// Immutable distance matrix captured at one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<W> {
    /// Position in the history, starting at 0 for the initial state
    pub step: usize,
    pub label: StepLabel,
    pub distances: LabelledMatrix<Distance<W>>,
}

/// Ordered, finite sequence of snapshots produced by one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHistory<W> {
    snapshots: Vec<Snapshot<W>>,
}

impl<W: Clone> SnapshotHistory<W> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
        }
    }

    /// Appends the next snapshot; steps are numbered in recording order
    pub(crate) fn record(&mut self, label: StepLabel, distances: LabelledMatrix<Distance<W>>) {
        let step = self.snapshots.len();
        self.snapshots.push(Snapshot {
            step,
            label,
            distances,
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot at a given step
    pub fn get(&self, index: usize) -> Result<&Snapshot<W>, HistoryError> {
        self.snapshots.get(index).ok_or(HistoryError::InvalidIndex {
            index,
            len: self.snapshots.len(),
        })
    }

    /// Snapshot taken after processing `vertex`
    pub fn after_vertex(&self, vertex: &str) -> Result<&Snapshot<W>, HistoryError> {
        self.snapshots
            .iter()
            .find(|s| s.label.vertex() == Some(vertex))
            .ok_or_else(|| HistoryError::UnknownStep(vertex.to_owned()))
    }

    /// State before any vertex was processed
    pub fn initial(&self) -> Option<&Snapshot<W>> {
        self.snapshots.first()
    }

    /// State after the last processed vertex
    pub fn last(&self) -> Option<&Snapshot<W>> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot<W>> {
        self.snapshots.iter()
    }

    /// Labels in recording order
    pub fn labels(&self) -> impl Iterator<Item = &StepLabel> + '_ {
        self.snapshots.iter().map(|s| &s.label)
    }
}

impl<'a, W> IntoIterator for &'a SnapshotHistory<W> {
    type Item = &'a Snapshot<W>;
    type IntoIter = std::slice::Iter<'a, Snapshot<W>>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(value: i64) -> LabelledMatrix<Distance<i64>> {
        LabelledMatrix::from_fn(vec!["A".into()], |_, _| Distance::Finite(value))
    }

    #[test]
    fn test_recording_and_lookup() {
        let mut history = SnapshotHistory::with_capacity(3);
        history.record(StepLabel::Initial, matrix(0));
        history.record(StepLabel::AfterVertex("B".into()), matrix(1));
        history.record(StepLabel::AfterVertex("A".into()), matrix(2));

        assert_eq!(history.len(), 3);
        assert_eq!(history.initial().unwrap().label, StepLabel::Initial);
        assert_eq!(history.last().unwrap().step, 2);
        assert_eq!(history.after_vertex("B").unwrap().step, 1);
        assert_eq!(
            history.get(2).unwrap().distances.get("A", "A"),
            Some(&Distance::Finite(2))
        );
        assert_eq!(
            history.labels().filter_map(StepLabel::vertex).collect::<Vec<_>>(),
            vec!["B", "A"]
        );
        assert_eq!((&history).into_iter().count(), 3);
    }

    #[test]
    fn test_lookup_errors() {
        let history: SnapshotHistory<i64> = SnapshotHistory::with_capacity(0);

        assert!(history.is_empty());
        assert_eq!(
            history.get(0).unwrap_err(),
            HistoryError::InvalidIndex { index: 0, len: 0 }
        );
        assert_eq!(
            history.after_vertex("Z").unwrap_err(),
            HistoryError::UnknownStep("Z".into())
        );
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&StepLabel::AfterVertex("C".into())).unwrap();
        assert_eq!(json, r#"{"kind":"after_vertex","vertex":"C"}"#);

        let json = serde_json::to_string(&StepLabel::Initial).unwrap();
        assert_eq!(json, r#"{"kind":"initial"}"#);
    }
}
