//! Graph algorithms engine
//!
//! Stateless solvers over dense, labelled adjacency matrices:
//!
//! - all-pairs shortest paths (Floyd–Warshall), with an incremental mode
//!   that records the distance matrix after every processed vertex
//! - single-source shortest paths (Dijkstra) with path reconstruction
//! - minimum spanning trees (Kruskal)
//! - maximum flow and minimum cut (Edmonds–Karp)
//!
//! A [`Graph`] is built once and read by shared reference; every invocation
//! allocates its own working state, so independent calls may run on
//! separate threads without coordination.
//!
//! ```
//! use dsm_core::{shortest_path, Distance, Graph};
//!
//! let graph = Graph::builder(["A", "B", "C"])?
//!     .edge("A", "B", 1)?
//!     .edge("B", "C", 2)?
//!     .edge("A", "C", 10)?
//!     .build();
//!
//! let result = shortest_path(&graph, "A", "C")?;
//! assert_eq!(result.path.vertices, ["A", "B", "C"]);
//! assert_eq!(result.path.length, Distance::Finite(3));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod execution;
pub mod presentation;
pub mod samples;
pub mod validation;

pub use crate::algorithm::*;
pub use crate::config::{ConfigError, EngineConfig};
pub use crate::data_structures::{Distance, Graph, GraphBuilder, GraphError, LabelledMatrix, Weight};
pub use crate::execution::{HistoryError, Snapshot, SnapshotHistory, StepLabel};
pub use crate::presentation::DisplayOptions;
pub use crate::validation::CorrectnessError;
