//! Graph model and the supporting structures the solvers share
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod disjoint_set;
pub mod graph;
pub mod matrix;
pub mod priority_queue;

pub use self::disjoint_set::DisjointSet;
pub use self::graph::{Graph, GraphBuilder, GraphError, Weight};
pub use self::matrix::{Distance, LabelledMatrix};
pub use self::priority_queue::IndexedMinQueue;
