//! Shortest path algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod dijkstra;
pub mod floyd_warshall;

pub use self::dijkstra::{
    shortest_path, Dijkstra, PathError, PathResult, ShortestPath, SingleSourceResult,
    VertexSelection,
};
pub use self::floyd_warshall::{
    all_pairs_shortest_paths, incremental_shortest_paths, AllPairsResult, FloydWarshall,
    IncrementalResult,
};
