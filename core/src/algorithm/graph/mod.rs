//! Spanning tree and network flow algorithms
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod max_flow;
pub mod mst;

pub use self::max_flow::{
    maximum_flow, AugmentingPath, CutEdge, EdmondsKarp, FlowEdge, FlowError, MaxFlowResult,
    MinCut,
};
pub use self::mst::{minimum_spanning_tree, Kruskal, MSTEdge, MSTError, MSTResult};
