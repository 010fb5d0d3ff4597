//! Ready-made input graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::data_structures::graph::{Graph, GraphError};

/// Five-vertex demonstration matrix for the incremental all-pairs solver
///
/// Every off-diagonal pair carries an edge, so each insertion step has
/// something to improve.
pub fn insertion_demo() -> Result<Graph<f64>, GraphError> {
    Graph::from_cells(
        ["A", "B", "C", "D", "E"],
        &[
            vec!["0", "1", "2", "9", "20"],
            vec!["10", "0", "5", "1", "30"],
            vec!["20", "2", "0", "4", "60"],
            vec!["30", "3", "6", "0", "1"],
            vec!["40", "4", "8", "10", "0"],
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::path_finding::floyd_warshall::incremental_shortest_paths;
    use crate::data_structures::matrix::Distance;

    #[test]
    fn test_insertion_demo_converges() {
        let graph = insertion_demo().unwrap();
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.edge_count(), 20);

        let result = incremental_shortest_paths(&graph);
        assert_eq!(result.history.len(), 6);
        assert!(!result.paths.has_negative_cycle);
        // A -> B -> D -> E
        assert_eq!(result.paths.distance("A", "E"), Some(Distance::Finite(3.0)));
        assert_eq!(
            result.paths.path("A", "E"),
            Some(vec!["A".into(), "B".into(), "D".into(), "E".into()])
        );
    }
}
