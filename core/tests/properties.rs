use dsm_core::algorithm::graph::mst::MSTEdge;
use dsm_core::validation::correctness::{
    verify_flow, verify_single_source, verify_spanning_tree, verify_triangle_inequality,
};
use dsm_core::{
    all_pairs_shortest_paths, incremental_shortest_paths, maximum_flow, minimum_spanning_tree,
    Algorithm, Dijkstra, Distance, Graph,
};
use proptest::prelude::*;

/// Identifiers deliberately supplied in reverse sorted order
fn names(n: usize) -> Vec<String> {
    (0..n).rev().map(|i| format!("v{}", i)).collect()
}

/// Square matrix of non-negative weights, 0 meaning "no edge"
fn weights(max: i64) -> impl Strategy<Value = Vec<Vec<i64>>> {
    (2usize..7).prop_flat_map(move |n| {
        proptest::collection::vec(
            proptest::collection::vec(prop_oneof![2 => Just(0_i64), 3 => 1..=max], n),
            n,
        )
    })
}

fn symmetric(rows: &[Vec<i64>]) -> Vec<Vec<i64>> {
    let n = rows.len();
    (0..n)
        .map(|i| (0..n).map(|j| rows[i.max(j)][i.min(j)]).collect())
        .collect()
}

fn build(rows: &[Vec<i64>]) -> Graph<i64> {
    Graph::from_rows(names(rows.len()), rows).unwrap()
}

/// Minimum total over every spanning subset of `candidates`
fn brute_force_mst(n: usize, candidates: &[MSTEdge<i64>], graph: &Graph<i64>) -> Option<i64> {
    let m = candidates.len();
    let mut best = None;
    for mask in 0u32..(1 << m) {
        if mask.count_ones() as usize != n - 1 {
            continue;
        }
        let mut parent: Vec<usize> = (0..n).collect();
        fn root(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                x = parent[x];
            }
            x
        }
        let mut total = 0;
        let mut acyclic = true;
        for (k, e) in candidates.iter().enumerate() {
            if mask & (1 << k) == 0 {
                continue;
            }
            let a = root(&mut parent, graph.index_of(&e.source).unwrap());
            let b = root(&mut parent, graph.index_of(&e.target).unwrap());
            if a == b {
                acyclic = false;
                break;
            }
            parent[a] = b;
            total += e.weight;
        }
        if acyclic {
            best = Some(best.map_or(total, |b: i64| b.min(total)));
        }
    }
    best
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_all_pairs_triangle_inequality(rows in weights(20)) {
        let result = all_pairs_shortest_paths(&build(&rows));
        prop_assert!(!result.has_negative_cycle);
        prop_assert!(verify_triangle_inequality(&result).is_ok());
    }

    #[test]
    fn test_all_pairs_idempotent(rows in weights(20)) {
        let first = all_pairs_shortest_paths(&build(&rows));

        // Feed the finite distances back in as direct edges
        let labels = first.distances.labels().to_vec();
        let n = labels.len();
        let again: Vec<Vec<i64>> = (0..n)
            .map(|r| (0..n).map(|c| first.distances.at(r, c).finite().unwrap_or(0)).collect())
            .collect();
        let second = all_pairs_shortest_paths(&Graph::from_rows(labels, &again).unwrap());

        prop_assert_eq!(first.distances, second.distances);
    }

    #[test]
    fn test_single_source_matches_all_pairs(rows in weights(20), pick in any::<prop::sample::Index>()) {
        let graph = build(&rows);
        let ids = names(rows.len());
        let source = pick.get(&ids);

        let all_pairs = all_pairs_shortest_paths(&graph);
        let linear = Dijkstra::new().solve(&graph, source).unwrap();
        let mut heap_solver = Dijkstra::new();
        heap_solver.set_parameter("selection", "binary_heap").unwrap();
        let heap = heap_solver.solve(&graph, source).unwrap();

        prop_assert!(!linear.has_negative_cycle);
        prop_assert!(verify_single_source(&graph, &linear).is_ok());
        prop_assert_eq!(&linear.distances, &heap.distances);
        prop_assert_eq!(&linear.settled_order, &heap.settled_order);
        for target in &ids {
            prop_assert_eq!(linear.distance(target), all_pairs.distance(source, target));
        }
    }

    #[test]
    fn test_spanning_tree_is_minimal(rows in weights(9)) {
        let rows = symmetric(&rows);
        let graph = build(&rows);
        let n = graph.len();
        let result = minimum_spanning_tree(&graph).unwrap();

        prop_assert!(verify_spanning_tree(&graph, &result).is_ok());
        prop_assert!(result.edges.len() < n);

        if result.is_spanning() && result.candidate_edges.len() <= 12 {
            let best = brute_force_mst(n, &result.candidate_edges, &graph);
            prop_assert_eq!(Some(result.total_weight), best);
        }
    }

    #[test]
    fn test_flow_equals_cut(rows in weights(15)) {
        let graph = build(&rows);
        let ids = names(rows.len());
        let result = maximum_flow(&graph, &ids[0], &ids[ids.len() - 1]).unwrap();

        prop_assert!(verify_flow(&graph, &result).is_ok());
        prop_assert_eq!(result.max_flow, result.min_cut.capacity());
        prop_assert_eq!(
            result.max_flow,
            result.augmenting_paths.iter().map(|p| p.bottleneck).sum::<i64>()
        );
        prop_assert!(result.min_cut.reachable.contains(&ids[0]));
        prop_assert!(!result.min_cut.reachable.contains(&ids[ids.len() - 1]));
    }

    #[test]
    fn test_incremental_history_ends_at_final_matrix(rows in weights(50)) {
        let n = rows.len();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|w| format!("{}.25", w)).collect())
            .collect();
        let graph: Graph<f64> = Graph::from_cells(names(n), &cells).unwrap();
        let result = incremental_shortest_paths(&graph);

        prop_assert_eq!(result.history.len(), n + 1);
        prop_assert_eq!(&result.history.last().unwrap().distances, &result.paths.distances);
        prop_assert!(verify_triangle_inequality(&result.paths).is_ok());
    }
}

#[test]
fn test_concurrent_invocations_share_one_graph() {
    let rows = vec![
        vec![0, 3, 0, 7],
        vec![3, 0, 1, 0],
        vec![0, 1, 0, 2],
        vec![7, 0, 2, 0],
    ];
    let graph = build(&rows);
    let expected = all_pairs_shortest_paths(&graph).distances;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| all_pairs_shortest_paths(&graph).distances))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_float_distances_accumulate() {
    let graph: Graph<f64> = Graph::from_cells(
        ["P", "Q", "R"],
        &[
            vec!["0", "0.1", "0"],
            vec!["0", "0", "0.2"],
            vec!["0", "0", "0"],
        ],
    )
    .unwrap();

    let result = incremental_shortest_paths(&graph);
    match result.paths.distance("P", "R") {
        Some(Distance::Finite(d)) => assert!((d - 0.3).abs() < 1e-12),
        other => panic!("unexpected distance {:?}", other),
    }
}
