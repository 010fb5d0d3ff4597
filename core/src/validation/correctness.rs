//! Result Verification
//!
//! Independent checks of the properties each solver's output must satisfy.
//! The solvers call these when their `verify_result` parameter is set; the
//! integration tests call them directly on randomised inputs.
//!
//! | Result | Checked properties |
//! |---|---|
//! | all-pairs | triangle inequality for every triple |
//! | single-source | reconstructed path weight equals reported distance |
//! | spanning tree | edges exist, no cycle, total weight, size on connected input |
//! | maximum flow | capacity bound, conservation, flow equals cut capacity |
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use log::debug;
use thiserror::Error;

use crate::algorithm::graph::max_flow::MaxFlowResult;
use crate::algorithm::graph::mst::MSTResult;
use crate::algorithm::path_finding::dijkstra::SingleSourceResult;
use crate::algorithm::path_finding::floyd_warshall::AllPairsResult;
use crate::data_structures::disjoint_set::DisjointSet;
use crate::data_structures::graph::{Graph, Weight};
use crate::data_structures::matrix::Distance;

/// Relative tolerance for float comparisons
const EPSILON: f64 = 1e-9;

/// A violated result property
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CorrectnessError {
    #[error("Triangle inequality violated: d({from}, {to}) = {direct} exceeds {via_length} through {via}")]
    TriangleInequality {
        from: String,
        via: String,
        to: String,
        direct: String,
        via_length: String,
    },

    #[error("Path to {destination} weighs {found}, reported distance is {expected}")]
    PathLength {
        destination: String,
        expected: String,
        found: String,
    },

    #[error("Edge {from} -> {to} is not in the graph")]
    MissingEdge { from: String, to: String },

    #[error("Tree edge {from} - {to} closes a cycle")]
    CycleFormed { from: String, to: String },

    #[error("Tree weight is {found}, edges sum to {expected}")]
    TotalWeight { expected: String, found: String },

    #[error("Connected graph needs {expected} tree edges, found {found}")]
    TreeSize { expected: usize, found: usize },

    #[error("Flow {flow} on {from} -> {to} outside [0, {capacity}]")]
    CapacityBound {
        from: String,
        to: String,
        flow: i64,
        capacity: i64,
    },

    #[error("Flow not conserved at {vertex}: inflow {inflow}, outflow {outflow}")]
    Conservation {
        vertex: String,
        inflow: i128,
        outflow: i128,
    },

    #[error("Maximum flow {flow} differs from cut capacity {cut}")]
    CutMismatch { flow: i64, cut: i128 },
}

fn exceeds<W: Weight>(value: W, bound: W) -> bool {
    if W::INTEGRAL {
        value > bound
    } else {
        let (v, b) = (value.to_f64(), bound.to_f64());
        v - b > EPSILON * b.abs().max(1.0)
    }
}

fn differs<W: Weight>(a: W, b: W) -> bool {
    exceeds(a, b) || exceeds(b, a)
}

/// Every finite two-hop route is at least as long as the direct distance
pub fn verify_triangle_inequality<W: Weight>(result: &AllPairsResult<W>) -> Result<(), CorrectnessError> {
    let d = &result.distances;
    let n = d.order();

    for i in 0..n {
        for k in 0..n {
            let to_k = *d.at(i, k);
            if !to_k.is_finite() {
                continue;
            }
            for j in 0..n {
                let Some(via) = to_k.through(*d.at(k, j)) else {
                    continue;
                };
                let violated = match *d.at(i, j) {
                    Distance::Finite(direct) => exceeds(direct, via),
                    Distance::Unreachable => true,
                };
                if violated {
                    let labels = d.labels();
                    return Err(CorrectnessError::TriangleInequality {
                        from: labels[i].clone(),
                        via: labels[k].clone(),
                        to: labels[j].clone(),
                        direct: d.at(i, j).to_string(),
                        via_length: via.to_string(),
                    });
                }
            }
        }
    }

    debug!("triangle inequality holds over {} vertices", n);
    Ok(())
}

/// Every reconstructible path weighs exactly its reported distance
pub fn verify_single_source(graph: &Graph<i64>, result: &SingleSourceResult) -> Result<(), CorrectnessError> {
    for (destination, distance) in &result.distances {
        let Distance::Finite(expected) = *distance else {
            continue;
        };
        let Ok(path) = result.path_to(destination) else {
            continue;
        };
        if !path.exists() {
            continue;
        }

        let mut found = 0_i64;
        for hop in path.vertices.windows(2) {
            let weight = graph
                .weight(&hop[0], &hop[1])
                .ok_or_else(|| CorrectnessError::MissingEdge {
                    from: hop[0].clone(),
                    to: hop[1].clone(),
                })?;
            found = found.saturating_add(weight);
        }

        if found != expected {
            return Err(CorrectnessError::PathLength {
                destination: destination.clone(),
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
    }

    Ok(())
}

/// Tree edges exist with their weights, form no cycle and sum to the total
///
/// When the positive-weight lower triangle connects every vertex the tree
/// must also have exactly |V|-1 edges. Minimality is not checked here.
pub fn verify_spanning_tree<W: Weight>(graph: &Graph<W>, result: &MSTResult<W>) -> Result<(), CorrectnessError> {
    let n = graph.len();
    let mut forest = DisjointSet::new(n);
    let mut sum = W::zero();

    for edge in &result.edges {
        let missing = || CorrectnessError::MissingEdge {
            from: edge.source.clone(),
            to: edge.target.clone(),
        };
        let i = graph.index_of(&edge.source).ok_or_else(missing)?;
        let j = graph.index_of(&edge.target).ok_or_else(missing)?;
        match graph.weight_at(i, j) {
            Some(w) if !differs(w, edge.weight) => {}
            _ => return Err(missing()),
        }

        if !forest.union(i, j) {
            return Err(CorrectnessError::CycleFormed {
                from: edge.source.clone(),
                to: edge.target.clone(),
            });
        }
        sum = sum.combine(edge.weight);
    }

    if differs(sum, result.total_weight) {
        return Err(CorrectnessError::TotalWeight {
            expected: sum.to_string(),
            found: result.total_weight.to_string(),
        });
    }

    let mut reachability = DisjointSet::new(n);
    for i in 0..n {
        for j in 0..i {
            if graph.weight_at(i, j).map_or(false, |w| w > W::zero()) {
                reachability.union(i, j);
            }
        }
    }
    if reachability.components() == 1 && result.edges.len() + 1 != n {
        return Err(CorrectnessError::TreeSize {
            expected: n - 1,
            found: result.edges.len(),
        });
    }

    Ok(())
}

/// Capacity bounds, conservation and max-flow/min-cut equality
pub fn verify_flow(graph: &Graph<i64>, result: &MaxFlowResult) -> Result<(), CorrectnessError> {
    let flows = &result.flow_matrix;
    let labels = flows.labels();
    let n = flows.order();
    let capacity = |r: usize, c: usize| {
        graph
            .weight(&labels[r], &labels[c])
            .unwrap_or(0)
            .max(0)
    };

    let mut inflow = vec![0_i128; n];
    let mut outflow = vec![0_i128; n];
    for r in 0..n {
        for c in 0..n {
            let flow = *flows.at(r, c);
            let cap = capacity(r, c);
            if flow < 0 || flow > cap {
                return Err(CorrectnessError::CapacityBound {
                    from: labels[r].clone(),
                    to: labels[c].clone(),
                    flow,
                    capacity: cap,
                });
            }
            outflow[r] += i128::from(flow);
            inflow[c] += i128::from(flow);
        }
    }

    for v in 0..n {
        if labels[v] == result.source || labels[v] == result.sink {
            continue;
        }
        if inflow[v] != outflow[v] {
            return Err(CorrectnessError::Conservation {
                vertex: labels[v].clone(),
                inflow: inflow[v],
                outflow: outflow[v],
            });
        }
    }

    let cut: i128 = result.min_cut.edges.iter().map(|e| i128::from(e.capacity)).sum();
    if cut != i128::from(result.max_flow) {
        return Err(CorrectnessError::CutMismatch {
            flow: result.max_flow,
            cut,
        });
    }

    if let Some(s) = flows.position(&result.source) {
        let net = outflow[s] - inflow[s];
        if net != i128::from(result.max_flow) {
            return Err(CorrectnessError::CutMismatch {
                flow: result.max_flow,
                cut: net,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::max_flow::maximum_flow;
    use crate::algorithm::graph::mst::{minimum_spanning_tree, MSTEdge};
    use crate::algorithm::path_finding::dijkstra::Dijkstra;
    use crate::algorithm::path_finding::floyd_warshall::all_pairs_shortest_paths;
    use crate::data_structures::matrix::LabelledMatrix;

    fn triangle() -> Graph<i64> {
        Graph::builder(["A", "B", "C"])
            .unwrap()
            .undirected("A", "B", 1)
            .unwrap()
            .undirected("B", "C", 2)
            .unwrap()
            .undirected("A", "C", 10)
            .unwrap()
            .build()
    }

    #[test]
    fn test_converged_matrix_passes() {
        let result = all_pairs_shortest_paths(&triangle());
        assert!(verify_triangle_inequality(&result).is_ok());
    }

    #[test]
    fn test_unconverged_matrix_fails() {
        let mut result = all_pairs_shortest_paths(&triangle());
        let labels = result.distances.labels().to_vec();
        // Put back the direct A -> C weight
        result.distances = LabelledMatrix::from_fn(labels, |r, c| match (r, c) {
            (0, 2) | (2, 0) => Distance::Finite(10),
            _ => *result.distances.at(r, c),
        });

        let err = verify_triangle_inequality(&result).unwrap_err();
        assert!(matches!(err, CorrectnessError::TriangleInequality { .. }));
    }

    #[test]
    fn test_single_source_paths() {
        let graph = triangle();
        let mut result = Dijkstra::new().solve(&graph, "A").unwrap();
        assert!(verify_single_source(&graph, &result).is_ok());

        result.distances.insert("C".into(), Distance::Finite(4));
        assert_eq!(
            verify_single_source(&graph, &result).unwrap_err(),
            CorrectnessError::PathLength {
                destination: "C".into(),
                expected: "4".into(),
                found: "3".into(),
            }
        );
    }

    #[test]
    fn test_spanning_tree_checks() {
        let graph = triangle();
        let mut result = minimum_spanning_tree(&graph).unwrap();
        assert!(verify_spanning_tree(&graph, &result).is_ok());

        result.total_weight = 7;
        assert!(matches!(
            verify_spanning_tree(&graph, &result),
            Err(CorrectnessError::TotalWeight { .. })
        ));

        result.edges.pop();
        result.total_weight = 1;
        assert_eq!(
            verify_spanning_tree(&graph, &result).unwrap_err(),
            CorrectnessError::TreeSize { expected: 2, found: 1 }
        );

        result.edges.push(MSTEdge {
            source: "A".into(),
            target: "B".into(),
            weight: 1,
        });
        result.total_weight = 2;
        assert!(matches!(
            verify_spanning_tree(&graph, &result),
            Err(CorrectnessError::CycleFormed { .. })
        ));
    }

    #[test]
    fn test_flow_checks() {
        let graph = Graph::builder(["S", "M", "T"])
            .unwrap()
            .edge("S", "M", 4)
            .unwrap()
            .edge("M", "T", 3)
            .unwrap()
            .build();
        let mut result = maximum_flow(&graph, "S", "T").unwrap();
        assert!(verify_flow(&graph, &result).is_ok());

        result.flow_matrix = result
            .flow_matrix
            .map(|&f| if f == 3 { 4 } else { f });
        assert!(matches!(
            verify_flow(&graph, &result),
            Err(CorrectnessError::CapacityBound { .. })
        ));
    }
}
