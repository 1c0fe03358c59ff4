//! Dijkstra's single-source shortest paths for non-negative weights.
//!
//! Vertex-selection form over the dense graph: each round settles the unsettled
//! vertex with the smallest tentative distance, lowest index first on ties.
//! Negative weights are not checked; the result is meaningless with them.

use super::bellman_ford::check_source;
use super::builder::DirectedWeightedGraph;
use super::types::{add_weights, DistanceResult};
use crate::error::Result;

/// Shortest paths from `source` over a graph with no negative edge
pub fn shortest_paths_from(graph: &DirectedWeightedGraph, source: usize) -> Result<DistanceResult> {
    check_source(graph, source)?;

    let n = graph.vertex_count();
    let mut result = DistanceResult::unreached(n, source);
    let mut settled = vec![false; n];

    for _ in 0..n {
        let next = (0..n)
            .filter(|&v| !settled[v])
            .filter_map(|v| result.distances[v].map(|d| (d, v)))
            .min();

        // Everything left is unreachable
        let Some((distance, u)) = next else {
            break;
        };
        settled[u] = true;

        for (v, weight) in graph.successors(u) {
            if settled[v] {
                continue;
            }
            let through = add_weights(distance, weight, (source, v))?;
            if result.distances[v].map_or(true, |current| through < current) {
                result.distances[v] = Some(through);
                result.predecessors[v] = Some(u);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    #[test]
    fn test_pentagon_with_diagonal() {
        // Ring 0 -> 1 -> 2 -> 3 -> 4 -> 0 plus the diagonal 0 -> 2
        let g = DirectedWeightedGraph::from_edges(
            5,
            &[(0, 1, 4), (1, 2, 3), (2, 3, 2), (3, 4, 6), (4, 0, 5), (0, 2, 9)],
        )
        .unwrap();

        let from_0 = shortest_paths_from(&g, 0).unwrap();
        assert_eq!(
            from_0.distances,
            vec![Some(0), Some(4), Some(7), Some(9), Some(15)]
        );
        assert_eq!(from_0.path_to(4), Some(vec![0, 1, 2, 3, 4]));

        let from_3 = shortest_paths_from(&g, 3).unwrap();
        assert_eq!(
            from_3.distances,
            vec![Some(11), Some(15), Some(18), Some(0), Some(6)]
        );
        assert_eq!(from_3.path_to(2), Some(vec![3, 4, 0, 1, 2]));
    }

    #[test]
    fn test_diagonal_wins_when_shorter() {
        let g = DirectedWeightedGraph::from_edges(
            5,
            &[(0, 1, 8), (1, 2, 7), (2, 3, 1), (3, 4, 1), (4, 0, 1), (0, 2, 3)],
        )
        .unwrap();

        let from_0 = shortest_paths_from(&g, 0).unwrap();
        assert_eq!(
            from_0.distances,
            vec![Some(0), Some(8), Some(3), Some(4), Some(5)]
        );
        assert_eq!(from_0.predecessors[2], Some(0));
    }

    #[test]
    fn test_ties_keep_the_first_settled_predecessor() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3 both cost 2
        let g = DirectedWeightedGraph::from_edges(
            4,
            &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)],
        )
        .unwrap();

        let result = shortest_paths_from(&g, 0).unwrap();
        assert_eq!(result.distance(3), Some(2));
        assert_eq!(result.predecessors[3], Some(1));
    }

    #[test]
    fn test_unreachable_and_zero_weights() {
        let g = DirectedWeightedGraph::from_edges(4, &[(0, 1, 0), (2, 3, 1)]).unwrap();
        let result = shortest_paths_from(&g, 0).unwrap();

        assert_eq!(result.distances, vec![Some(0), Some(0), None, None]);
        assert_eq!(result.predecessors, vec![None, Some(0), None, None]);
    }

    #[test]
    fn test_invalid_source() {
        let g = DirectedWeightedGraph::new(3);
        assert!(matches!(
            shortest_paths_from(&g, 3),
            Err(GraphError::InvalidSource { .. })
        ));
    }

    #[test]
    fn test_overflowing_distance_is_an_error() {
        let g = DirectedWeightedGraph::from_edges(3, &[(0, 1, i64::MAX), (1, 2, 1)]).unwrap();
        assert!(matches!(
            shortest_paths_from(&g, 0),
            Err(GraphError::WeightOverflow { from: 0, to: 2 })
        ));
    }
}
