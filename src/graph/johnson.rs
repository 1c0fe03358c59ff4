//! Johnson's algorithm for all-pairs shortest paths.
//!
//! Bellman-Ford from an auxiliary vertex yields potentials `h`, every edge is
//! reweighted to `w + h[from] - h[to] >= 0`, then Dijkstra runs from each vertex
//! and the potentials are subtracted back out.

use super::bellman_ford::BellmanFord;
use super::builder::DirectedWeightedGraph;
use super::dijkstra;
use super::types::{
    add_weights, AllPairsOutcome, AllPairsResult, NegativeCycle, PathOutcome, RepairedAllPairs,
    Weight,
};
use crate::error::{GraphError, Result};

/// Johnson's all-pairs driver around a Bellman-Ford engine
#[derive(Debug, Clone, Copy, Default)]
pub struct Johnson {
    bellman_ford: BellmanFord,
}

impl Johnson {
    pub fn new(bellman_ford: BellmanFord) -> Self {
        Self { bellman_ford }
    }

    /// All-pairs distances, or the negative cycle among the original edges
    pub fn all_pairs(&self, graph: &DirectedWeightedGraph) -> Result<AllPairsOutcome> {
        let augmented = augment(graph)?;
        let auxiliary = graph.vertex_count();

        let potentials = match self.bellman_ford.shortest_paths_from(&augmented, auxiliary)? {
            PathOutcome::Paths(paths) => potentials_from(&paths.distances, auxiliary),
            PathOutcome::NegativeCycle(cycle) => {
                tracing::warn!(
                    "Johnson aborted: negative cycle {:?} among the original edges",
                    cycle.cycle
                );
                return Ok(AllPairsOutcome::NegativeCycle(without_auxiliary(cycle, auxiliary)));
            }
        };

        Ok(AllPairsOutcome::Distances(distances_with(graph, &potentials)?))
    }

    /// All-pairs distances after cancelling negative cycles in `graph`
    ///
    /// Repairs found on the augmented graph are written back to `graph`.
    pub fn all_pairs_repairing(&self, graph: &mut DirectedWeightedGraph) -> Result<RepairedAllPairs> {
        let mut augmented = augment(graph)?;
        let auxiliary = graph.vertex_count();

        let repaired = self
            .bellman_ford
            .shortest_paths_repairing(&mut augmented, auxiliary)?;

        // Auxiliary edges are never on a cycle, so every repair is an original edge
        for repair in &repaired.repairs {
            graph.set_weight(repair.from, repair.to, repair.new_weight);
        }

        let potentials = potentials_from(&repaired.paths.distances, auxiliary);
        Ok(RepairedAllPairs {
            distances: distances_with(graph, &potentials)?,
            repairs: repaired.repairs,
        })
    }
}

/// Johnson's algorithm without repair
pub fn all_pairs_shortest_paths(graph: &DirectedWeightedGraph) -> Result<AllPairsOutcome> {
    Johnson::default().all_pairs(graph)
}

/// Copy `graph` with one extra vertex `n` and a zero-weight edge from it to every vertex
fn augment(graph: &DirectedWeightedGraph) -> Result<DirectedWeightedGraph> {
    let n = graph.vertex_count();
    let mut augmented = DirectedWeightedGraph::new(n + 1);
    for (from, to, weight) in graph.edges() {
        augmented.add_edge(from, to, weight)?;
    }
    for v in 0..n {
        augmented.add_edge(n, v, 0)?;
    }
    Ok(augmented)
}

/// Potentials of the original vertices; the auxiliary vertex reaches all of them
fn potentials_from(distances: &[Option<Weight>], auxiliary: usize) -> Vec<Weight> {
    distances[..auxiliary]
        .iter()
        .map(|d| d.unwrap_or(0))
        .collect()
}

fn without_auxiliary(mut cycle: NegativeCycle, auxiliary: usize) -> NegativeCycle {
    cycle.cycle.retain(|&v| v != auxiliary);
    cycle
}

/// Reweight with `potentials`, run Dijkstra from every vertex, and convert back
fn distances_with(graph: &DirectedWeightedGraph, potentials: &[Weight]) -> Result<AllPairsResult> {
    let n = graph.vertex_count();

    let mut reweighted = DirectedWeightedGraph::new(n);
    for (from, to, weight) in graph.edges() {
        let adjusted = add_weights(weight, potentials[from], (from, to))?
            .checked_sub(potentials[to])
            .ok_or(GraphError::WeightOverflow { from, to })?;
        debug_assert!(adjusted >= 0, "edge {} -> {} reweighted to {}", from, to, adjusted);
        reweighted.add_edge(from, to, adjusted)?;
    }

    let mut distances = Vec::with_capacity(n);
    let mut predecessors = Vec::with_capacity(n);
    for source in 0..n {
        let row = dijkstra::shortest_paths_from(&reweighted, source)?;
        let converted = row
            .distances
            .iter()
            .enumerate()
            .map(|(v, d)| d.map(|d| restore(d, potentials, source, v)).transpose())
            .collect::<Result<Vec<_>>>()?;
        distances.push(converted);
        predecessors.push(row.predecessors);
    }

    tracing::info!(
        "Johnson computed all-pairs distances for {} vertices, {} edges",
        n,
        graph.edge_count()
    );

    Ok(AllPairsResult {
        distances,
        predecessors,
    })
}

/// Undo the reweighting on a distance from `source` to `target`
fn restore(distance: Weight, potentials: &[Weight], source: usize, target: usize) -> Result<Weight> {
    add_weights(distance, potentials[target], (source, target))?
        .checked_sub(potentials[source])
        .ok_or(GraphError::WeightOverflow {
            from: source,
            to: target,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::bellman_ford;

    fn graph(n: usize, edges: &[(usize, usize, Weight)]) -> DirectedWeightedGraph {
        DirectedWeightedGraph::from_edges(n, edges).unwrap()
    }

    #[test]
    fn test_negative_edges_match_hand_computed_matrix() {
        let g = graph(4, &[(0, 1, -2), (1, 2, 3), (2, 0, 4), (0, 3, 5), (3, 2, -1)]);
        let outcome = all_pairs_shortest_paths(&g).unwrap();
        let result = outcome.distances().unwrap();

        assert_eq!(
            result.distances,
            vec![
                vec![Some(0), Some(-2), Some(1), Some(5)],
                vec![Some(7), Some(0), Some(3), Some(12)],
                vec![Some(4), Some(2), Some(0), Some(9)],
                vec![Some(3), Some(1), Some(-1), Some(0)],
            ]
        );
        assert_eq!(result.path(3, 1), Some(vec![3, 2, 0, 1]));
    }

    #[test]
    fn test_unreachable_pairs_stay_unreachable() {
        let g = graph(3, &[(0, 1, -1)]);
        let result = all_pairs_shortest_paths(&g).unwrap();
        let distances = result.distances().unwrap();

        assert_eq!(distances.distance(0, 1), Some(-1));
        assert_eq!(distances.distance(1, 0), None);
        assert_eq!(distances.distance(2, 0), None);
        assert_eq!(distances.distance(2, 2), Some(0));
    }

    #[test]
    fn test_rows_match_bellman_ford() {
        let g = graph(
            5,
            &[(0, 1, 3), (1, 2, -2), (2, 3, 2), (3, 1, 1), (3, 4, -3), (4, 0, 6), (0, 4, 7)],
        );
        let outcome = all_pairs_shortest_paths(&g).unwrap();
        let result = outcome.distances().unwrap();

        for u in 0..5 {
            let single = bellman_ford::shortest_paths_from(&g, u).unwrap();
            assert_eq!(result.distances[u], single.paths().unwrap().distances);
        }
    }

    #[test]
    fn test_negative_cycle_is_reported() {
        let g = graph(3, &[(0, 1, -1), (1, 2, -1), (2, 0, -1)]);
        let outcome = all_pairs_shortest_paths(&g).unwrap();

        match outcome {
            AllPairsOutcome::NegativeCycle(cycle) => {
                assert!(cycle.cycle.iter().all(|&v| v < 3));
                assert!(!cycle.cycle.is_empty());
            }
            AllPairsOutcome::Distances(_) => panic!("expected a negative cycle"),
        }
    }

    #[test]
    fn test_repair_writes_back_to_graph() {
        let mut g = graph(3, &[(0, 1, -1), (1, 2, -1), (2, 0, -1)]);
        let repaired = Johnson::default().all_pairs_repairing(&mut g).unwrap();

        assert!(!repaired.repairs.is_empty());
        assert!(!all_pairs_shortest_paths(&g).unwrap().is_negative_cycle());
        for v in 0..3 {
            assert_eq!(repaired.distances.distance(v, v), Some(0));
        }
    }

    #[test]
    fn test_empty_graph() {
        let g = DirectedWeightedGraph::new(0);
        let outcome = all_pairs_shortest_paths(&g).unwrap();
        assert_eq!(outcome.distances().unwrap().vertex_count(), 0);
    }

    #[test]
    fn test_overflowing_potentials_are_an_error() {
        let g = graph(3, &[(0, 1, Weight::MIN + 1), (1, 2, -5)]);
        let err = all_pairs_shortest_paths(&g).unwrap_err();
        assert!(matches!(err, GraphError::WeightOverflow { .. }));
    }
}
