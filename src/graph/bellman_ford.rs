use super::builder::DirectedWeightedGraph;
use super::types::{
    add_weights, DistanceResult, EdgeRepair, NegativeCycle, PathOutcome, RepairedPaths, Weight,
};
use crate::config::DEFAULT_MAX_REPAIR_ROUNDS;
use crate::error::{GraphError, Result};

/// Single-source Bellman-Ford with negative cycle detection and optional repair
#[derive(Debug, Clone, Copy)]
pub struct BellmanFord {
    max_repair_rounds: usize,
}

impl Default for BellmanFord {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REPAIR_ROUNDS)
    }
}

impl BellmanFord {
    /// Create an engine that gives up repairing after `max_repair_rounds` weight changes
    pub fn new(max_repair_rounds: usize) -> Self {
        Self { max_repair_rounds }
    }

    /// Shortest paths from `source`, or the negative cycle reachable from it
    pub fn shortest_paths_from(
        &self,
        graph: &DirectedWeightedGraph,
        source: usize,
    ) -> Result<PathOutcome> {
        check_source(graph, source)?;

        let result = relax_all(graph, source)?;
        match find_violation(graph, &result)? {
            None => Ok(PathOutcome::Paths(result)),
            Some(edge) => {
                let cycle = trace_cycle(&result.predecessors, edge);
                tracing::warn!(
                    "Negative cycle reachable from {}: edge {} -> {} still relaxes (cycle {:?})",
                    source,
                    edge.0,
                    edge.1,
                    cycle
                );
                Ok(PathOutcome::NegativeCycle(NegativeCycle { edge, cycle }))
            }
        }
    }

    /// Shortest paths from `source`, cancelling reachable negative cycles first
    ///
    /// Each round traces one cycle and raises its most negative edge by the
    /// violation slack, mutating `graph`. Fails with `RepairDidNotConverge`
    /// once `max_repair_rounds` weight changes did not remove every cycle.
    pub fn shortest_paths_repairing(
        &self,
        graph: &mut DirectedWeightedGraph,
        source: usize,
    ) -> Result<RepairedPaths> {
        check_source(graph, source)?;

        let mut repairs: Vec<EdgeRepair> = Vec::new();
        loop {
            let result = relax_all(graph, source)?;
            let Some(edge) = find_violation(graph, &result)? else {
                if !repairs.is_empty() {
                    tracing::info!(
                        "Negative cycles from {} cancelled after {} repairs",
                        source,
                        repairs.len()
                    );
                }
                return Ok(RepairedPaths {
                    paths: result,
                    repairs,
                });
            };

            if repairs.len() >= self.max_repair_rounds {
                return Err(GraphError::RepairDidNotConverge {
                    rounds: repairs.len(),
                });
            }

            let cycle = trace_cycle(&result.predecessors, edge);
            if cycle.is_empty() {
                tracing::warn!(
                    "Could not trace a cycle through {} -> {}",
                    edge.0,
                    edge.1
                );
                return Err(GraphError::RepairDidNotConverge {
                    rounds: repairs.len(),
                });
            }

            let repair = cancel_cycle(graph, &result, edge, &cycle)?;
            tracing::warn!(
                "Repair round {}: cycle {:?}, edge {} -> {} weight {} -> {}",
                repairs.len() + 1,
                cycle,
                repair.from,
                repair.to,
                repair.old_weight,
                repair.new_weight
            );
            repairs.push(repair);
        }
    }
}

/// Bellman-Ford from `source` without repair
pub fn shortest_paths_from(graph: &DirectedWeightedGraph, source: usize) -> Result<PathOutcome> {
    BellmanFord::default().shortest_paths_from(graph, source)
}

pub(crate) fn check_source(graph: &DirectedWeightedGraph, source: usize) -> Result<()> {
    if source < graph.vertex_count() {
        Ok(())
    } else {
        Err(GraphError::InvalidSource {
            vertex: source,
            vertex_count: graph.vertex_count(),
        })
    }
}

/// Distance through `from` to `to` if it improves on the current one
fn improves(result: &DistanceResult, from: usize, to: usize, weight: Weight) -> Result<Option<Weight>> {
    let Some(reached) = result.distances[from] else {
        return Ok(None);
    };
    let through = add_weights(reached, weight, (result.source, to))?;
    Ok(match result.distances[to] {
        Some(current) if current <= through => None,
        _ => Some(through),
    })
}

/// Run the `n - 1` relaxation passes
fn relax_all(graph: &DirectedWeightedGraph, source: usize) -> Result<DistanceResult> {
    let n = graph.vertex_count();
    let mut result = DistanceResult::unreached(n, source);

    for pass in 0..n.saturating_sub(1) {
        let mut updated = false;

        for (from, to, weight) in graph.edges() {
            if let Some(distance) = improves(&result, from, to, weight)? {
                result.distances[to] = Some(distance);
                result.predecessors[to] = Some(from);
                updated = true;
            }
        }

        // Nothing changes after a quiet pass
        if !updated {
            tracing::debug!("Bellman-Ford from {} settled after {} passes", source, pass + 1);
            break;
        }
    }

    Ok(result)
}

/// First edge, in ascending order, that can still be relaxed
fn find_violation(graph: &DirectedWeightedGraph, result: &DistanceResult) -> Result<Option<(usize, usize)>> {
    for (from, to, weight) in graph.edges() {
        if improves(result, from, to, weight)?.is_some() {
            return Ok(Some((from, to)));
        }
    }
    Ok(None)
}

/// Follow predecessor links back from the violating edge until a vertex repeats
///
/// Returns the cycle in forward edge order, or an empty vector when the links
/// run out before closing a cycle.
fn trace_cycle(predecessors: &[Option<usize>], edge: (usize, usize)) -> Vec<usize> {
    let (from, to) = edge;
    let mut links = predecessors.to_vec();
    links[to] = Some(from);

    let mut seen = vec![false; links.len()];
    let mut current = to;
    while !seen[current] {
        seen[current] = true;
        match links[current] {
            Some(prev) => current = prev,
            None => return Vec::new(),
        }
    }

    let start = current;
    let mut cycle = vec![start];
    let mut vertex = links[start];
    while let Some(v) = vertex {
        if v == start {
            break;
        }
        cycle.push(v);
        vertex = links[v];
    }

    tracing::trace!("Traced cycle {:?} from edge {} -> {}", cycle, from, to);

    cycle.reverse();
    cycle
}

/// Raise the most negative edge on `cycle` by the slack of the violating edge
fn cancel_cycle(
    graph: &mut DirectedWeightedGraph,
    result: &DistanceResult,
    edge: (usize, usize),
    cycle: &[usize],
) -> Result<EdgeRepair> {
    let cycle_edges: Vec<(usize, usize, Weight)> = cycle
        .iter()
        .zip(cycle.iter().cycle().skip(1))
        .filter_map(|(&a, &b)| graph.weight(a, b).map(|w| (a, b, w)))
        .collect();

    let (from, to) = edge;
    let edge_weight = graph.weight(from, to).unwrap_or(0);
    let overflow = GraphError::WeightOverflow { from, to };
    let slack = match (result.distances[from], result.distances[to]) {
        (Some(df), Some(dt)) => dt
            .checked_sub(add_weights(df, edge_weight, edge)?)
            .ok_or(overflow)?,
        // The target was never reached; fall back to the cycle's deficit
        _ => cycle_edges
            .iter()
            .try_fold(0, |total, &(a, b, w)| add_weights(total, w, (a, b)))?
            .checked_neg()
            .ok_or(overflow)?,
    }
    .max(1);

    let (a, b, old_weight) = cycle_edges
        .iter()
        .copied()
        .fold(None, |best: Option<(usize, usize, Weight)>, e| match best {
            Some(b) if b.2 <= e.2 => Some(b),
            _ => Some(e),
        })
        .unwrap_or((from, to, edge_weight));

    let new_weight = add_weights(old_weight, slack, (a, b))?;
    graph.set_weight(a, b, new_weight);

    Ok(EdgeRepair {
        from: a,
        to: b,
        old_weight,
        new_weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize, Weight)]) -> DirectedWeightedGraph {
        DirectedWeightedGraph::from_edges(n, edges).unwrap()
    }

    #[test]
    fn test_negative_edges_without_cycle() {
        let g = graph(4, &[(0, 1, 4), (0, 2, 5), (2, 1, -3), (1, 3, 2)]);
        let outcome = shortest_paths_from(&g, 0).unwrap();
        let paths = outcome.paths().unwrap();

        assert_eq!(paths.distances, vec![Some(0), Some(2), Some(5), Some(4)]);
        assert_eq!(paths.path_to(3), Some(vec![0, 2, 1, 3]));
        assert_eq!(paths.predecessors[0], None);
    }

    #[test]
    fn test_unreachable_vertices_stay_unreached() {
        let g = graph(3, &[(1, 2, 1)]);
        let outcome = shortest_paths_from(&g, 0).unwrap();
        let paths = outcome.paths().unwrap();

        assert_eq!(paths.distances, vec![Some(0), None, None]);
        assert_eq!(paths.predecessors, vec![None, None, None]);
    }

    #[test]
    fn test_detects_negative_triangle() {
        let g = graph(3, &[(0, 1, -1), (1, 2, -1), (2, 0, -1)]);
        let outcome = shortest_paths_from(&g, 0).unwrap();

        match outcome {
            PathOutcome::NegativeCycle(cycle) => {
                let mut vertices = cycle.cycle.clone();
                vertices.sort_unstable();
                assert_eq!(vertices, vec![0, 1, 2]);
            }
            PathOutcome::Paths(_) => panic!("expected a negative cycle"),
        }
    }

    #[test]
    fn test_unreachable_negative_cycle_is_ignored() {
        // 1 <-> 2 is negative but 0 cannot reach it
        let g = graph(3, &[(1, 2, -4), (2, 1, 1)]);
        let outcome = shortest_paths_from(&g, 0).unwrap();
        assert!(!outcome.is_negative_cycle());
    }

    #[test]
    fn test_invalid_source() {
        let g = graph(2, &[(0, 1, 1)]);
        let err = shortest_paths_from(&g, 2).unwrap_err();
        assert!(matches!(
            err,
            GraphError::InvalidSource {
                vertex: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn test_single_vertex() {
        let g = DirectedWeightedGraph::new(1);
        let outcome = shortest_paths_from(&g, 0).unwrap();
        assert_eq!(outcome.paths().unwrap().distances, vec![Some(0)]);
    }

    #[test]
    fn test_repair_cancels_negative_cycle() {
        let mut g = graph(3, &[(0, 1, -1), (1, 2, -1), (2, 0, -1)]);
        let repaired = BellmanFord::default()
            .shortest_paths_repairing(&mut g, 0)
            .unwrap();

        assert!(!repaired.repairs.is_empty());
        let total: Weight = g.edges().map(|(_, _, w)| w).sum();
        assert!(total >= 0, "cycle weight {} is still negative", total);
        assert_eq!(repaired.paths.distance(0), Some(0));
        assert!(!shortest_paths_from(&g, 0).unwrap().is_negative_cycle());
    }

    #[test]
    fn test_repair_leaves_cycle_free_graph_alone() {
        let mut g = graph(3, &[(0, 1, 2), (1, 2, -1)]);
        let before = g.clone();
        let repaired = BellmanFord::default()
            .shortest_paths_repairing(&mut g, 0)
            .unwrap();

        assert!(repaired.repairs.is_empty());
        assert_eq!(g, before);
        assert_eq!(repaired.paths.distances, vec![Some(0), Some(2), Some(1)]);
    }

    #[test]
    fn test_repair_gives_up_after_round_limit() {
        let mut g = graph(3, &[(0, 1, -50), (1, 2, -50), (2, 0, -50)]);
        let err = BellmanFord::new(0)
            .shortest_paths_repairing(&mut g, 0)
            .unwrap_err();
        assert!(matches!(err, GraphError::RepairDidNotConverge { rounds: 0 }));
    }

    #[test]
    fn test_trace_cycle_through_violating_edge() {
        // 0 -> 1 -> 2 -> 1, violation on 2 -> 1
        let predecessors = vec![None, Some(0), Some(1)];
        let cycle = trace_cycle(&predecessors, (2, 1));
        assert_eq!(cycle, vec![2, 1]);
    }

    #[test]
    fn test_path_longer_than_i64_is_an_error() {
        let g = graph(3, &[(0, 1, Weight::MAX - 1), (1, 2, 5)]);
        let err = shortest_paths_from(&g, 0).unwrap_err();
        assert!(matches!(err, GraphError::WeightOverflow { from: 0, to: 2 }));

        // The same edges are fine from a source that only sees the short one
        let from_1 = shortest_paths_from(&g, 1).unwrap();
        assert_eq!(from_1.paths().unwrap().distance(2), Some(5));
    }
}
