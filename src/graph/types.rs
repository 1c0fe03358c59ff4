use serde::Serialize;

use crate::error::{GraphError, Result};

/// Edge weight and path length
pub type Weight = i64;

/// `a + b`, or `WeightOverflow` for the vertex pair the sum belongs to
pub(crate) fn add_weights(a: Weight, b: Weight, pair: (usize, usize)) -> Result<Weight> {
    a.checked_add(b).ok_or(GraphError::WeightOverflow {
        from: pair.0,
        to: pair.1,
    })
}

/// Single-source shortest paths
///
/// `distances[v]` is `None` when `v` is unreachable from `source`;
/// `predecessors[v]` is `None` for the source and for unreachable vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceResult {
    pub source: usize,
    pub distances: Vec<Option<Weight>>,
    pub predecessors: Vec<Option<usize>>,
}

impl DistanceResult {
    pub(crate) fn unreached(vertex_count: usize, source: usize) -> Self {
        let mut distances = vec![None; vertex_count];
        distances[source] = Some(0);
        Self {
            source,
            distances,
            predecessors: vec![None; vertex_count],
        }
    }

    /// Distance from the source to `vertex`
    pub fn distance(&self, vertex: usize) -> Option<Weight> {
        self.distances.get(vertex).copied().flatten()
    }

    /// Reconstruct the path from the source to `target` by following predecessors
    pub fn path_to(&self, target: usize) -> Option<Vec<usize>> {
        self.distance(target)?;

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.predecessors[current]?;
            path.push(current);
            // A predecessor chain longer than the vertex count is not a tree
            if path.len() > self.distances.len() {
                return None;
            }
        }

        path.reverse();
        Some(path)
    }
}

/// A negative cycle found by the detection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NegativeCycle {
    /// Edge `(from, to)` that could still be relaxed after `n - 1` passes
    pub edge: (usize, usize),
    /// Cycle vertices in edge order, first vertex not repeated at the end.
    /// Empty when the predecessor links did not close a cycle.
    pub cycle: Vec<usize>,
}

/// Result of a Bellman-Ford run without repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PathOutcome {
    Paths(DistanceResult),
    NegativeCycle(NegativeCycle),
}

impl PathOutcome {
    pub fn paths(&self) -> Option<&DistanceResult> {
        match self {
            Self::Paths(result) => Some(result),
            Self::NegativeCycle(_) => None,
        }
    }

    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Self::NegativeCycle(_))
    }
}

/// One weight increase applied by the repair loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EdgeRepair {
    pub from: usize,
    pub to: usize,
    pub old_weight: Weight,
    pub new_weight: Weight,
}

/// Shortest paths obtained after cancelling negative cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairedPaths {
    pub paths: DistanceResult,
    pub repairs: Vec<EdgeRepair>,
}

/// All-pairs shortest distances
///
/// Row `u` holds the distances from `u`; `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllPairsResult {
    pub distances: Vec<Vec<Option<Weight>>>,
    pub predecessors: Vec<Vec<Option<usize>>>,
}

impl AllPairsResult {
    pub fn vertex_count(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, from: usize, to: usize) -> Option<Weight> {
        self.distances.get(from)?.get(to).copied().flatten()
    }

    /// Reconstruct the shortest path `from -> ... -> to`
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let row = DistanceResult {
            source: from,
            distances: self.distances.get(from)?.clone(),
            predecessors: self.predecessors.get(from)?.clone(),
        };
        row.path_to(to)
    }
}

/// All-pairs distances obtained after cancelling negative cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairedAllPairs {
    pub distances: AllPairsResult,
    pub repairs: Vec<EdgeRepair>,
}

/// Result of Johnson's algorithm without repair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AllPairsOutcome {
    Distances(AllPairsResult),
    NegativeCycle(NegativeCycle),
}

impl AllPairsOutcome {
    pub fn distances(&self) -> Option<&AllPairsResult> {
        match self {
            Self::Distances(result) => Some(result),
            Self::NegativeCycle(_) => None,
        }
    }

    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Self::NegativeCycle(_))
    }
}

/// Strongly connected component labels
///
/// `labels[v]` is the component id of `v`, in `1..=count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentLabeling {
    pub labels: Vec<usize>,
    pub count: usize,
}

impl ComponentLabeling {
    /// Component id of `vertex`
    pub fn component_of(&self, vertex: usize) -> Option<usize> {
        self.labels.get(vertex).copied()
    }

    /// Members of component `id` in ascending vertex order
    pub fn members(&self, id: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &label)| label == id)
            .map(|(v, _)| v)
            .collect()
    }

    /// All components as `(id, members)` in ascending id order
    pub fn components(&self) -> Vec<(usize, Vec<usize>)> {
        let mut components: Vec<(usize, Vec<usize>)> =
            (1..=self.count).map(|id| (id, Vec::new())).collect();
        for (v, &label) in self.labels.iter().enumerate() {
            components[label - 1].1.push(v);
        }
        components
    }

    /// Id of the component with the most vertices; ties go to the lowest id
    pub fn largest(&self) -> Option<usize> {
        let mut sizes = vec![0usize; self.count + 1];
        for &label in &self.labels {
            sizes[label] += 1;
        }

        let mut best: Option<(usize, usize)> = None;
        for (id, &size) in sizes.iter().enumerate().skip(1) {
            if best.map_or(true, |(_, best_size)| size > best_size) {
                best = Some((id, size));
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_follows_predecessors() {
        let result = DistanceResult {
            source: 0,
            distances: vec![Some(0), Some(2), Some(5), None],
            predecessors: vec![None, Some(0), Some(1), None],
        };

        assert_eq!(result.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(result.path_to(0), Some(vec![0]));
        assert_eq!(result.path_to(3), None);
        assert_eq!(result.path_to(9), None);
    }

    #[test]
    fn test_path_to_stops_on_broken_chain() {
        let result = DistanceResult {
            source: 0,
            distances: vec![Some(0), Some(1), Some(1)],
            predecessors: vec![None, Some(2), Some(1)],
        };
        assert_eq!(result.path_to(1), None);
    }

    #[test]
    fn test_largest_component_prefers_lowest_id_on_tie() {
        let labeling = ComponentLabeling {
            labels: vec![2, 1, 2, 1, 3],
            count: 3,
        };
        assert_eq!(labeling.largest(), Some(1));
        assert_eq!(labeling.members(2), vec![0, 2]);
        assert_eq!(
            labeling.components(),
            vec![(1, vec![1, 3]), (2, vec![0, 2]), (3, vec![4])]
        );
    }

    #[test]
    fn test_component_of() {
        let labeling = ComponentLabeling {
            labels: vec![2, 1, 2],
            count: 2,
        };
        assert_eq!(labeling.component_of(0), Some(2));
        assert_eq!(labeling.component_of(1), Some(1));
        assert_eq!(labeling.component_of(3), None);
    }

    #[test]
    fn test_largest_of_empty_labeling() {
        let labeling = ComponentLabeling {
            labels: Vec::new(),
            count: 0,
        };
        assert_eq!(labeling.largest(), None);
    }

    #[test]
    fn test_all_pairs_path() {
        let result = AllPairsResult {
            distances: vec![vec![Some(0), Some(3)], vec![None, Some(0)]],
            predecessors: vec![vec![None, Some(0)], vec![None, None]],
        };
        assert_eq!(result.path(0, 1), Some(vec![0, 1]));
        assert_eq!(result.path(1, 0), None);
        assert_eq!(result.distance(0, 1), Some(3));
    }
}
