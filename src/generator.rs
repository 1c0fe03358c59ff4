//! Random digraph generation for experiments.

use std::ops::RangeInclusive;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{GraphError, Result};
use crate::graph::{DirectedWeightedGraph, Weight};

/// Random digraph parameters
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of vertices, at least 2
    pub vertices: usize,
    /// Probability of each ordered pair getting an edge, in `[0, 1]`
    pub probability: f64,
    /// Inclusive range edge weights are drawn from
    pub weights: RangeInclusive<Weight>,
}

/// Generate a digraph where each ordered pair `i -> j` gets an edge with the
/// configured probability, unless `j -> i` was already added
pub fn random_digraph<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<DirectedWeightedGraph> {
    if config.vertices < 2 {
        return Err(GraphError::incorrect_input(format!(
            "a random digraph needs at least 2 vertices, got {}",
            config.vertices
        )));
    }
    if !(0.0..=1.0).contains(&config.probability) {
        return Err(GraphError::incorrect_input(format!(
            "probability must be in [0, 1], got {}",
            config.probability
        )));
    }
    if config.weights.is_empty() {
        return Err(GraphError::incorrect_input(format!(
            "weight range {}..={} is empty",
            config.weights.start(),
            config.weights.end()
        )));
    }

    let n = config.vertices;
    let mut graph = DirectedWeightedGraph::new(n);
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let roll: f64 = rng.gen();
            if roll < config.probability && !graph.has_edge(j, i) {
                let weight = rng.gen_range(config.weights.clone());
                graph.add_edge(i, j, weight)?;
            }
        }
    }

    tracing::debug!(
        "Generated random digraph: {} vertices, {} edges (p = {})",
        n,
        graph.edge_count(),
        config.probability
    );

    Ok(graph)
}

/// Generate a random digraph from a seed, or from entropy when `seed` is `None`
pub fn random_digraph_seeded(config: &GeneratorConfig, seed: Option<u64>) -> Result<DirectedWeightedGraph> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    random_digraph(config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vertices: usize, probability: f64) -> GeneratorConfig {
        GeneratorConfig {
            vertices,
            probability,
            weights: -5..=10,
        }
    }

    #[test]
    fn test_no_antiparallel_edges_and_weights_in_range() {
        let graph = random_digraph_seeded(&config(12, 0.7), Some(7)).unwrap();

        for (from, to, weight) in graph.edges() {
            assert!(!graph.has_edge(to, from), "{} <-> {}", from, to);
            assert!((-5..=10).contains(&weight));
        }
    }

    #[test]
    fn test_probability_bounds() {
        let empty = random_digraph_seeded(&config(6, 0.0), Some(1)).unwrap();
        assert_eq!(empty.edge_count(), 0);

        // Every unordered pair gets exactly one direction
        let full = random_digraph_seeded(&config(6, 1.0), Some(1)).unwrap();
        assert_eq!(full.edge_count(), 15);
    }

    #[test]
    fn test_same_seed_same_graph() {
        let a = random_digraph_seeded(&config(8, 0.4), Some(42)).unwrap();
        let b = random_digraph_seeded(&config(8, 0.4), Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(random_digraph_seeded(&config(1, 0.5), Some(0)).is_err());
        assert!(random_digraph_seeded(&config(4, 1.5), Some(0)).is_err());
        assert!(random_digraph_seeded(&config(4, -0.1), Some(0)).is_err());

        let empty_range = GeneratorConfig {
            vertices: 4,
            probability: 0.5,
            weights: RangeInclusive::new(3, 1),
        };
        assert!(random_digraph_seeded(&empty_range, Some(0)).is_err());
    }
}
