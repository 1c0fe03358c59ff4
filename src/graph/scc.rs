//! Kosaraju's strongly connected components
//!
//! Both passes run on explicit stacks, visiting vertices and their neighbours
//! in ascending index order.

use super::builder::DirectedWeightedGraph;
use super::types::ComponentLabeling;

const UNLABELED: usize = 0;

/// Label every vertex with a component id in `1..=count`
pub fn find_components(graph: &DirectedWeightedGraph) -> ComponentLabeling {
    let n = graph.vertex_count();

    let forward: Vec<Vec<usize>> = (0..n)
        .map(|v| graph.successors(v).map(|(to, _)| to).collect())
        .collect();

    let mut transpose: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (from, outs) in forward.iter().enumerate() {
        for &to in outs {
            transpose[to].push(from);
        }
    }

    let mut order = Vec::with_capacity(n);
    let mut seen = vec![false; n];
    for start in 0..n {
        if !seen[start] {
            finish_order(start, &forward, &mut seen, &mut order);
        }
    }

    let mut labels = vec![UNLABELED; n];
    let mut count = 0;
    for &root in order.iter().rev() {
        if labels[root] != UNLABELED {
            continue;
        }

        count += 1;
        labels[root] = count;
        let mut stack = vec![root];
        while let Some(v) = stack.pop() {
            for &p in &transpose[v] {
                if labels[p] == UNLABELED {
                    labels[p] = count;
                    stack.push(p);
                }
            }
        }
    }

    tracing::debug!("Found {} strongly connected components in {} vertices", count, n);

    ComponentLabeling { labels, count }
}

/// Depth-first traversal from `start`, appending vertices as they finish
fn finish_order(start: usize, edges: &[Vec<usize>], seen: &mut [bool], order: &mut Vec<usize>) {
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    seen[start] = true;

    while let Some((v, next)) = stack.pop() {
        if let Some(&to) = edges[v].get(next) {
            stack.push((v, next + 1));
            if !seen[to] {
                seen[to] = true;
                stack.push((to, 0));
            }
            continue;
        }

        order.push(v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(n: usize, edges: &[(usize, usize)]) -> DirectedWeightedGraph {
        let weighted: Vec<_> = edges.iter().map(|&(a, b)| (a, b, 1)).collect();
        DirectedWeightedGraph::from_edges(n, &weighted).unwrap()
    }

    #[test]
    fn test_single_cycle_is_one_component() {
        let g = graph(3, &[(0, 1), (1, 2), (2, 0)]);
        let labeling = find_components(&g);

        assert_eq!(labeling.count, 1);
        assert_eq!(labeling.labels, vec![1, 1, 1]);
    }

    #[test]
    fn test_chain_gives_one_component_per_vertex() {
        // 0 -> 1 -> 2
        let g = graph(3, &[(0, 1), (1, 2)]);
        let labeling = find_components(&g);

        assert_eq!(labeling.count, 3);
        // Sources of the condensation are labeled first
        assert_eq!(labeling.labels, vec![1, 2, 3]);
    }

    #[test]
    fn test_two_cycles_joined_by_bridge() {
        // {0, 1} -> {2, 3, 4}
        let g = graph(5, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 4), (4, 2)]);
        let labeling = find_components(&g);

        assert_eq!(labeling.count, 2);
        assert_eq!(labeling.labels[0], labeling.labels[1]);
        assert_eq!(labeling.labels[2], labeling.labels[3]);
        assert_eq!(labeling.labels[3], labeling.labels[4]);
        assert_ne!(labeling.labels[0], labeling.labels[2]);
        assert_eq!(labeling.members(labeling.labels[2]), vec![2, 3, 4]);
    }

    #[test]
    fn test_isolated_vertices_and_empty_graph() {
        let labeling = find_components(&graph(3, &[]));
        assert_eq!(labeling.count, 3);
        let mut labels = labeling.labels.clone();
        labels.sort_unstable();
        assert_eq!(labels, vec![1, 2, 3]);

        let empty = find_components(&DirectedWeightedGraph::new(0));
        assert_eq!(empty.count, 0);
        assert!(empty.labels.is_empty());
    }

    #[test]
    fn test_seven_vertex_sample_is_strongly_connected() {
        // Every vertex reaches 1 and 1 reaches every vertex
        let g = graph(
            7,
            &[
                (0, 1), (0, 2), (0, 4),
                (1, 0), (1, 2), (1, 3), (1, 4), (1, 6),
                (2, 5),
                (3, 1), (3, 6),
                (4, 6),
                (5, 1),
                (6, 5),
            ],
        );
        let labeling = find_components(&g);

        assert_eq!(labeling.count, 1);
        assert!(labeling.labels.iter().all(|&l| l == 1));
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let n = 2_000;
        let edges: Vec<_> = (0..n - 1).map(|v| (v, v + 1, 1)).collect();
        let mut g = DirectedWeightedGraph::from_edges(n, &edges).unwrap();
        g.add_edge(n - 1, 0, 1).unwrap();

        let labeling = find_components(&g);
        assert_eq!(labeling.count, 1);
    }
}
