use petgraph::graph::{DiGraph, NodeIndex};

use super::types::Weight;
use crate::error::{GraphError, Result};

/// Dense directed weighted graph over vertices `0..vertex_count`
///
/// `has_edge` and `weight` are row-major `n * n` matrices. Weight cells without
/// an edge are never handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedWeightedGraph {
    vertex_count: usize,
    has_edge: Vec<bool>,
    weight: Vec<Weight>,
}

impl DirectedWeightedGraph {
    /// Create a graph with `vertex_count` vertices and no edges
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            has_edge: vec![false; vertex_count * vertex_count],
            weight: vec![0; vertex_count * vertex_count],
        }
    }

    /// Build a graph from an edge list, validating every endpoint
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize, Weight)]) -> Result<Self> {
        let mut graph = Self::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Build a graph from the 0/1 edge matrix and the weight matrix
    ///
    /// Both matrices must be square, of the same size, and the edge matrix must
    /// hold only 0 and 1 with a zero diagonal.
    pub fn from_matrices(has_edge: &[Vec<i64>], weight: &[Vec<i64>]) -> Result<Self> {
        let n = has_edge.len();
        if weight.len() != n {
            return Err(GraphError::incorrect_input(format!(
                "edge matrix has {} rows but weight matrix has {}",
                n,
                weight.len()
            )));
        }

        let mut graph = Self::new(n);
        for (i, (edge_row, weight_row)) in has_edge.iter().zip(weight).enumerate() {
            if edge_row.len() != n || weight_row.len() != n {
                return Err(GraphError::incorrect_input(format!(
                    "row {} must have {} columns (edges: {}, weights: {})",
                    i,
                    n,
                    edge_row.len(),
                    weight_row.len()
                )));
            }

            for (j, (&flag, &w)) in edge_row.iter().zip(weight_row).enumerate() {
                match flag {
                    0 => {}
                    1 if i == j => {
                        return Err(GraphError::incorrect_input(format!(
                            "self-loop at vertex {} is not allowed",
                            i
                        )));
                    }
                    1 => {
                        let idx = graph.index(i, j);
                        graph.has_edge[idx] = true;
                        graph.weight[idx] = w;
                    }
                    other => {
                        return Err(GraphError::incorrect_input(format!(
                            "edge matrix cell ({}, {}) must be 0 or 1, got {}",
                            i, j, other
                        )));
                    }
                }
            }
        }

        Ok(graph)
    }

    fn index(&self, from: usize, to: usize) -> usize {
        from * self.vertex_count + to
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count {
            Ok(())
        } else {
            Err(GraphError::incorrect_input(format!(
                "vertex {} is out of range for {} vertices",
                vertex, self.vertex_count
            )))
        }
    }

    /// Add (or overwrite) the edge `from -> to`
    pub fn add_edge(&mut self, from: usize, to: usize, weight: Weight) -> Result<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(GraphError::incorrect_input(format!(
                "self-loop at vertex {} is not allowed",
                from
            )));
        }

        let idx = self.index(from, to);
        self.has_edge[idx] = true;
        self.weight[idx] = weight;
        Ok(())
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Get the number of edges
    pub fn edge_count(&self) -> usize {
        self.has_edge.iter().filter(|&&e| e).count()
    }

    /// Check whether the edge `from -> to` exists
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.vertex_count && to < self.vertex_count && self.has_edge[self.index(from, to)]
    }

    /// Get the weight of `from -> to`, or `None` when there is no such edge
    pub fn weight(&self, from: usize, to: usize) -> Option<Weight> {
        self.has_edge(from, to)
            .then(|| self.weight[self.index(from, to)])
    }

    /// Overwrite the weight of an existing edge
    pub(crate) fn set_weight(&mut self, from: usize, to: usize, weight: Weight) {
        debug_assert!(self.has_edge(from, to));
        let idx = self.index(from, to);
        self.weight[idx] = weight;
    }

    /// Iterate over all edges `(from, to, weight)` in ascending `(from, to)` order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Weight)> + '_ {
        (0..self.vertex_count).flat_map(move |from| {
            self.successors(from).map(move |(to, w)| (from, to, w))
        })
    }

    /// Iterate over the outgoing edges of `from` in ascending target order
    pub fn successors(&self, from: usize) -> impl Iterator<Item = (usize, Weight)> + '_ {
        let row = from * self.vertex_count;
        (0..self.vertex_count).filter_map(move |to| {
            self.has_edge[row + to].then(|| (to, self.weight[row + to]))
        })
    }

    /// Check whether any edge carries a negative weight
    pub fn has_negative_edge(&self) -> bool {
        self.edges().any(|(_, _, w)| w < 0)
    }

    /// The 0/1 edge matrix, row by row
    pub fn edge_matrix(&self) -> Vec<Vec<i64>> {
        (0..self.vertex_count)
            .map(|i| {
                (0..self.vertex_count)
                    .map(|j| i64::from(self.has_edge[self.index(i, j)]))
                    .collect()
            })
            .collect()
    }

    /// The weight matrix, row by row, with 0 where there is no edge
    pub fn weight_matrix(&self) -> Vec<Vec<Weight>> {
        (0..self.vertex_count)
            .map(|i| {
                (0..self.vertex_count)
                    .map(|j| self.weight(i, j).unwrap_or(0))
                    .collect()
            })
            .collect()
    }

    /// Build the subgraph induced by `vertices`
    ///
    /// Vertex `vertices[k]` of `self` becomes vertex `k` of the result. Edges
    /// with an endpoint outside `vertices` are dropped.
    pub fn induced_subgraph(&self, vertices: &[usize]) -> Result<Self> {
        for &v in vertices {
            self.check_vertex(v)?;
        }

        let mut sub = Self::new(vertices.len());
        for (new_from, &from) in vertices.iter().enumerate() {
            for (new_to, &to) in vertices.iter().enumerate() {
                if let Some(w) = self.weight(from, to) {
                    let idx = sub.index(new_from, new_to);
                    sub.has_edge[idx] = true;
                    sub.weight[idx] = w;
                }
            }
        }

        tracing::debug!(
            "Induced subgraph: {} of {} vertices, {} edges",
            sub.vertex_count,
            self.vertex_count,
            sub.edge_count()
        );

        Ok(sub)
    }

    /// Convert into a petgraph `DiGraph`
    ///
    /// Node `k` carries the vertex index `k`, so `NodeIndex::new(k)` addresses it.
    pub fn to_petgraph(&self) -> DiGraph<usize, Weight> {
        let mut graph = DiGraph::with_capacity(self.vertex_count, self.edge_count());
        for v in 0..self.vertex_count {
            graph.add_node(v);
        }
        for (from, to, w) in self.edges() {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), w);
        }
        graph
    }
}
