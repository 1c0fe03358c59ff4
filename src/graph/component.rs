use serde::Serialize;

use super::bellman_ford::{self, check_source};
use super::builder::DirectedWeightedGraph;
use super::scc;
use super::types::PathOutcome;
use crate::error::{GraphError, Result};

/// Bellman-Ford result on the largest strongly connected component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentPaths {
    /// Distances and predecessors in the reduced index space
    pub outcome: PathOutcome,
    /// `vertices[k]` is the original index of reduced vertex `k`
    pub vertices: Vec<usize>,
    /// Reduced index of the requested source
    pub source: usize,
}

impl ComponentPaths {
    /// Original index of reduced vertex `reduced`
    pub fn original_vertex(&self, reduced: usize) -> Option<usize> {
        self.vertices.get(reduced).copied()
    }

    /// Reduced index of `original`, if it belongs to the component
    pub fn reduced_vertex(&self, original: usize) -> Option<usize> {
        self.vertices.iter().position(|&v| v == original)
    }

    /// Map a reduced-space path back to original vertex indices
    pub fn original_path(&self, reduced_path: &[usize]) -> Option<Vec<usize>> {
        reduced_path
            .iter()
            .map(|&v| self.original_vertex(v))
            .collect()
    }
}

/// Extract the largest strongly connected component as a new graph
///
/// Returns the reduced graph and the original index of every reduced vertex.
/// Ties between equally large components go to the lowest component id.
pub fn largest_component(graph: &DirectedWeightedGraph) -> Result<(DirectedWeightedGraph, Vec<usize>)> {
    let labeling = scc::find_components(graph);
    let Some(id) = labeling.largest() else {
        return Ok((graph.clone(), Vec::new()));
    };

    let vertices = labeling.members(id);
    let reduced = graph.induced_subgraph(&vertices)?;
    Ok((reduced, vertices))
}

/// Bellman-Ford from `source`, restricted to the largest strongly connected component
///
/// A strongly connected graph is used as is. Otherwise the largest component is
/// extracted and `source` is renumbered into it; `SourceNotInComponent` if it
/// was left out.
pub fn shortest_paths_in_largest_component(
    graph: &DirectedWeightedGraph,
    source: usize,
) -> Result<ComponentPaths> {
    check_source(graph, source)?;

    let labeling = scc::find_components(graph);
    if labeling.count == 1 {
        return Ok(ComponentPaths {
            outcome: bellman_ford::shortest_paths_from(graph, source)?,
            vertices: (0..graph.vertex_count()).collect(),
            source,
        });
    }

    let Some(id) = labeling.largest() else {
        return Err(GraphError::SourceNotInComponent { vertex: source });
    };
    let vertices = labeling.members(id);

    tracing::info!(
        "Graph has {} components; using component {} with {} of {} vertices",
        labeling.count,
        id,
        vertices.len(),
        graph.vertex_count()
    );

    if labeling.component_of(source) != Some(id) {
        return Err(GraphError::SourceNotInComponent { vertex: source });
    }
    // Members are ascending, so the rank of `source` is its reduced index
    let reduced_source = vertices.partition_point(|&v| v < source);

    let reduced = graph.induced_subgraph(&vertices)?;
    Ok(ComponentPaths {
        outcome: bellman_ford::shortest_paths_from(&reduced, reduced_source)?,
        vertices,
        source: reduced_source,
    })
}
