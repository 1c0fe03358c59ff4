//! Whitespace-delimited integer matrix files
//!
//! A graph is stored as two square matrices of the same size: the 0/1 edge
//! matrix and the weight matrix. Blank lines are ignored.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GraphError, Result};
use crate::graph::DirectedWeightedGraph;

/// Parse a square integer matrix from text
pub fn parse_matrix(text: &str, name: &str) -> Result<Vec<Vec<i64>>> {
    let mut rows: Vec<Vec<i64>> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| {
                    GraphError::incorrect_input(format!(
                        "{}:{}: {:?} is not an integer",
                        name,
                        line_no + 1,
                        token
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(GraphError::incorrect_input(format!(
                    "{}:{}: expected {} columns, found {}",
                    name,
                    line_no + 1,
                    first.len(),
                    row.len()
                )));
            }
        }
        rows.push(row);
    }

    if let Some(first) = rows.first() {
        if first.len() != rows.len() {
            return Err(GraphError::incorrect_input(format!(
                "{}: matrix is {}x{}, expected a square matrix",
                name,
                rows.len(),
                first.len()
            )));
        }
    }

    Ok(rows)
}

/// Read a square integer matrix from `path`
pub fn read_matrix(path: &Path) -> Result<Vec<Vec<i64>>> {
    let text = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_matrix(&text, &path.display().to_string())
}

/// Read a graph from its edge matrix and weight matrix files
pub fn read_graph(edges_path: &Path, weights_path: &Path) -> Result<DirectedWeightedGraph> {
    let has_edge = read_matrix(edges_path)?;
    let weight = read_matrix(weights_path)?;

    let graph = DirectedWeightedGraph::from_matrices(&has_edge, &weight)?;
    tracing::info!(
        "Read graph from {} / {}: {} vertices, {} edges",
        edges_path.display(),
        weights_path.display(),
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Format a matrix as space-separated rows
pub fn format_matrix(rows: &[Vec<i64>]) -> String {
    let mut out = String::new();
    for row in rows {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn write_matrix(path: &Path, rows: &[Vec<i64>]) -> Result<()> {
    let io_err = |source: std::io::Error| GraphError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(format_matrix(rows).as_bytes())
        .map_err(io_err)?;
    writer.flush().map_err(io_err)
}

/// Save a graph as an edge matrix file and a weight matrix file
pub fn write_graph(graph: &DirectedWeightedGraph, edges_path: &Path, weights_path: &Path) -> Result<()> {
    write_matrix(edges_path, &graph.edge_matrix())?;
    write_matrix(weights_path, &graph.weight_matrix())?;
    tracing::info!(
        "Saved graph to {} / {}",
        edges_path.display(),
        weights_path.display()
    );
    Ok(())
}
