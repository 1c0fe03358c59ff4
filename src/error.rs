use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the graph core and its reader/writer
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("source vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    InvalidSource { vertex: usize, vertex_count: usize },

    #[error("source vertex {vertex} is not part of the largest strongly connected component")]
    SourceNotInComponent { vertex: usize },

    #[error("incorrect input: {0}")]
    IncorrectInput(String),

    #[error("path weight between {from} and {to} overflows i64")]
    WeightOverflow { from: usize, to: usize },

    #[error("negative cycle repair did not converge after {rounds} rounds")]
    RepairDidNotConverge { rounds: usize },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    pub(crate) fn incorrect_input(message: impl Into<String>) -> Self {
        Self::IncorrectInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
