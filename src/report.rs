//! Run logging
//!
//! Appends one JSON line per CLI run so repeated experiments can be compared.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Summary of one command run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub timestamp: String,
    pub command: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub outcome: String,
    pub repairs: usize,
    pub elapsed_ms: u128,
}

impl RunRecord {
    pub fn new(command: &str, vertex_count: usize, edge_count: usize) -> Self {
        Self {
            timestamp: Local::now().to_rfc3339(),
            command: command.to_string(),
            vertex_count,
            edge_count,
            outcome: String::new(),
            repairs: 0,
            elapsed_ms: 0,
        }
    }
}

/// Run logger that writes to a JSON Lines file
pub struct RunLogger {
    file_path: PathBuf,
}

impl RunLogger {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Append a record; failures are logged, never fatal
    pub fn log(&self, record: &RunRecord) {
        let file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
        {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Failed to open run log {}: {}", self.file_path.display(), e);
                return;
            }
        };

        let mut writer = BufWriter::new(file);
        match serde_json::to_string(record) {
            Ok(json) => {
                if let Err(e) = writeln!(writer, "{}", json).and_then(|_| writer.flush()) {
                    tracing::warn!("Failed to write run log: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize run record: {}", e),
        }
    }
}
