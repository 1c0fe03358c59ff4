//! Graph tool configuration

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use eyre::WrapErr;

// Defaults
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAX_REPAIR_ROUNDS: usize = 1000;
pub const DEFAULT_WEIGHT_MIN: i64 = -5;
pub const DEFAULT_WEIGHT_MAX: i64 = 10;

/// Runtime configuration, read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub max_repair_rounds: usize,
    pub weight_min: i64,
    pub weight_max: i64,
    pub run_log: Option<PathBuf>, // JSON lines log of every run
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_repair_rounds: DEFAULT_MAX_REPAIR_ROUNDS,
            weight_min: DEFAULT_WEIGHT_MIN,
            weight_max: DEFAULT_WEIGHT_MAX,
            run_log: None,
        }
    }
}

impl Config {
    /// Read the process environment; `main` loads `.env` before calling this
    pub fn from_env() -> eyre::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            data_dir: env::var("GRAPH_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            max_repair_rounds: parse_var("GRAPH_MAX_REPAIR_ROUNDS", defaults.max_repair_rounds)?,
            weight_min: parse_var("GRAPH_WEIGHT_MIN", defaults.weight_min)?,
            weight_max: parse_var("GRAPH_WEIGHT_MAX", defaults.weight_max)?,
            run_log: env::var("GRAPH_RUN_LOG").ok().map(PathBuf::from),
        };

        if config.weight_min > config.weight_max {
            return Err(eyre::eyre!(
                "GRAPH_WEIGHT_MIN ({}) must not exceed GRAPH_WEIGHT_MAX ({})",
                config.weight_min,
                config.weight_max
            ));
        }

        Ok(config)
    }

    /// Resolve an input path, falling back to the data directory for relative
    /// paths that do not exist in the working directory
    pub fn resolve_input(&self, path: &Path) -> PathBuf {
        if path.is_relative() && !path.exists() {
            let candidate = self.data_dir.join(path);
            if candidate.exists() {
                return candidate;
            }
        }
        path.to_path_buf()
    }
}

fn parse_var<T>(name: &str, default: T) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("invalid value for {}: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
