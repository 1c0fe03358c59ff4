//! Shortest paths on dense directed weighted graphs.
//!
//! - [`graph::bellman_ford`] - single-source paths with negative cycle detection and repair
//! - [`graph::dijkstra`] - single-source paths on non-negative weights
//! - [`graph::johnson`] - all-pairs paths through vertex potentials
//! - [`graph::scc`] - Kosaraju's strongly connected components
//! - [`graph::component`] - Bellman-Ford restricted to the largest component
//!
//! Around the core: matrix file reading and writing ([`reader`]), random
//! digraphs ([`generator`]), text output ([`display`]) and run logs ([`report`]).

pub mod config;
pub mod display;
pub mod error;
pub mod generator;
pub mod graph;
pub mod reader;
pub mod report;

pub use error::{GraphError, Result};
pub use graph::{
    all_pairs_shortest_paths, find_components, shortest_paths_in_largest_component, BellmanFord,
    DirectedWeightedGraph, Johnson,
};
