pub mod bellman_ford;
pub mod builder;
pub mod component;
pub mod dijkstra;
pub mod johnson;
pub mod scc;
pub mod types;

// Re-exports for external use
pub use bellman_ford::BellmanFord;
pub use builder::DirectedWeightedGraph;
pub use component::{largest_component, shortest_paths_in_largest_component, ComponentPaths};
pub use johnson::{all_pairs_shortest_paths, Johnson};
pub use scc::find_components;
pub use types::{
    AllPairsOutcome, AllPairsResult, ComponentLabeling, DistanceResult, EdgeRepair, NegativeCycle,
    PathOutcome, RepairedAllPairs, RepairedPaths, Weight,
};
