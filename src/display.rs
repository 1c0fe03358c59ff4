//! Text output for shortest paths, distance matrices and components

use crate::graph::{AllPairsResult, ComponentLabeling, DistanceResult, EdgeRepair, NegativeCycle, Weight};

const UNREACHABLE: &str = "-";

/// Join a vertex path with arrows
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn format_distance(distance: Option<Weight>) -> String {
    distance.map_or_else(|| UNREACHABLE.to_string(), |d| d.to_string())
}

/// One line per vertex: distance from the source and the path to it
///
/// `names[k]` is printed in place of vertex `k` when given (used to show
/// original indices for a reduced component).
pub fn format_distances(result: &DistanceResult, names: Option<&[usize]>) -> String {
    let name = |v: usize| names.and_then(|n| n.get(v).copied()).unwrap_or(v);

    let mut out = format!("Shortest paths from {}:\n", name(result.source));
    for v in 0..result.distances.len() {
        let path = result
            .path_to(v)
            .map(|p| format_path(&p.into_iter().map(name).collect::<Vec<_>>()))
            .unwrap_or_else(|| "unreachable".to_string());
        out.push_str(&format!(
            "  {:>4}  {:>8}  {}\n",
            name(v),
            format_distance(result.distances[v]),
            path
        ));
    }
    out
}

/// The distance matrix row by row; unreachable pairs print as `-`
pub fn format_all_pairs(result: &AllPairsResult) -> String {
    let cells: Vec<Vec<String>> = result
        .distances
        .iter()
        .map(|row| row.iter().map(|&d| format_distance(d)).collect())
        .collect();
    let width = cells
        .iter()
        .flatten()
        .map(|c| c.len())
        .chain(std::iter::once(result.vertex_count().to_string().len()))
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    out.push_str(&format!("{:>w$} |", "", w = width));
    for v in 0..result.vertex_count() {
        out.push_str(&format!(" {:>w$}", v, w = width));
    }
    out.push('\n');

    for (u, row) in cells.iter().enumerate() {
        out.push_str(&format!("{:>w$} |", u, w = width));
        for cell in row {
            out.push_str(&format!(" {:>w$}", cell, w = width));
        }
        out.push('\n');
    }
    out
}

/// Each component id with its member vertices
pub fn format_components(labeling: &ComponentLabeling) -> String {
    let mut out = format!("{} strongly connected component(s)\n", labeling.count);
    for (id, members) in labeling.components() {
        let list = members
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("  component {}: {}\n", id, list));
    }
    out
}

pub fn format_negative_cycle(cycle: &NegativeCycle) -> String {
    let (from, to) = cycle.edge;
    if cycle.cycle.is_empty() {
        return format!("Negative cycle detected (edge {} -> {} still relaxes)\n", from, to);
    }

    let mut closed = cycle.cycle.clone();
    closed.push(cycle.cycle[0]);
    format!(
        "Negative cycle detected: {} (edge {} -> {} still relaxes)\n",
        format_path(&closed),
        from,
        to
    )
}

pub fn format_repairs(repairs: &[EdgeRepair]) -> String {
    let mut out = format!("{} repair(s) applied\n", repairs.len());
    for r in repairs {
        out.push_str(&format!(
            "  {} -> {}: {} => {}\n",
            r.from, r.to, r.old_weight, r.new_weight
        ));
    }
    out
}
