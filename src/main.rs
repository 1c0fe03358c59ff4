use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use petgraph::dot::Dot;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use graph_paths::config::Config;
use graph_paths::display::{
    format_all_pairs, format_components, format_distances, format_negative_cycle, format_repairs,
};
use graph_paths::generator::{random_digraph_seeded, GeneratorConfig};
use graph_paths::graph::{
    dijkstra, AllPairsOutcome, BellmanFord, DirectedWeightedGraph, Johnson, PathOutcome,
};
use graph_paths::reader::{read_graph, write_graph};
use graph_paths::report::{RunLogger, RunRecord};
use graph_paths::{find_components, shortest_paths_in_largest_component};

#[derive(Parser)]
#[command(name = "graph-paths")]
#[command(about = "Shortest paths and strongly connected components on weighted digraphs", long_about = None)]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Edge matrix and weight matrix files of the input graph
#[derive(Args, Debug, Clone)]
struct GraphFiles {
    /// 0/1 adjacency matrix file
    #[arg(long)]
    edges: PathBuf,

    /// Weight matrix file, same shape as the adjacency matrix
    #[arg(long)]
    weights: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Strongly connected components (Kosaraju)
    Scc {
        #[command(flatten)]
        files: GraphFiles,
    },

    /// Single-source shortest paths with negative cycle detection
    BellmanFord {
        #[command(flatten)]
        files: GraphFiles,

        /// Source vertex
        #[arg(long, default_value = "0")]
        source: usize,

        /// Cancel reachable negative cycles by raising edge weights
        #[arg(long, default_value = "false")]
        repair: bool,

        /// Restrict to the largest strongly connected component
        #[arg(long, default_value = "false", conflicts_with = "repair")]
        largest_component: bool,

        /// Save the repaired graph to these edge/weight files
        #[arg(long, num_args = 2, value_names = ["EDGES", "WEIGHTS"], requires = "repair")]
        save_repaired: Option<Vec<PathBuf>>,
    },

    /// Single-source shortest paths on a graph without negative weights
    Dijkstra {
        #[command(flatten)]
        files: GraphFiles,

        /// Source vertex
        #[arg(long, default_value = "0")]
        source: usize,
    },

    /// All-pairs shortest paths (Johnson)
    Johnson {
        #[command(flatten)]
        files: GraphFiles,

        /// Cancel negative cycles by raising edge weights
        #[arg(long, default_value = "false")]
        repair: bool,
    },

    /// Generate a random digraph and save it
    Generate {
        /// Number of vertices
        #[arg(long)]
        vertices: usize,

        /// Edge probability for each ordered pair
        #[arg(long)]
        probability: f64,

        /// Seed for reproducible graphs
        #[arg(long)]
        seed: Option<u64>,

        /// Output adjacency matrix file
        #[arg(long)]
        out_edges: PathBuf,

        /// Output weight matrix file
        #[arg(long)]
        out_weights: PathBuf,
    },

    /// Export the graph in Graphviz DOT format
    Dot {
        #[command(flatten)]
        files: GraphFiles,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn load_graph(config: &Config, files: &GraphFiles) -> Result<DirectedWeightedGraph> {
    let edges = config.resolve_input(&files.edges);
    let weights = config.resolve_input(&files.weights);
    read_graph(&edges, &weights).wrap_err("failed to read the input graph")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn save_repaired(graph: &DirectedWeightedGraph, paths: &[PathBuf]) -> Result<()> {
    if let [edges, weights] = paths {
        write_graph(graph, edges, weights)?;
        println!("Repaired graph saved to {} / {}", edges.display(), weights.display());
    }
    Ok(())
}

fn run_scc(config: &Config, files: &GraphFiles, json: bool) -> Result<RunRecord> {
    let graph = load_graph(config, files)?;
    let mut record = RunRecord::new("scc", graph.vertex_count(), graph.edge_count());

    let labeling = find_components(&graph);
    if json {
        print_json(&labeling)?;
    } else {
        print!("{}", format_components(&labeling));
    }

    record.outcome = format!("{} components", labeling.count);
    Ok(record)
}

fn run_bellman_ford(
    config: &Config,
    files: &GraphFiles,
    source: usize,
    repair: bool,
    largest_component: bool,
    save_to: Option<&[PathBuf]>,
    json: bool,
) -> Result<RunRecord> {
    let mut graph = load_graph(config, files)?;
    let mut record = RunRecord::new("bellman-ford", graph.vertex_count(), graph.edge_count());

    if largest_component {
        let result = shortest_paths_in_largest_component(&graph, source)?;
        if json {
            print_json(&result)?;
        } else {
            match &result.outcome {
                PathOutcome::Paths(paths) => {
                    print!("{}", format_distances(paths, Some(&result.vertices)))
                }
                PathOutcome::NegativeCycle(cycle) => print!("{}", format_negative_cycle(cycle)),
            }
        }
        record.outcome = outcome_label(&result.outcome).to_string();
        return Ok(record);
    }

    let engine = BellmanFord::new(config.max_repair_rounds);
    if repair {
        let repaired = engine.shortest_paths_repairing(&mut graph, source)?;
        if json {
            print_json(&repaired)?;
        } else {
            print!("{}", format_repairs(&repaired.repairs));
            print!("{}", format_distances(&repaired.paths, None));
        }
        if let Some(paths) = save_to {
            save_repaired(&graph, paths)?;
        }
        record.outcome = "paths".to_string();
        record.repairs = repaired.repairs.len();
        return Ok(record);
    }

    let outcome = engine.shortest_paths_from(&graph, source)?;
    if json {
        print_json(&outcome)?;
    } else {
        match &outcome {
            PathOutcome::Paths(paths) => print!("{}", format_distances(paths, None)),
            PathOutcome::NegativeCycle(cycle) => {
                print!("{}", format_negative_cycle(cycle));
                println!("Run again with --repair to cancel the cycle.");
            }
        }
    }
    record.outcome = outcome_label(&outcome).to_string();
    Ok(record)
}

fn run_dijkstra(config: &Config, files: &GraphFiles, source: usize, json: bool) -> Result<RunRecord> {
    let graph = load_graph(config, files)?;
    let mut record = RunRecord::new("dijkstra", graph.vertex_count(), graph.edge_count());

    if graph.has_negative_edge() {
        return Err(eyre::eyre!(
            "graph has negative edge weights; use bellman-ford or johnson instead"
        ));
    }

    let result = dijkstra::shortest_paths_from(&graph, source)?;
    if json {
        print_json(&result)?;
    } else {
        print!("{}", format_distances(&result, None));
    }

    record.outcome = "paths".to_string();
    Ok(record)
}

fn run_johnson(config: &Config, files: &GraphFiles, repair: bool, json: bool) -> Result<RunRecord> {
    let mut graph = load_graph(config, files)?;
    let mut record = RunRecord::new("johnson", graph.vertex_count(), graph.edge_count());
    let johnson = Johnson::new(BellmanFord::new(config.max_repair_rounds));

    if repair {
        let repaired = johnson.all_pairs_repairing(&mut graph)?;
        if json {
            print_json(&repaired)?;
        } else {
            print!("{}", format_repairs(&repaired.repairs));
            print!("{}", format_all_pairs(&repaired.distances));
        }
        record.outcome = "distances".to_string();
        record.repairs = repaired.repairs.len();
        return Ok(record);
    }

    let outcome = johnson.all_pairs(&graph)?;
    if json {
        print_json(&outcome)?;
    } else {
        match &outcome {
            AllPairsOutcome::Distances(result) => print!("{}", format_all_pairs(result)),
            AllPairsOutcome::NegativeCycle(cycle) => {
                print!("{}", format_negative_cycle(cycle));
                println!("Run again with --repair to cancel the cycle.");
            }
        }
    }
    record.outcome = match outcome {
        AllPairsOutcome::Distances(_) => "distances",
        AllPairsOutcome::NegativeCycle(_) => "negative_cycle",
    }
    .to_string();
    Ok(record)
}

fn run_generate(
    config: &Config,
    vertices: usize,
    probability: f64,
    seed: Option<u64>,
    out_edges: &Path,
    out_weights: &Path,
) -> Result<RunRecord> {
    let generator = GeneratorConfig {
        vertices,
        probability,
        weights: config.weight_min..=config.weight_max,
    };
    let graph = random_digraph_seeded(&generator, seed)?;
    write_graph(&graph, out_edges, out_weights)?;

    println!(
        "Generated {} vertices, {} edges -> {} / {}",
        graph.vertex_count(),
        graph.edge_count(),
        out_edges.display(),
        out_weights.display()
    );

    let mut record = RunRecord::new("generate", graph.vertex_count(), graph.edge_count());
    record.outcome = "generated".to_string();
    Ok(record)
}

fn run_dot(config: &Config, files: &GraphFiles, out: Option<&Path>) -> Result<RunRecord> {
    let graph = load_graph(config, files)?;
    let dot = format!("{}", Dot::new(&graph.to_petgraph()));

    match out {
        Some(path) => {
            std::fs::write(path, &dot)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            println!("DOT written to {}", path.display());
        }
        None => print!("{}", dot),
    }

    let mut record = RunRecord::new("dot", graph.vertex_count(), graph.edge_count());
    record.outcome = "exported".to_string();
    Ok(record)
}

fn outcome_label(outcome: &PathOutcome) -> &'static str {
    match outcome {
        PathOutcome::Paths(_) => "paths",
        PathOutcome::NegativeCycle(_) => "negative_cycle",
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let cli = Cli::parse();
    let json = cli.json;
    let started = Instant::now();

    let mut record = match cli.command {
        Commands::Scc { files } => run_scc(&config, &files, json)?,
        Commands::BellmanFord {
            files,
            source,
            repair,
            largest_component,
            save_repaired,
        } => run_bellman_ford(
            &config,
            &files,
            source,
            repair,
            largest_component,
            save_repaired.as_deref(),
            json,
        )?,
        Commands::Dijkstra { files, source } => run_dijkstra(&config, &files, source, json)?,
        Commands::Johnson { files, repair } => run_johnson(&config, &files, repair, json)?,
        Commands::Generate {
            vertices,
            probability,
            seed,
            out_edges,
            out_weights,
        } => run_generate(&config, vertices, probability, seed, &out_edges, &out_weights)?,
        Commands::Dot { files, out } => run_dot(&config, &files, out.as_deref())?,
    };

    record.elapsed_ms = started.elapsed().as_millis();
    if let Some(path) = &config.run_log {
        RunLogger::new(path).log(&record);
    }

    Ok(())
}
