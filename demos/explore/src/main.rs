use std::{path::PathBuf, time::Instant};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use sp_core::{BoundingBox, Coord, VertexId};
use sp_graph::{Graph, load_graph};
use sp_search::{Dijkstra, PathEngine};

use crate::report::{RouteReport, VertexReport, WindowReport};

mod parsers;
mod report;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// DIMACS coordinate file (`p aux sp co N` / `v id lon lat`)
    #[arg(long, env = "SP_COORDINATES")]
    coordinates: PathBuf,

    /// DIMACS arc file (`p sp N M` / `a u v w`)
    #[arg(long, env = "SP_ARCS")]
    arcs: PathBuf,

    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest path between two vertices, random ones when omitted.
    #[command(visible_alias = "r")]
    Route {
        #[arg(long, value_parser = parsers::parse_vertex)]
        source: Option<VertexId>,

        #[arg(long, value_parser = parsers::parse_vertex)]
        destination: Option<VertexId>,

        /// Seed for picking random endpoints
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Include the full settlement order in the output
        #[arg(long)]
        trace: bool,
    },
    /// Coordinate and outgoing arcs of one vertex.
    Vertex {
        #[arg(long, value_parser = parsers::parse_vertex)]
        id: VertexId,
    },
    /// Vertex closest to a position given as "lat,lon" in degrees.
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        at: Coord,
    },
    /// Vertices inside a square window around a position.
    Window {
        #[arg(long, allow_hyphen_values = true)]
        at: Coord,

        /// Half-width of the window in degrees
        #[arg(long, value_parser = parsers::parse_radius)]
        radius: i32,
    },
    /// Run many random queries in parallel and report throughput.
    Batch {
        #[arg(long, default_value_t = 1_000)]
        count: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

#[derive(Serialize)]
struct NearestReport {
    query:  Coord,
    vertex: u64,
    coord:  Coord,
}

#[derive(Serialize)]
struct BatchReport {
    queries:    usize,
    reachable:  usize,
    settled:    usize,
    elapsed_ms: u128,
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let graph = load_graph(&cli.coordinates, &cli.arcs).with_context(|| {
        format!(
            "loading {} and {}",
            cli.coordinates.display(),
            cli.arcs.display()
        )
    })?;
    if graph.is_empty() {
        bail!("graph has no vertices");
    }

    match cli.command {
        Commands::Route { source, destination, seed, trace } => {
            let mut rng = SmallRng::seed_from_u64(seed);
            let source = source.unwrap_or_else(|| random_vertex(&graph, &mut rng));
            let destination = destination.unwrap_or_else(|| random_vertex(&graph, &mut rng));
            ensure_vertex(&graph, source)?;
            ensure_vertex(&graph, destination)?;
            let outcome = Dijkstra.search(&graph, source, destination)?;
            if !outcome.is_reachable() {
                warn!(%source, %destination, "destination unreachable");
            }
            print_json(&RouteReport::new(&graph, source, destination, &outcome, trace))?;
        }
        Commands::Vertex { id } => {
            ensure_vertex(&graph, id)?;
            print_json(&VertexReport::new(&graph, id))?;
        }
        Commands::Nearest { at } => {
            let vertex = graph.nearest_vertex(at).context("graph has no vertices")?;
            print_json(&NearestReport {
                query:  at,
                vertex: vertex.one_based(),
                coord:  graph.coord(vertex),
            })?;
        }
        Commands::Window { at, radius } => {
            print_json(&WindowReport::new(&graph, BoundingBox::around(at, radius)))?;
        }
        Commands::Batch { count, seed } => {
            print_json(&run_batch(&graph, &Dijkstra, count, seed)?)?;
        }
    }

    Ok(())
}

/// Reject ids the user typed that the graph does not hold, reporting them
/// 1-based as they were entered.
fn ensure_vertex(graph: &Graph, v: VertexId) -> anyhow::Result<()> {
    if !graph.contains(v) {
        bail!("vertex {} not in graph of {} vertices", v.one_based(), graph.vertex_count());
    }
    Ok(())
}

fn random_vertex(graph: &Graph, rng: &mut SmallRng) -> VertexId {
    VertexId(rng.gen_range(0..graph.vertex_count() as u32))
}

/// Endpoints are drawn up front from one seeded generator so the batch is
/// reproducible regardless of how rayon schedules it.
fn run_batch(
    graph: &Graph,
    engine: &dyn PathEngine,
    count: usize,
    seed: u64,
) -> anyhow::Result<BatchReport> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let pairs: Vec<(VertexId, VertexId)> = (0..count)
        .map(|_| (random_vertex(graph, &mut rng), random_vertex(graph, &mut rng)))
        .collect();

    let start = Instant::now();
    let outcomes = pairs
        .par_iter()
        .map(|&(s, d)| engine.search(graph, s, d))
        .collect::<Result<Vec<_>, _>>()?;
    let elapsed = start.elapsed();

    let report = BatchReport {
        queries:    outcomes.len(),
        reachable:  outcomes.iter().filter(|o| o.is_reachable()).count(),
        settled:    outcomes.iter().map(|o| o.settled_count()).sum(),
        elapsed_ms: elapsed.as_millis(),
    };
    info!(
        queries = report.queries,
        reachable = report.reachable,
        elapsed_ms = report.elapsed_ms,
        "batch finished"
    );
    Ok(report)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
