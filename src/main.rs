use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use p2psearch::config;
use p2psearch::search::{self, Algorithm};

/// Search-strategy simulator for unstructured peer-to-peer overlays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration file (YAML or JSON)
    #[arg(short, long)]
    config: PathBuf,

    /// Identifier of the peer that issues the query
    #[arg(long)]
    node_id: String,

    /// Identifier of the resource to locate
    #[arg(long)]
    resource_id: String,

    /// Maximum number of hops the search may traverse
    #[arg(long)]
    ttl: u64,

    /// Search algorithm: flooding, random_walk, informed_flooding or
    /// informed_random_walk
    #[arg(long)]
    algo: Algorithm,

    /// Seed for the walk random source; omit for a nondeterministic run
    #[arg(long)]
    seed: Option<u64>,

    /// Print the result as pretty JSON instead of a text summary
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = config::load_config(&args.config)?;
    info!(
        "Network parameters: num_nodes={}, min_neighbors={}, max_neighbors={}",
        config.num_nodes, config.min_neighbors, config.max_neighbors
    );

    let mut topology = config::build_topology(&config)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let result = search::search(
        &mut topology,
        &args.node_id,
        &args.resource_id,
        args.ttl,
        args.algo,
        &mut rng,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("=== Search Outcome ===");
    println!("Algorithm       : {}", result.algorithm);
    println!("Start node      : {}", result.start_node);
    println!("Resource        : {}", result.resource_id);
    println!("Found           : {}", if result.found { "yes" } else { "no" });
    if result.found {
        println!("Found at        : {}", result.found_at.join(", "));
    }
    println!("Messages        : {}", result.messages);
    println!("Nodes involved  : {}", result.num_visited());
    println!("Visited nodes   : {:?}", result.visited);
    println!("Paths explored  : {}", result.paths.len());

    Ok(())
}
