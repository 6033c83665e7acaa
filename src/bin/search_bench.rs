//! Repeated-query benchmark harness for the search strategies.
//!
//! Runs every algorithm against every supplied topology over a grid of
//! TTL values, sampling a random start peer and a random target
//! resource per trial, and aggregates success rate, message cost,
//! coverage and wall-clock time. Each topology is built once per
//! configuration file, so cache entries written by the informed
//! strategies persist across trials exactly as they would for a
//! long-lived overlay.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use p2psearch::config;
use p2psearch::search::{self, Algorithm};
use p2psearch::stats::{BenchmarkReport, TopologyStats, TrialAccumulator};

#[derive(Parser, Debug)]
#[command(name = "search-bench")]
#[command(about = "Benchmark harness for P2P search strategies")]
#[command(version)]
struct Args {
    /// Topology configuration files to benchmark (YAML or JSON)
    #[arg(required = true)]
    configs: Vec<PathBuf>,

    /// Comma-separated TTL values to sweep
    #[arg(long, value_delimiter = ',', default_value = "2,4,6,8")]
    ttl: Vec<u64>,

    /// Number of trials per (algorithm, TTL) cell
    #[arg(long, default_value = "100")]
    trials: usize,

    /// Seed for start/resource sampling and the walk random source
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Write the aggregated report to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut topologies: BTreeMap<String, TopologyStats> = BTreeMap::new();

    for config_path in &args.configs {
        let name = topology_name(config_path);
        info!("Benchmarking topology '{}'", name);

        let stats = benchmark_topology(config_path, &args.ttl, args.trials, &mut rng)
            .wrap_err_with(|| format!("benchmark failed for {:?}", config_path))?;
        topologies.insert(name, stats);
    }

    print_summary(&topologies);

    if let Some(path) = &args.output {
        let report = BenchmarkReport {
            generated_at: chrono::Utc::now(),
            seed: args.seed,
            trials_per_cell: args.trials,
            topologies,
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .wrap_err_with(|| format!("failed to write report to {:?}", path))?;
        info!("Benchmark report written to {:?}", path);
    }

    Ok(())
}

/// Run the full algorithm x TTL grid against one topology file.
fn benchmark_topology(
    config_path: &Path,
    ttl_values: &[u64],
    trials: usize,
    rng: &mut StdRng,
) -> Result<TopologyStats> {
    let config = config::load_config(config_path)?;
    let mut topology = config::build_topology(&config)?;

    let peer_ids: Vec<String> = topology.peer_ids().map(str::to_string).collect();
    let resource_ids: Vec<String> = config.resource_owners().into_keys().collect();

    let mut stats: TopologyStats = BTreeMap::new();
    for algorithm in Algorithm::ALL {
        let mut per_ttl = BTreeMap::new();
        for &ttl in ttl_values {
            let mut acc = TrialAccumulator::default();
            for _ in 0..trials {
                let start = &peer_ids[rng.gen_range(0..peer_ids.len())];
                let resource = &resource_ids[rng.gen_range(0..resource_ids.len())];

                let started = Instant::now();
                let result = search::search(&mut topology, start, resource, ttl, algorithm, rng)?;
                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

                acc.record(result.found, result.messages, result.num_visited(), elapsed_ms);
            }
            let cell = acc.summarize();
            info!(
                "{} ttl={}: success {:.1}%, avg messages {:.1}, avg visited {:.1}",
                algorithm, ttl, cell.success_rate_pct.mean, cell.messages.mean, cell.visited.mean
            );
            per_ttl.insert(ttl, cell);
        }
        stats.insert(algorithm.name().to_string(), per_ttl);
    }
    Ok(stats)
}

/// Topology display name derived from the file stem.
fn topology_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("topology")
        .to_string()
}

/// Print an aligned per-cell summary table to stdout.
fn print_summary(topologies: &BTreeMap<String, TopologyStats>) {
    println!();
    println!(
        "{:<20} {:<22} {:>5} {:>10} {:>12} {:>10}",
        "topology", "algorithm", "ttl", "success%", "messages", "visited"
    );
    for (name, algorithms) in topologies {
        for (algorithm, per_ttl) in algorithms {
            for (ttl, cell) in per_ttl {
                println!(
                    "{:<20} {:<22} {:>5} {:>9.1} {:>12.1} {:>10.1}",
                    name,
                    algorithm,
                    ttl,
                    cell.success_rate_pct.mean,
                    cell.messages.mean,
                    cell.visited.mean
                );
            }
        }
    }
    println!();
}
