use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context};
use clap::Parser;
use log::info;

use textcache::common::config::{
    SimulationConfig, StoreLatency, CACHE_CAPACITY, CACHE_READ_LATENCY, SIM_REQUESTS_PER_USER,
    SIM_USERS,
};
use textcache::session::{Session, SessionConfig};
use textcache::FileStore;

#[derive(Parser, Debug)]
#[command(name = "textcache")]
#[command(about = "Read texts through a FIFO/LRU/LFU cache and compare the policies")]
struct Args {
    /// Directory holding 1.txt..100.txt
    #[arg(long, default_value = "texts")]
    texts_dir: PathBuf,

    /// Directory for simulation miss reports
    #[arg(long, default_value = ".")]
    report_dir: PathBuf,

    /// Cache capacity in entries
    #[arg(long, default_value_t = CACHE_CAPACITY)]
    capacity: usize,

    /// Simulated users per experiment
    #[arg(long, default_value_t = SIM_USERS)]
    users: usize,

    /// Requests per simulated user
    #[arg(long, default_value_t = SIM_REQUESTS_PER_USER)]
    requests: usize,

    /// Seed for the simulation workloads (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable every simulated delay
    #[arg(long)]
    no_latency: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder().format_timestamp(None).init();
    let args = Args::parse();
    ensure!(args.capacity > 0, "--capacity must be at least 1");

    let (latency, hit_latency) = if args.no_latency {
        (StoreLatency::instant(), Duration::ZERO)
    } else {
        (StoreLatency::default(), CACHE_READ_LATENCY)
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("texts from {}, seed {}", args.texts_dir.display(), seed);

    let config = SessionConfig {
        capacity: args.capacity,
        hit_latency,
        simulation: SimulationConfig {
            capacity: args.capacity,
            hit_latency,
            users: args.users,
            requests_per_user: args.requests,
            seed,
        },
        report_dir: Some(args.report_dir),
    };

    println!("textcache - text reader with cache");
    println!("Make sure '{}' holds the files 1.txt..100.txt.", args.texts_dir.display());

    let texts_dir = args.texts_dir;
    let mut session = Session::new(config, move || FileStore::with_latency(&texts_dir, latency));

    let stdin = io::stdin();
    session
        .run(stdin.lock(), io::stdout())
        .context("interactive session failed")?;
    Ok(())
}
