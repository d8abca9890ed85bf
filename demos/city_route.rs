//! Find a route across a city map and print it as JSON.
//!
//! Run: cargo run --bin city-route -- --from 2,8 --to 2,25 --mover vehicle
//!
//! Without `--map` the built-in 30x30 city is used.

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use citynav_core::{Cell, MoverClass};
use citynav_demos::{DemoError, city_terrain, load_map, parse_cell, read_json, scatter_avatars};
use citynav_paths::{AStarPathfinder, PathOutcome, SearchConfig, TeleportLinkTable};

/// Route one avatar across a city map
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map snapshot JSON file
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// pedestrian or vehicle
    #[arg(long, default_value = "pedestrian")]
    mover: MoverClass,

    /// Start cell as X,Y
    #[arg(long, value_parser = parse_cell)]
    from: Cell,

    /// Goal cell as X,Y
    #[arg(long, value_parser = parse_cell)]
    to: Cell,

    /// Extra avatars to scatter on walkable cells
    #[arg(long, default_value_t = 0)]
    avatars: usize,

    /// Seed for avatar placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Search limits as JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides max_expansions from --config
    #[arg(long)]
    max_expansions: Option<usize>,
}

#[derive(Serialize)]
struct Report {
    mover: MoverClass,
    from: Cell,
    to: Cell,
    avatars: usize,
    route: PathOutcome,
    steps: Option<usize>,
    expanded: usize,
    peak_open: usize,
}

fn run(args: Args) -> Result<Report, DemoError> {
    let (terrain, mut occupancy) = match &args.map {
        Some(path) => load_map(path)?,
        None => (city_terrain()?, Default::default()),
    };

    if args.avatars > 0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        scatter_avatars(&terrain, &mut occupancy, args.avatars, &[args.from, args.to], &mut rng);
    }

    let mut config: SearchConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => SearchConfig::default(),
    };
    if let Some(n) = args.max_expansions {
        config = config.with_max_expansions(n);
    }

    let pathfinder = AStarPathfinder::new(TeleportLinkTable::city_metro(), config);
    let search = pathfinder.find_path_with_stats(&terrain, &occupancy, args.mover, args.from, args.to)?;
    log::info!(
        "{} route {} -> {}: {} expanded",
        args.mover,
        args.from,
        args.to,
        search.stats.expanded
    );

    Ok(Report {
        mover: args.mover,
        from: args.from,
        to: args.to,
        avatars: occupancy.len(),
        steps: search.outcome.path().map(<[Cell]>::len),
        route: search.outcome,
        expanded: search.stats.expanded,
        peak_open: search.stats.peak_open,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let printed = run(args).and_then(|report| Ok(serde_json::to_string_pretty(&report)?));
    match printed {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
