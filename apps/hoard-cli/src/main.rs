use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use glam::DVec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use hoard_common::{Environment, WorldId};
use hoard_config::{HoardConfig, WorldSpawns};
use hoard_spawner::{Hoard, ManualHost};
use hoard_world::SimWorld;

#[derive(Parser)]
#[command(name = "hoard-cli", about = "CLI shell for the hoard spawner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    Validate {
        /// Path to a YAML configuration file
        path: PathBuf,
    },
    /// Run the spawner against a simulated flat world for a fixed number
    /// of ticks
    Demo {
        /// Configuration file to use (defaults to a built-in config)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pick a random YAML config from this directory instead
        #[arg(long, conflicts_with = "config")]
        config_dir: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(short, long, default_value = "5")]
        ticks: u32,
        /// Number of participants, spread round-robin across the
        /// configured worlds
        #[arg(short, long, default_value = "2")]
        participants: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Validate { path } => {
            let config = HoardConfig::from_file(&path)?;
            println!("{} is valid", path.display());
            print_summary(&config);
        }
        Commands::Demo {
            config,
            config_dir,
            ticks,
            participants,
        } => {
            let mut rng = StdRng::from_entropy();
            let (config, source) = match (config, config_dir) {
                (Some(path), _) => {
                    let config = HoardConfig::from_file(&path)?;
                    (config, path.display().to_string())
                }
                (None, Some(dir)) => {
                    let (config, path) = hoard_config::load_random(&dir, &mut rng)?;
                    (config, format!("{} (random pick)", path.display()))
                }
                (None, None) => (default_config(), "built-in default".to_string()),
            };
            println!("Using configuration from {source}");
            print_summary(&config);

            run_demo(config, ticks, participants);
        }
    }

    Ok(())
}

fn print_summary(config: &HoardConfig) {
    println!(
        "interval={}s distance={}..{} spawn_limit={}",
        config.spawn_interval, config.min_distance, config.max_distance, config.spawn_limit
    );
    for (name, world) in &config.worlds {
        let mobs: Vec<&str> = world.mobs.iter().map(|kind| kind.name()).collect();
        println!("  world {name}: mobs=[{}]", mobs.join(", "));
    }
}

fn default_config() -> HoardConfig {
    let mut worlds = BTreeMap::new();
    worlds.insert(
        "overworld".to_string(),
        WorldSpawns {
            mobs: vec![
                hoard_common::EntityKind::Zombie,
                hoard_common::EntityKind::Skeleton,
            ],
            min_distance: None,
            max_distance: None,
            spawn_limit: None,
        },
    );
    worlds.insert(
        "cavern".to_string(),
        WorldSpawns {
            mobs: vec![hoard_common::EntityKind::Blaze],
            min_distance: None,
            max_distance: None,
            spawn_limit: None,
        },
    );
    HoardConfig {
        spawn_interval: 5,
        min_distance: 10,
        max_distance: 20,
        spawn_limit: 3,
        worlds,
    }
}

const FLOOR_Y: i32 = 40;
const FLOOR_HALF_EXTENT: i32 = 256;

fn run_demo(config: HoardConfig, ticks: u32, participants: u32) {
    let world = Arc::new(SimWorld::new());

    // One simulated world per configured entry; the demo convention is
    // that a world named `cavern` is the hazardous variant.
    let world_ids: Vec<WorldId> = config.worlds.keys().map(WorldId::new).collect();
    if world_ids.is_empty() {
        println!("configuration has no worlds; nothing to demo");
        return;
    }
    for id in &world_ids {
        let environment = if id.as_str() == "cavern" {
            Environment::Hazardous
        } else {
            Environment::Standard
        };
        world.add_world(id.clone(), environment);
        world.fill_floor(id, FLOOR_Y, FLOOR_HALF_EXTENT);
    }
    for i in 0..participants {
        let id = &world_ids[i as usize % world_ids.len()];
        world.add_participant(id.clone(), DVec3::new(0.5, f64::from(FLOOR_Y) + 1.0, 0.5));
    }

    let mut hoard = Hoard::new(Arc::clone(&world), ManualHost::new());
    hoard.start(config);
    for tick in 1..=ticks {
        hoard.host_mut().fire_all();
        let total: usize = world_ids.iter().map(|id| world.entity_count(id)).sum();
        println!("tick {tick}: total entities = {total}");
    }
    hoard.stop();

    for id in &world_ids {
        let counts = world.kind_counts(id);
        if counts.is_empty() {
            println!("world {id}: no spawns");
            continue;
        }
        let parts: Vec<String> = counts
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect();
        println!("world {id}: {}", parts.join(" "));
    }
}
