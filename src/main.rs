//! rekha-sim - command-line driver for the line-following robot
//!
//! Loads a TOML configuration (or defaults), places obstacles, runs the
//! simulation for a fixed number of ticks and logs every step.
//!
//! Usage:
//!   rekha-sim --config configs/rekha.toml
//!   rekha-sim --steps 50 --obstacles 3 --seed 42 --delay-ms 0
//!
//! Enable per-tick debug output with `RUST_LOG=rekha_nav=debug`.

use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rekha_nav::{RekhaConfig, Result, Simulation};

/// Line-following robot simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (falls back to ./rekha.toml, then defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(short, long)]
    steps: Option<u64>,

    /// Number of random obstacles
    #[arg(short, long)]
    obstacles: Option<usize>,

    /// Seed for obstacle placement (0 = random)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause between ticks in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            RekhaConfig::load(path)?
        }
        None if Path::new("rekha.toml").exists() => {
            info!("Loading configuration from rekha.toml");
            RekhaConfig::load(Path::new("rekha.toml"))?
        }
        None => {
            info!("Using default configuration");
            RekhaConfig::default()
        }
    };

    if let Some(steps) = args.steps {
        config.simulation.steps = steps;
    }
    if let Some(count) = args.obstacles {
        config.obstacles.count = count;
    }
    if let Some(seed) = args.seed {
        config.obstacles.seed = seed;
    }

    info!("RekhaNav v{}", env!("CARGO_PKG_VERSION"));

    let mut simulation = Simulation::from_config(&config)?;
    if let Some(delay) = args.delay_ms {
        simulation = simulation.with_tick_delay(Duration::from_millis(delay));
    }

    let summary = simulation.run_with(config.simulation.steps, |_| {});

    info!(
        "Final position ({:.2}, {:.2}), direction {:.1}°, state {}",
        summary.final_position.x,
        summary.final_position.y,
        summary.final_direction,
        summary.final_behavior
    );
    info!(
        "Ticks by state: FOLLOW_LINE {}, AVOID_OBSTACLE {}, FIND_LINE {}",
        summary.follow_ticks, summary.avoid_ticks, summary.find_ticks
    );
    Ok(())
}
