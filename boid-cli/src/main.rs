use std::path::PathBuf;

use anyhow::{Context, Result};
use boid_cli::{load_settings, Runner};
use boid_shared::{InteractionSetting, WorldSettings};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless predator/prey boid simulation", long_about = None)]
struct Args {
    /// JSON settings file; missing fields use the reference world
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seed for initial placement (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the cohesion force
    #[arg(long)]
    no_cohesion: bool,

    /// Disable the alignment force
    #[arg(long)]
    no_alignment: bool,

    /// Disable the separation force
    #[arg(long)]
    no_separation: bool,

    /// Stop resolving interactions for the tick at the first missed threshold
    #[arg(long)]
    early_exit: bool,

    /// Log progress every N ticks (0 disables)
    #[arg(short, long, default_value_t = 30)]
    report_every: u64,

    /// Include every agent's position and heading in the output
    #[arg(long)]
    snapshot: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn apply(&self, settings: &mut WorldSettings) {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if self.no_cohesion {
            settings.toggles.cohesion = false;
        }
        if self.no_alignment {
            settings.toggles.alignment = false;
        }
        if self.no_separation {
            settings.toggles.separation = false;
        }
        if self.early_exit {
            settings.interaction = InteractionSetting::EarlyExit;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let mut settings = match &args.settings {
        Some(path) => {
            log::info!("Loading settings from {}", path.display());
            load_settings(path)?
        }
        None => WorldSettings::default(),
    };
    args.apply(&mut settings);

    let mut runner = Runner::new(&settings).context("Failed to initialize simulation")?;

    log::info!("Running {} ticks...", args.ticks);
    runner.run(args.ticks, Some(args.report_every));

    let output = runner.output(args.snapshot);
    let json = serde_json::to_string_pretty(&output).context("Failed to encode output")?;
    println!("{}", json);

    log::info!(
        "Done: {} boids left, {} captured",
        output.status.boid_count,
        output.status.captured
    );

    Ok(())
}
