//! Application entry point for the bouncing-circles viewer.
//!
//! This binary parses command-line options, loads the optional TOML
//! configuration, sets up logging, and hands control to [`Viewer`].

mod fps;
mod scene;
mod viewer;

use anyhow::Result;
use circles_core::Config;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

#[derive(Parser, Debug)]
#[command(about = "Bouncing circles in a resizable arena")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible runs; overrides the config file.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial number of circles; overrides the config file.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Start with body-to-body collisions enabled.
    #[arg(long)]
    collisions: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the configuration cannot be loaded or eframe fails to create
///   the native window or event loop.
fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(count) = args.count {
        cfg.target_count = count;
    }
    cfg.collisions_enabled |= args.collisions;

    tracing::info!(
        count = cfg.target_count,
        collisions = cfg.collisions_enabled,
        seed = ?cfg.seed,
        "starting viewer"
    );

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Bouncing Circles",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(&cfg)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
