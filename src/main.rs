//! # Pocket Battle Main Entry Point
//!
//! Parses the command line, sets up logging, loads the map and runs the
//! macroquad frame loop.

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use pocket_battle::{
    load_map, window_settings, GameConfig, InputHandler, ModeController, PocketError,
    PocketResult, SceneManager,
};
use std::path::PathBuf;

/// Command line arguments. Every flag is optional.
#[derive(Parser, Debug)]
#[command(name = "pocket-battle")]
#[command(about = "Explore Route 1, battle wild creatures and build your party")]
#[command(version)]
struct Args {
    /// Random seed for encounters and battles
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map file (comma-separated tile ids)
    #[arg(long)]
    map: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding tiles, battle sprites and player frames
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Log filter (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Sizes the window from the same configuration the game will run with.
///
/// A config that fails to load falls back to the defaults here; `run_game`
/// reports the error and exits.
fn window_conf() -> Conf {
    let config = startup_config(&Args::parse()).unwrap_or_default();
    window_settings(&config)
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    if let Err(e) = initialize_logging(&args.log_level) {
        eprintln!("Logging unavailable: {e}");
    }

    info!("Starting Pocket Battle v{}", pocket_battle::VERSION);

    if let Err(e) = run_game(&args).await {
        error!("Game stopped: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified filter.
fn initialize_logging(log_level: &str) -> PocketResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(log_level))
            .with_target(false)
            .try_init()
            .map_err(|e| PocketError::InvalidState(e.to_string()))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .try_init()
            .map_err(|e| PocketError::InvalidState(e.to_string()))?;
    }

    Ok(())
}

/// Loads `--config` (or the defaults) and applies the path overrides.
fn startup_config(args: &Args) -> PocketResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            GameConfig::load(path)?
        }
        None => GameConfig::default(),
    };
    if let Some(map) = &args.map {
        config.map_path = map.clone();
    }
    if let Some(assets) = &args.assets {
        config.assets_dir = assets.clone();
    }
    Ok(config)
}

/// Builds the game from the command line and runs it until the player quits.
async fn run_game(args: &Args) -> PocketResult<()> {
    let config = startup_config(args)?;
    let map = load_map(&config.map_path, &config)?;
    let controller = ModeController::new(config, map, args.seed)?;

    let mut scenes = SceneManager::new(controller, InputHandler::new()).await;
    scenes.run().await?;

    info!("Game loop ended");
    Ok(())
}
