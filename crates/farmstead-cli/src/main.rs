//! Terminal front end for the Farmstead simulation.
//!
//! Reads player commands from standard input, one per line, and prints the
//! game's responses to standard output. Logs go to standard error so they
//! never interleave with the board.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from the path given as the first argument, from
//!    `FARMSTEAD_CONFIG`, or from `farmstead-config.yaml`
//! 2. Initialize structured logging (tracing), `RUST_LOG` over the config level
//! 3. Validate the configuration and set up the game
//! 4. Run the session until the game ends or input closes
//! 5. Log the winners

mod command;
mod error;
mod render;
mod session;

use std::io;
use std::path::PathBuf;

use farmstead_core::{GameConfig, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::session::Session;

/// Environment variable naming the config file.
const CONFIG_PATH_ENV: &str = "FARMSTEAD_CONFIG";

/// Config file read when no path is given.
const DEFAULT_CONFIG_PATH: &str = "farmstead-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be
/// installed, or the terminal cannot be read or written.
fn main() -> Result<(), CliError> {
    // 1. Load configuration. Logging is not up yet, so note where it came from.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| CliError::Logging {
            message: e.to_string(),
        })?;

    info!(
        source,
        players = config.game.players.len(),
        starting_gold = config.game.starting_gold,
        gold_to_win = config.game.gold_to_win,
        seed = config.game.seed,
        "Configuration loaded"
    );

    // 3. Set up the game.
    let sim = Simulation::new(&config)?;

    // 4. Play.
    let stdin = io::stdin();
    let stdout = io::stdout();
    let summary = Session::new(sim, stdin.lock(), stdout.lock()).run()?;

    // 5. Done.
    info!(winners = ?summary.winners, "Game finished");
    Ok(())
}

/// Load the game configuration.
///
/// Falls back to defaults (still subject to environment overrides) when the
/// default file is absent. An explicitly named file must exist.
fn load_config() -> Result<(GameConfig, &'static str), CliError> {
    let explicit = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV))
        .map(PathBuf::from);

    if let Some(path) = explicit {
        return Ok((GameConfig::from_file(&path)?, "file"));
    }

    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        Ok((GameConfig::from_file(&path)?, "file"))
    } else {
        let mut config = GameConfig::default();
        config.game.apply_env_overrides()?;
        Ok((config, "defaults"))
    }
}
