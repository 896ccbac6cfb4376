//! Laser Mirrors entry point
//!
//! Parses flags, asks for the board on stdin and runs the console session.

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use laser_mirrors::sim::{GamePhase, new_game};
use laser_mirrors::{Console, SessionError, Settings};

#[derive(Debug, Parser)]
#[command(name = "laser-mirrors", version, about = "Rotate mirrors to steer a laser onto every target")]
struct Args {
    /// Seed for object placement (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not clear the terminal between turns
    #[arg(long)]
    no_clear: bool,

    /// Do not wait for Enter after each shot
    #[arg(long)]
    no_pause: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path),
            None => Settings::default(),
        };
        if self.no_clear {
            settings.clear_screen = false;
        }
        if self.no_pause {
            settings.pause_after_shot = false;
        }
        settings
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Laser Mirrors starting...");

    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut console = Console::new(io::stdin().lock(), io::stdout().lock(), args.settings());

    let config = console.read_config().context("could not read the board setup")?;
    let mut state = new_game(&config, seed).context("invalid board setup")?;

    match console.run(&mut state) {
        Ok(GamePhase::Stalled) => {
            log::info!("Game stalled with {} targets left", state.remaining_targets);
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(SessionError::InputClosed) => {
            anyhow::bail!(
                "input closed with {} targets remaining (seed {})",
                state.remaining_targets,
                seed
            )
        }
        Err(e) => Err(e).context("console session failed"),
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
