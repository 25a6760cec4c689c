use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::thread::sleep;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use snake::cli::Cli;
use snake::config::GameConfig;
use snake::game::{self, GameState, POST_GAME_POLL};
use snake::term::{TermInput, TermManager, TermSession};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path).context("failed to load config")?,
        None => GameConfig::default(),
    };
    let config = cli.apply_overrides(config);
    config.validate().context("invalid board settings")?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, rows = config.rows, cols = config.cols, "Configured");
    let mut rng = StdRng::seed_from_u64(seed);

    let board = config.board();
    let mut state = GameState::new(config, &mut rng);

    let mut term = TermManager::new(board)?;
    // The session restores the terminal when it goes out of scope, on errors too.
    let _session = TermSession::acquire().context("failed to set up terminal")?;
    let mut input = TermInput;

    let status = game::run(&mut state, &mut input, &mut term, &mut rng, sleep)?;
    info!(?status, score = state.score(), "Waiting for quit");
    game::wait_for_quit(&mut input, sleep, POST_GAME_POLL)?;

    Ok(())
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")?;

    Ok(())
}
