//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::GameConfig;
use crate::BoardInt;

/// Snake in the terminal. Arrow keys or WASD to steer, X to quit.
#[derive(Parser, Debug)]
#[command(name = "snake")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML file with game settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board height in cells, border included
    #[arg(long)]
    pub rows: Option<BoardInt>,

    /// Board width in cells, border included
    #[arg(long)]
    pub cols: Option<BoardInt>,

    /// Seed for fruit placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: GameConfig) -> GameConfig {
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        config
    }
}
