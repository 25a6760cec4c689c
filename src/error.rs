use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// The snake tried to grow past the capacity it was allocated with.
    #[error("snake length would exceed its capacity of {capacity} segments")]
    CapacityExceeded { capacity: usize },
    #[error("a snake needs at least one segment")]
    EmptyBody,
    #[error("terminal is {available:?} (cols, rows) but the game needs at least {needed:?}")]
    TerminalTooSmall { needed: (u16, u16), available: (u16, u16) },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("board {rows}x{cols} is too small, both sides must be at least {min}", min = crate::config::MIN_SIDE)]
    BoardTooSmall { rows: i16, cols: i16 },
    #[error("board {rows}x{cols} is too large, both sides must be at most {max}", max = crate::config::MAX_SIDE)]
    BoardTooLarge { rows: i16, cols: i16 },
    #[error("fruit_points must be greater than zero")]
    ZeroFruitPoints,
    #[error("tick intervals must be greater than zero")]
    ZeroTick,
}
