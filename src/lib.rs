pub mod board;
pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;

pub type BoardInt = i16;
/// A board cell as `(row, col)`.
pub type Coords = (BoardInt, BoardInt);

pub use error::{ConfigError, GameError};
