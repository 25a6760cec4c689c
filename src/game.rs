use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::input::{apply_command, Command, Control, InputSource};
use crate::render::{RenderSink, Snapshot};
use crate::snake::{Collision, Direction, Snake};
use crate::Coords;

/// How often the post-game screen checks for the quit key.
pub const POST_GAME_POLL: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOverSelf,
    GameOverWall,
    Won,
    Quit,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FruitOutcome {
    /// A new fruit was placed.
    Respawned(Coords),
    /// No free cell is left for a new fruit.
    BoardFull,
}

#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    snake: Snake,
    fruit: Coords,
    score: u32,
    heading: Option<Direction>,
    status: Status,
}

impl GameState {
    /// A fresh game: a one-segment snake at the board center with no heading yet.
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Self {
        let board = config.board();
        // One spare slot for the duplicated tail left by growth on a full board.
        let snake = Snake::new(board.center(), board.interior_cells() + 1);
        let fruit = spawn_fruit(&board, &snake, config.fruit_avoids_snake, rng)
            .unwrap_or_else(|| board.random_interior(rng));

        GameState::from_parts(config, snake, fruit, 0, None)
    }

    pub fn from_parts(
        config: GameConfig,
        snake: Snake,
        fruit: Coords,
        score: u32,
        heading: Option<Direction>,
    ) -> Self {
        let board = config.board();
        GameState { config, board, snake, fruit, score, heading, status: Status::Running }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> Coords {
        self.fruit
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn heading(&self) -> Option<Direction> {
        self.heading
    }

    pub fn heading_mut(&mut self) -> &mut Option<Direction> {
        &mut self.heading
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval(self.score)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            segments: self.snake.body().iter().copied().collect(),
            fruit: self.fruit,
            score: self.score,
        }
    }

    /// One logic tick. Without a heading the snake has not started moving and
    /// nothing happens.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Status, GameError> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let dir = match self.heading {
            Some(dir) => dir,
            None => return Ok(Status::Running),
        };

        self.snake.advance(dir);

        match self.snake.check_collision(&self.board) {
            Collision::Wall => {
                info!(head = ?self.snake.head(), "Snake hit the wall");
                self.status = Status::GameOverWall;
                return Ok(self.status);
            }
            Collision::SelfHit => {
                info!(head = ?self.snake.head(), "Snake hit itself");
                self.status = Status::GameOverSelf;
                return Ok(self.status);
            }
            Collision::None => {}
        }

        if self.snake.head() == self.fruit && self.consume_fruit(rng)? == FruitOutcome::BoardFull {
            info!(length = self.snake.len(), "No room left for fruit");
            self.status = Status::Won;
            return Ok(self.status);
        }

        // Exact match: a score that jumps past the target never wins.
        if self.score == self.config.win_score {
            self.status = Status::Won;
        }

        Ok(self.status)
    }

    /// Grows the snake by one, moves the fruit and adds the fruit's points.
    pub fn consume_fruit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<FruitOutcome, GameError> {
        let old_interval = self.tick_interval();

        self.snake.grow()?;

        let outcome = match spawn_fruit(&self.board, &self.snake, self.config.fruit_avoids_snake, rng) {
            Some(pos) => {
                self.fruit = pos;
                FruitOutcome::Respawned(pos)
            }
            None => FruitOutcome::BoardFull,
        };

        self.score += self.config.fruit_points;
        debug!(score = self.score, length = self.snake.len(), fruit = ?self.fruit, "Fruit eaten");

        let new_interval = self.tick_interval();
        if new_interval != old_interval {
            info!(score = self.score, tick_ms = new_interval.as_millis() as u64, "Speeding up");
        }

        Ok(outcome)
    }
}

/// Picks a uniformly random interior cell for the next fruit. With
/// `avoid_snake` only cells the snake does not cover are candidates.
pub fn spawn_fruit<R: Rng + ?Sized>(
    board: &Board,
    snake: &Snake,
    avoid_snake: bool,
    rng: &mut R,
) -> Option<Coords> {
    if !avoid_snake {
        return Some(board.random_interior(rng));
    }

    let choices: Vec<Coords> = board.interior().filter(|pos| !snake.occupies(*pos)).collect();
    choices.choose(rng).copied()
}

/// Plays one game until it ends, sleeping through `sleep` between ticks.
#[instrument(skip_all, fields(rows = state.board().rows(), cols = state.board().cols()))]
pub fn run<I, S, R, F>(
    state: &mut GameState,
    input: &mut I,
    sink: &mut S,
    rng: &mut R,
    mut sleep: F,
) -> Result<Status, GameError>
where
    I: InputSource + ?Sized,
    S: RenderSink + ?Sized,
    R: Rng + ?Sized,
    F: FnMut(Duration),
{
    info!(fruit = ?state.fruit, "Starting game");

    sink.draw_static(&state.board)?;
    sink.draw_full(&state.snapshot())?;

    while !state.status.is_terminal() {
        sleep(state.tick_interval());

        let command = input.poll_command()?;
        if apply_command(&mut state.heading, command) == Control::Quit {
            state.status = Status::Quit;
            break;
        }

        if state.heading.is_none() {
            sink.draw_full(&state.snapshot())?;
            continue;
        }

        let before = state.snapshot();
        if state.step(rng)?.is_terminal() {
            break;
        }
        sink.draw_update(&before, &state.snapshot())?;
    }

    info!(status = ?state.status, score = state.score, length = state.snake.len(), "Game finished");
    sink.draw_outcome(state.status, state.score)?;

    Ok(state.status)
}

/// Blocks until the player presses a quit key. Anything else is ignored.
pub fn wait_for_quit<I, F>(input: &mut I, mut sleep: F, poll_interval: Duration) -> Result<(), GameError>
where
    I: InputSource + ?Sized,
    F: FnMut(Duration),
{
    loop {
        loop {
            match input.poll_command()? {
                Command::Quit => return Ok(()),
                Command::None => break,
                Command::Turn(_) => {}
            }
        }

        sleep(poll_interval);
    }
}
