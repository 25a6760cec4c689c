use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use tracing::{debug, error, info};

use crate::board::Board;
use crate::error::GameError;
use crate::game::Status;
use crate::input::{decode_key, Command, InputSource};
use crate::render::{RenderSink, Snapshot};
use crate::Coords;

const BORDER_CHAR: char = '#';
const SNAKE_CHAR: char = '0';
const FRUIT_CHAR: char = '*';

const QUIT_HINT: &str = "Press 'X' to quit the game";
const FOOTER: &[&str] = &[
    "Welcome to the Snake Game!",
    "Use the arrow keys to move the snake.",
    "Eat the fruit (*) to grow and score points.",
    "Avoid running into the walls or the snake itself.",
];
/// Lines below the board: a gap, score, quit hint, a gap, then the footer.
const LINES_BELOW_BOARD: u16 = 4 + FOOTER.len() as u16;

/// Owns the terminal modes the game runs in. Raw mode, the alternate screen
/// and the hidden cursor are restored when this is dropped, whichever way the
/// game ends.
pub struct TermSession {
    stdout: Stdout,
}

impl TermSession {
    pub fn acquire() -> Result<Self, GameError> {
        terminal::enable_raw_mode()?;
        let mut session = TermSession { stdout: stdout() };

        execute!(
            session.stdout,
            EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::DisableBlinking
        )?;

        info!("Terminal session acquired");
        Ok(session)
    }
}

impl Drop for TermSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(
            self.stdout,
            ResetColor,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        ) {
            error!(?err, "failed to restore screen");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            error!(?err, "failed to disable raw mode");
        }
        info!("Terminal session released");
    }
}

/// Draws the game with cursor-addressed output.
pub struct TermManager {
    stdout: Stdout,
    board: Board,
}

impl TermManager {
    /// Fails when the terminal cannot fit the board and the text below it.
    pub fn new(board: Board) -> Result<Self, GameError> {
        let needed = required_size(&board);
        let available = terminal::size()?;

        if available.0 < needed.0 || available.1 < needed.1 {
            return Err(GameError::TerminalTooSmall { needed, available });
        }

        debug!(?needed, ?available, "Terminal size ok");
        Ok(TermManager { stdout: stdout(), board })
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> Result<(), GameError> {
        let (row, col) = pos;
        queue!(self.stdout, cursor::MoveTo(col as u16, row as u16), Print(ch))?;
        Ok(())
    }

    fn print_line(&mut self, row: u16, text: &str) -> Result<(), GameError> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )?;
        Ok(())
    }

    fn draw_score(&mut self, score: u32) -> Result<(), GameError> {
        let row = self.board.rows() as u16 + 1;
        self.print_line(row, &format!("Score = {}", score))
    }

    fn flush(&mut self) -> Result<(), GameError> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl RenderSink for TermManager {
    fn draw_static(&mut self, board: &Board) -> Result<(), GameError> {
        self.board = *board;
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        let (rows, cols) = (board.rows(), board.cols());
        for col in 0..cols {
            self.print_at((0, col), BORDER_CHAR)?;
            self.print_at((rows - 1, col), BORDER_CHAR)?;
        }
        for row in 1..rows - 1 {
            self.print_at((row, 0), BORDER_CHAR)?;
            self.print_at((row, cols - 1), BORDER_CHAR)?;
        }

        let below = rows as u16;
        self.draw_score(0)?;
        self.print_line(below + 2, QUIT_HINT)?;
        for (i, line) in FOOTER.iter().enumerate() {
            self.print_line(below + 4 + i as u16, line)?;
        }

        self.flush()
    }

    fn draw_full(&mut self, snapshot: &Snapshot) -> Result<(), GameError> {
        for &pos in &snapshot.segments {
            self.print_at(pos, SNAKE_CHAR)?;
        }
        self.print_at(snapshot.fruit, FRUIT_CHAR)?;
        self.draw_score(snapshot.score)?;
        self.flush()
    }

    fn draw_update(&mut self, before: &Snapshot, after: &Snapshot) -> Result<(), GameError> {
        let plan = before.cell_plan(after);

        for pos in plan.blank {
            self.print_at(pos, ' ')?;
        }
        for pos in plan.snake {
            self.print_at(pos, SNAKE_CHAR)?;
        }
        if let Some(fruit) = plan.fruit {
            self.print_at(fruit, FRUIT_CHAR)?;
        }

        if before.score != after.score {
            self.draw_score(after.score)?;
        }

        self.flush()
    }

    fn draw_outcome(&mut self, status: Status, score: u32) -> Result<(), GameError> {
        let (color, text) = match status {
            Status::GameOverSelf => (Color::Red, "You hit yourself"),
            Status::GameOverWall => (Color::Red, "You hit the boundary"),
            Status::Won => (Color::Green, "You are a winner"),
            Status::Quit | Status::Running => (Color::Red, "Game Over"),
        };

        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(color),
            Print(text),
            ResetColor,
            cursor::MoveTo(0, 1),
            Print(format!("Score = {}", score)),
            cursor::MoveTo(0, 2),
            Print(QUIT_HINT)
        )?;

        self.flush()
    }
}

/// Reads keys from the terminal without blocking.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_command(&mut self) -> Result<Command, GameError> {
        let command = next_command(|| {
            if poll(Duration::ZERO)? {
                read().map(Some)
            } else {
                Ok(None)
            }
        })?;
        Ok(command)
    }
}

/// Reads pending events until one decodes to a command or none are left.
/// Resizes, mouse events and key releases are consumed and skipped.
fn next_command(mut next_event: impl FnMut() -> io::Result<Option<Event>>) -> io::Result<Command> {
    while let Some(event) = next_event()? {
        if let Event::Key(ev) = event {
            let command = decode_key(&ev);
            if command != Command::None {
                return Ok(command);
            }
        }
    }
    Ok(Command::None)
}

/// `(cols, rows)` the terminal needs for `board`.
pub fn required_size(board: &Board) -> (u16, u16) {
    let text_width = FOOTER
        .iter()
        .chain(std::iter::once(&QUIT_HINT))
        .map(|line| line.len())
        .max()
        .unwrap_or(0) as u16;

    let cols = (board.cols() as u16).max(text_width);
    let rows = board.rows() as u16 + LINES_BELOW_BOARD;
    (cols, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_size_covers_board_and_footer() {
        let (cols, rows) = required_size(&Board::new(20, 40));
        assert_eq!(rows, 20 + 4 + FOOTER.len() as u16);
        assert_eq!(cols, 49);

        let (cols, _) = required_size(&Board::new(20, 120));
        assert_eq!(cols, 120);
    }

    fn queued(events: Vec<Event>) -> impl FnMut() -> io::Result<Option<Event>> {
        let mut events = events.into_iter();
        move || Ok(events.next())
    }

    #[test]
    fn next_command_skips_events_without_a_command() {
        use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

        let release = KeyEvent::new_with_kind(KeyCode::Up, KeyModifiers::NONE, KeyEventKind::Release);
        let quit = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let mut events = queued(vec![Event::Resize(80, 24), Event::Key(release), Event::Key(quit)]);

        assert_eq!(next_command(&mut events).unwrap(), Command::Quit);
        assert_eq!(next_command(&mut events).unwrap(), Command::None);
    }

    #[test]
    fn next_command_stops_at_the_first_command() {
        use crate::snake::Direction;
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

        let mut events = queued(vec![
            Event::FocusGained,
            Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)),
            Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
        ]);

        assert_eq!(next_command(&mut events).unwrap(), Command::Turn(Direction::Left));
        assert_eq!(next_command(&mut events).unwrap(), Command::Quit);
    }
}
