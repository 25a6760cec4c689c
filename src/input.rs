//! Key decoding and heading updates.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::trace;

use crate::error::GameError;
use crate::snake::Direction::{self, *};

/// One decoded input event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
    None,
}

/// What the loop should do after a command was applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Non-blocking supplier of commands. Returns [`Command::None`] when no key is
/// waiting and decodes at most one key per call.
pub trait InputSource {
    fn poll_command(&mut self) -> Result<Command, GameError>;
}

pub fn decode_key(ev: &KeyEvent) -> Command {
    if ev.kind == KeyEventKind::Release {
        return Command::None;
    }

    if is_ctrl_c(ev) {
        return Command::Quit;
    }

    match ev.code {
        KeyCode::Up | KeyCode::Char('w') => Command::Turn(Up),
        KeyCode::Down | KeyCode::Char('s') => Command::Turn(Down),
        KeyCode::Left | KeyCode::Char('a') => Command::Turn(Left),
        KeyCode::Right | KeyCode::Char('d') => Command::Turn(Right),
        KeyCode::Char('x') | KeyCode::Char('X') => Command::Quit,
        _ => Command::None,
    }
}

/// Applies `command` to the current heading. A turn straight back into the
/// snake's neck is dropped and the heading is kept.
pub fn apply_command(heading: &mut Option<Direction>, command: Command) -> Control {
    match command {
        Command::Quit => return Control::Quit,
        Command::Turn(dir) => {
            if heading.map_or(false, |current| current.is_opposite(dir)) {
                trace!(?heading, requested = ?dir, "Ignoring reversal");
            } else {
                *heading = Some(dir);
            }
        }
        Command::None => {}
    }

    Control::Continue
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn decodes_arrows_and_wasd() {
        assert_eq!(decode_key(&key(KeyCode::Up)), Command::Turn(Up));
        assert_eq!(decode_key(&key(KeyCode::Char('s'))), Command::Turn(Down));
        assert_eq!(decode_key(&key(KeyCode::Left)), Command::Turn(Left));
        assert_eq!(decode_key(&key(KeyCode::Char('d'))), Command::Turn(Right));
    }

    #[test]
    fn decodes_quit_keys() {
        assert_eq!(decode_key(&key(KeyCode::Char('x'))), Command::Quit);
        assert_eq!(decode_key(&key(KeyCode::Char('X'))), Command::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(decode_key(&ctrl_c), Command::Quit);
        assert_eq!(decode_key(&key(KeyCode::Char('c'))), Command::None);
    }

    #[test]
    fn ignores_other_keys_and_releases() {
        assert_eq!(decode_key(&key(KeyCode::Enter)), Command::None);
        assert_eq!(decode_key(&key(KeyCode::Char('q'))), Command::None);

        let mut release = key(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(decode_key(&release), Command::None);
    }

    #[test]
    fn first_turn_sets_heading() {
        let mut heading = None;

        assert_eq!(apply_command(&mut heading, Command::Turn(Left)), Control::Continue);
        assert_eq!(heading, Some(Left));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut heading = Some(Right);

        apply_command(&mut heading, Command::Turn(Left));
        assert_eq!(heading, Some(Right));

        apply_command(&mut heading, Command::Turn(Up));
        assert_eq!(heading, Some(Up));
    }

    #[test]
    fn no_input_keeps_heading() {
        let mut heading = Some(Down);
        assert_eq!(apply_command(&mut heading, Command::None), Control::Continue);
        assert_eq!(heading, Some(Down));

        let mut unset = None;
        apply_command(&mut unset, Command::None);
        assert_eq!(unset, None);
    }

    #[test]
    fn quit_leaves_heading_alone() {
        let mut heading = Some(Up);
        assert_eq!(apply_command(&mut heading, Command::Quit), Control::Quit);
        assert_eq!(heading, Some(Up));
    }
}
