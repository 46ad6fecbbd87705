//! Key and mouse mapping from terminal events to board input.

use crate::types::{BoardAction, Pos};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// Keyboard intent, before the cursor resolves it to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    MoveCursor { d_row: i32, d_col: i32 },
    /// Blast the group under the cursor
    Select,
    Restart,
}

/// Map keyboard input to a command. Key releases are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let step = |d_row, d_col| Some(KeyCommand::MoveCursor { d_row, d_col });
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => step(0, -1),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => step(0, 1),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => step(-1, 0),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => step(1, 0),

        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyCommand::Select),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyCommand::Restart),

        _ => None,
    }
}

/// Map a left click to a selection of the cell under it.
///
/// `hit_test` converts terminal coordinates to a board cell; clicks outside
/// the board yield nothing.
pub fn handle_mouse_event(
    mouse: MouseEvent,
    hit_test: impl Fn(u16, u16) -> Option<Pos>,
) -> Option<BoardAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            hit_test(mouse.column, mouse.row).map(|pos| BoardAction::Select {
                row: pos.row,
                col: pos.col,
            })
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
