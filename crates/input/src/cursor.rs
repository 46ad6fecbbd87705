//! Keyboard cursor over the board.

use crate::map::KeyCommand;
use crate::types::{BoardAction, Pos};

/// Selected cell, always kept on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Pos,
    rows: i32,
    columns: i32,
}

impl Cursor {
    /// Starts at the bottom-left cell, where groups tend to form first.
    pub fn new(rows: i32, columns: i32) -> Self {
        Self {
            pos: Pos::new((rows - 1).max(0), 0),
            rows: rows.max(1),
            columns: columns.max(1),
        }
    }

    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Jump to `pos`, clamped to the board (used when the mouse clicks).
    pub fn set(&mut self, pos: Pos) {
        self.pos = Pos::new(
            pos.row.clamp(0, self.rows - 1),
            pos.col.clamp(0, self.columns - 1),
        );
    }

    pub fn resize(&mut self, rows: i32, columns: i32) {
        self.rows = rows.max(1);
        self.columns = columns.max(1);
        self.set(self.pos);
    }

    /// Apply a key command. Cursor moves are absorbed; the rest become
    /// board actions.
    pub fn apply(&mut self, cmd: KeyCommand) -> Option<BoardAction> {
        match cmd {
            KeyCommand::MoveCursor { d_row, d_col } => {
                self.set(Pos::new(self.pos.row + d_row, self.pos.col + d_col));
                None
            }
            KeyCommand::Select => Some(BoardAction::Select {
                row: self.pos.row,
                col: self.pos.col,
            }),
            KeyCommand::Restart => Some(BoardAction::Restart),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_are_clamped_to_the_board() {
        let mut cursor = Cursor::new(3, 4);
        assert_eq!(cursor.pos(), Pos::new(2, 0));

        assert_eq!(cursor.apply(KeyCommand::MoveCursor { d_row: 1, d_col: -1 }), None);
        assert_eq!(cursor.pos(), Pos::new(2, 0));

        for _ in 0..10 {
            cursor.apply(KeyCommand::MoveCursor { d_row: -1, d_col: 1 });
        }
        assert_eq!(cursor.pos(), Pos::new(0, 3));
    }

    #[test]
    fn select_uses_cursor_position() {
        let mut cursor = Cursor::new(5, 5);
        cursor.set(Pos::new(1, 2));
        assert_eq!(
            cursor.apply(KeyCommand::Select),
            Some(BoardAction::Select { row: 1, col: 2 })
        );
        assert_eq!(cursor.apply(KeyCommand::Restart), Some(BoardAction::Restart));
    }

    #[test]
    fn resize_pulls_cursor_back_inside() {
        let mut cursor = Cursor::new(8, 8);
        cursor.set(Pos::new(7, 7));
        cursor.resize(4, 3);
        assert_eq!(cursor.pos(), Pos::new(3, 2));
    }
}
