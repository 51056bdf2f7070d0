//! Keyboard and mouse mapping.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use scribble_core::{Board, Position};

/// What an input event asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Play at a cell.
    Play(Position),
    /// Move the keyboard cursor.
    MoveCursor(Position),
    /// Pointer click at a terminal cell.
    Click {
        /// Terminal column.
        column: u16,
        /// Terminal row.
        row: u16,
    },
    /// Start a new game.
    Reset,
    /// Leave the program.
    Quit,
    /// Repaint everything.
    Redraw,
    /// Nothing to do.
    Nothing,
}

/// Moves the cursor one cell with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let (row, column) = match key {
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => ((row + 1).min(2), column),
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, (column + 1).min(2)),
        _ => (row, column),
    };
    Position::from_row_column(row, column).unwrap_or(cursor)
}

/// Moves the cursor off a taken cell onto the next free one, wrapping
/// around the board. A full board leaves it where it is.
pub fn park_cursor(cursor: Position, board: &Board) -> Position {
    let free = Position::valid_moves(board);
    free.iter()
        .find(|pos| pos.to_index() >= cursor.to_index())
        .or_else(|| free.first())
        .copied()
        .unwrap_or(cursor)
}

/// Maps a terminal event to an action, given the current cursor cell.
pub fn map_event(event: &Event, cursor: Position) -> Action {
    match event {
        Event::Key(key) => map_key(key, cursor),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => Action::Click {
            column: *column,
            row: *row,
        },
        Event::Resize(..) | Event::FocusGained => Action::Redraw,
        _ => Action::Nothing,
    }
}

fn map_key(key: &KeyEvent, cursor: Position) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Nothing;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('n') | KeyCode::Char('r') => Action::Reset,
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            Position::from_index(index).map_or(Action::Nothing, Action::Play)
        }
        KeyCode::Enter | KeyCode::Char(' ') => Action::Play(cursor),
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            Action::MoveCursor(move_cursor(cursor, code))
        }
        _ => Action::Nothing,
    }
}
