//! Named cells of the 3x3 board.

use super::types::Board;
use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// A cell on the tic-tac-toe board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts position to board index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Row of this cell (0-2).
    pub fn row(self) -> usize {
        self.to_index() / 3
    }

    /// Column of this cell (0-2).
    pub fn column(self) -> usize {
        self.to_index() % 3
    }

    /// Creates a position from a board index, `None` outside `0..9`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Creates a position from row and column, `None` outside the board.
    pub fn from_row_column(row: usize, column: usize) -> Option<Self> {
        if row >= 3 || column >= 3 {
            return None;
        }
        Self::from_index(row * 3 + column)
    }

    /// Parses a board index or a (partial, case-insensitive) label.
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        if let Ok(num) = s.trim().parse::<usize>() {
            return Self::from_index(num);
        }

        let s_lower = s.trim().to_lowercase();
        if s_lower.is_empty() {
            return None;
        }
        <Position as strum::IntoEnumIterator>::iter().find(|pos| {
            let label = pos.label().to_lowercase();
            label == s_lower || label.starts_with(&s_lower)
        })
    }

    /// Returns the empty cells of `board` in index order.
    #[instrument(skip(board))]
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_matches_row_major() {
        for (index, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), index);
            assert_eq!(pos.row() * 3 + pos.column(), index);
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_from_row_column() {
        assert_eq!(Position::from_row_column(1, 1), Some(Position::Center));
        assert_eq!(Position::from_row_column(2, 0), Some(Position::BottomLeft));
        assert_eq!(Position::from_row_column(3, 0), None);
    }

    #[test]
    fn test_from_label_or_number() {
        assert_eq!(Position::from_label_or_number("4"), Some(Position::Center));
        assert_eq!(Position::from_label_or_number("bottom-r"), Some(Position::BottomRight));
        assert_eq!(Position::from_label_or_number("Center"), Some(Position::Center));
        assert_eq!(Position::from_label_or_number("12"), None);
        assert_eq!(Position::from_label_or_number(""), None);
    }

    #[test]
    fn test_valid_moves_filters_occupied() {
        let board = Board::with_marks([
            (Position::TopLeft, crate::Player::X),
            (Position::Center, crate::Player::O),
        ]);
        let moves = Position::valid_moves(&board);
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Position::TopLeft));
        assert!(!moves.contains(&Position::Center));
        assert_eq!(moves.first(), Some(&Position::TopCenter));
        assert_eq!(Position::valid_moves(&Board::new()), Position::ALL.to_vec());
    }
}
