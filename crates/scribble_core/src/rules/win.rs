//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

/// Three cells forming a row, column or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// The three cells, in ascending index order.
    pub fn cells(&self) -> [Position; 3] {
        self.0
    }

    /// The three cells as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// First cell of the line.
    pub fn start(&self) -> Position {
        self.0[0]
    }

    /// Last cell of the line.
    pub fn end(&self) -> Position {
        self.0[2]
    }

    /// Returns the player owning all three cells, if any.
    pub fn owner(&self, board: &Board) -> Option<Player> {
        let [a, b, c] = self.0;
        let first = board.get(a);
        match first {
            Square::Occupied(player) if board.get(b) == first && board.get(c) == first => {
                Some(player)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for WinLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "({a}, {b}, {c})")
    }
}

/// All winning lines: rows, then columns, then diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinLine([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinLine([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinLine([Position::TopRight, Position::Center, Position::BottomLeft]),
];

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Evaluation {
    /// No line is complete and empty squares remain.
    Undecided,
    /// `player` owns every cell of `line`.
    Win {
        /// Owner of the line.
        player: Player,
        /// First complete line in table order.
        line: WinLine,
    },
    /// The board is full with no complete line.
    Draw,
}

/// Returns the first complete line in table order and its owner.
#[instrument(skip(board))]
pub fn winning_line(board: &Board) -> Option<(Player, WinLine)> {
    let mut complete = WIN_LINES
        .iter()
        .filter_map(|line| line.owner(board).map(|player| (player, *line)));

    let first = complete.next()?;
    let rival = complete.find(|(player, _)| *player != first.0);
    if let Some((other, line)) = rival {
        error!(
            first_player = %first.0,
            first_line = %first.1,
            %other,
            %line,
            "Both players own a complete line"
        );
    }
    debug_assert!(rival.is_none(), "both players own a complete line");
    Some(first)
}

/// Evaluates a board for a win or a draw.
///
/// A draw is a full board with no complete line.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some((player, line)) = winning_line(board) {
        return Evaluation::Win { player, line };
    }
    if board.is_full() {
        Evaluation::Draw
    } else {
        Evaluation::Undecided
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(winning_line(&board), None);
        assert_eq!(evaluate(&board), Evaluation::Undecided);
    }

    #[test]
    fn test_winner_top_row() {
        let board = Board::with_marks([
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
            (Position::TopRight, Player::X),
        ]);
        assert_eq!(
            evaluate(&board),
            Evaluation::Win {
                player: Player::X,
                line: WIN_LINES[0],
            }
        );
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let board = Board::with_marks([
            (Position::TopRight, Player::O),
            (Position::Center, Player::O),
            (Position::BottomLeft, Player::O),
        ]);
        let (player, line) = winning_line(&board).unwrap();
        assert_eq!(player, Player::O);
        assert_eq!(line.indices(), [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = Board::with_marks([
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
        ]);
        assert_eq!(evaluate(&board), Evaluation::Undecided);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = Board::with_marks([
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::O),
            (Position::TopRight, Player::X),
        ]);
        assert_eq!(WIN_LINES[0].owner(&board), None);
    }

    #[test]
    fn test_double_line_takes_table_order() {
        // X X X
        // X O O
        // X O O
        let board = Board::with_marks([
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::X),
            (Position::TopRight, Player::X),
            (Position::MiddleLeft, Player::X),
            (Position::BottomLeft, Player::X),
            (Position::Center, Player::O),
            (Position::MiddleRight, Player::O),
            (Position::BottomCenter, Player::O),
            (Position::BottomRight, Player::O),
        ]);
        assert_eq!(winning_line(&board).unwrap().1, WIN_LINES[0]);
    }

    #[test]
    fn test_full_board_without_line_is_a_draw() {
        // X O X
        // O X X
        // O X O
        let board = Board::with_marks([
            (Position::TopLeft, Player::X),
            (Position::TopCenter, Player::O),
            (Position::TopRight, Player::X),
            (Position::MiddleLeft, Player::O),
            (Position::Center, Player::X),
            (Position::MiddleRight, Player::X),
            (Position::BottomLeft, Player::O),
            (Position::BottomCenter, Player::X),
            (Position::BottomRight, Player::O),
        ]);
        assert_eq!(winning_line(&board), None);
        assert_eq!(evaluate(&board), Evaluation::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        let board = Board::with_marks(Position::ALL.map(|pos| (pos, Player::X)));
        assert!(board.is_full());
        assert!(matches!(evaluate(&board), Evaluation::Win { player: Player::X, .. }));
    }

    #[test]
    fn test_line_display() {
        assert_eq!(WIN_LINES[6].to_string(), "(0, 4, 8)");
    }
}
