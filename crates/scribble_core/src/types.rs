//! Core domain types for tic-tac-toe.

use super::action::{Accepted, Rejected};
use super::position::Position;
use super::rules::{Evaluation, WinLine, evaluate};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from `(position, player)` marks.
    ///
    /// Later marks overwrite earlier ones; intended for fixtures and replays,
    /// not for play.
    pub fn with_marks(marks: impl IntoIterator<Item = (Position, Player)>) -> Self {
        let mut board = Self::new();
        for (pos, player) in marks {
            board.squares[pos.to_index()] = Square::Occupied(player);
        }
        board
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Gets the square at a raw index, `None` when out of bounds.
    pub fn get_index(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if every square is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Writes a mark into an empty square.
    ///
    /// Squares are write-once; the caller has already checked emptiness.
    fn place(&mut self, pos: Position, player: Player) {
        debug_assert!(self.is_empty(pos), "square {pos} written twice");
        self.squares[pos.to_index()] = Square::Occupied(player);
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(player) => player.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win along `line`.
    Won {
        /// The player who completed the line.
        player: Player,
        /// The completed line.
        line: WinLine,
    },
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Player to move, or the player who ended the game.
    current_player: Player,
    /// Game status.
    status: GameStatus,
    /// Positions played, in order.
    history: Vec<Position>,
}

impl GameState {
    /// Creates a new game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current player.
    ///
    /// Once the game is over this is the player who made the final move.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Places the current player's mark at `index`.
    ///
    /// Rejections leave the state untouched.
    #[instrument(skip(self), fields(player = %self.current_player))]
    pub fn apply_move(&mut self, index: usize) -> Result<Accepted, Rejected> {
        if self.status.is_terminal() {
            debug!("Move rejected: game is over");
            return Err(Rejected::GameOver);
        }

        let Some(position) = Position::from_index(index) else {
            debug!("Move rejected: index out of bounds");
            return Err(Rejected::OutOfBounds(index));
        };

        if !self.board.is_empty(position) {
            debug!(%position, "Move rejected: square occupied");
            return Err(Rejected::Occupied(position));
        }

        let player = self.current_player;
        self.board.place(position, player);
        self.history.push(position);

        self.status = match evaluate(&self.board) {
            Evaluation::Undecided => {
                self.current_player = player.opponent();
                GameStatus::InProgress
            }
            Evaluation::Win { player: winner, line } => {
                if winner != player {
                    error!(%winner, %player, "Completed line belongs to the non-moving player");
                    debug_assert_eq!(winner, player);
                }
                GameStatus::Won {
                    player: winner,
                    line,
                }
            }
            Evaluation::Draw => GameStatus::Draw,
        };

        debug!(%position, status = ?self.status, "Move applied");
        Ok(Accepted::new(player, position, self.status))
    }

    /// Returns the state to a fresh game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
