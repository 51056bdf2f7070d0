//! Move acceptance and rejection.

use super::{GameStatus, Player, Position};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A move that was written to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Accepted {
    /// The player who moved.
    player: Player,
    /// The cell that was marked.
    position: Position,
    /// Game status after the move.
    status: GameStatus,
}

impl std::fmt::Display for Accepted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Why a move was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Rejected {
    /// The index does not name a cell.
    #[display("Index {} is outside the board", _0)]
    OutOfBounds(#[error(not(source))] usize),

    /// The cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),

    /// The game already ended.
    #[display("Game is already over")]
    GameOver,

    /// A mark is still being drawn.
    #[display("A move is still animating")]
    Animating,
}
