//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are kept apart from
//! board storage so the controller can re-check a board after an animation
//! finishes without touching game state.

pub mod win;

pub use win::{Evaluation, WIN_LINES, WinLine, evaluate, winning_line};
