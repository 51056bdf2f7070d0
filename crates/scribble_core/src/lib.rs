//! Scribble core - animated two-player tic-tac-toe
//!
//! Game rules, a frame-stepped animation engine and the controller that ties
//! them together. Nothing here touches a terminal, a window or a clock:
//! drawing goes through a [`Renderer`], deferred work through a [`Timer`].
//!
//! # Architecture
//!
//! - **Rules**: board, moves and win/draw evaluation
//! - **Animation**: mark strokes, confetti and a single-flight scheduler
//! - **Controller**: input routing and the round state machine
//! - **Scene**: the decorative chrome around the board
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use scribble_core::{BoardLayout, DisplayList, GameController, Settings, TimerQueue};
//! use std::time::Duration;
//!
//! let mut canvas = DisplayList::new();
//! let mut timer = TimerQueue::new();
//! let mut game = GameController::new(
//!     Settings::default(),
//!     BoardLayout::default(),
//!     StdRng::seed_from_u64(7),
//!     &mut canvas,
//! )?;
//!
//! game.select_cell(4, &mut canvas, &mut timer)?;
//! while let Some(tick) = timer.pop_due(Duration::MAX) {
//!     game.on_tick(tick, &mut canvas, &mut timer);
//! }
//! assert_eq!(game.state().history().len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod animation;
mod controller;
mod geometry;
mod position;
mod render;
mod rules;
mod scene;
mod settings;
mod timer;
mod types;

// Crate-level exports - Game model
pub use action::{Accepted, Rejected};
pub use position::Position;
pub use types::{Board, GameState, GameStatus, Player, Square};

// Crate-level exports - Rules
pub use rules::{Evaluation, WIN_LINES, WinLine, evaluate, winning_line};

// Crate-level exports - Animation
pub use animation::{
    ARC_START_DEG, AnimationScheduler, AnimationTask, Completion, ConfettiParticle,
    ConfettiSimulator, Epoch, MarkAnimation, MarkFrame, ScheduledTick, SchedulerError, Segment,
    TaskId, TaskKind, TickOutcome, Visual, jitter,
};

// Crate-level exports - Controller
pub use controller::{ControllerPhase, GameController, Response};

// Crate-level exports - Geometry and rendering
pub use geometry::{BoardLayout, ClickTarget, Point, Rect};
pub use render::{DisplayList, Font, Handle, Renderer, Rgb, Shape};
pub use scene::{
    BG_BOTTOM, BG_TOP, DRAW_COLOR, GLOW, HIGHLIGHT, O_COLOR, RESET_LABEL, Scene, TILE_COLORS,
    X_COLOR, mark_color, status_line,
};

// Crate-level exports - Settings and timing
pub use settings::{AnimationSettings, ConfettiSettings, Settings, SettingsError};
pub use timer::{Timer, TimerQueue};
