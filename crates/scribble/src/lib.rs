//! Scribble - hand-drawn tic-tac-toe in the terminal
//!
//! Front ends for [`scribble_core`]: an interactive terminal UI and a
//! headless replay, sharing one configuration layer.
//!
//! # Architecture
//!
//! - **Config**: TOML settings file plus command-line overrides
//! - **TUI**: crossterm input, half-block rendering through ratatui
//! - **Replay**: scripted moves on a virtual clock

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod replay;
pub mod tui;

pub use config::{AppConfig, ConfigError};
pub use replay::{ReplayReport, run_replay};
