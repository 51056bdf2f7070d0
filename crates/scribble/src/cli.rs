//! Command-line interface for scribble.

use clap::{Parser, Subcommand};
use scribble_core::Position;
use std::path::PathBuf;

/// Scribble - hand-drawn tic-tac-toe for the terminal
#[derive(Parser, Debug)]
#[command(name = "scribble")]
#[command(about = "Two-player tic-tac-toe with animated strokes and confetti", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for tile colors and confetti (random when omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// File the log is written to
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal (mouse or keys 1-9)
    Play,

    /// Play a list of cell indices headlessly and print the result
    Replay {
        /// Cells in play order, X first: indices 0-8 or labels such as
        /// `center` or `top-l`
        #[arg(required = true, value_parser = parse_move)]
        moves: Vec<usize>,
    },
}

/// Numbers pass through unchecked so the game can refuse them; labels must
/// name a cell.
fn parse_move(s: &str) -> Result<usize, String> {
    if let Ok(index) = s.trim().parse::<usize>() {
        return Ok(index);
    }
    Position::from_label_or_number(s)
        .map(Position::to_index)
        .ok_or_else(|| format!("'{}' is not a cell index or label", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_play() {
        let cli = Cli::parse_from(["scribble"]);
        assert_eq!(cli.command, None);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_replay_with_global_flags() {
        let cli = Cli::parse_from(["scribble", "replay", "0", "1", "4", "--seed", "9"]);
        assert_eq!(cli.command, Some(Command::Replay { moves: vec![0, 1, 4] }));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn test_replay_accepts_labels() {
        let cli = Cli::parse_from(["scribble", "replay", "center", "top-l", "12"]);
        assert_eq!(cli.command, Some(Command::Replay { moves: vec![4, 0, 12] }));
        assert!(Cli::try_parse_from(["scribble", "replay", "nowhere"]).is_err());
    }

    #[test]
    fn test_replay_needs_moves() {
        assert!(Cli::try_parse_from(["scribble", "replay"]).is_err());
    }
}
