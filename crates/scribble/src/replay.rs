//! Headless play-through of a move list.

use crate::config::AppConfig;
use derive_getters::Getters;
use scribble_core::{
    BoardLayout, DisplayList, GameController, GameStatus, Rejected, SettingsError, TimerQueue,
    status_line,
};
use std::fmt;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Result of a replay.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ReplayReport {
    /// Final board as text.
    board: String,
    /// Final game status.
    status: GameStatus,
    /// Status line as it would be shown.
    status_line: String,
    /// Moves that were refused, with the reason.
    rejected: Vec<(usize, Rejected)>,
    /// Shapes left on the canvas.
    shapes: usize,
    /// Virtual time the animations took.
    elapsed: Duration,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        match &self.status {
            GameStatus::Won { line, .. } => writeln!(f, "{} Line {}", self.status_line, line)?,
            _ => writeln!(f, "{}", self.status_line)?,
        }
        for (index, reason) in &self.rejected {
            writeln!(f, "Skipped move {}: {}", index, reason)?;
        }
        write!(
            f,
            "{} shapes on the canvas after {} ms",
            self.shapes,
            self.elapsed.as_millis()
        )
    }
}

/// Plays `moves` through the controller on a virtual clock.
///
/// Each move's animation runs to completion before the next is offered.
/// Refused moves are recorded and skipped.
#[instrument(skip(config))]
pub fn run_replay(config: &AppConfig, moves: &[usize]) -> Result<ReplayReport, SettingsError> {
    let mut canvas = DisplayList::new();
    let mut timer = TimerQueue::new();
    let mut game = GameController::new(
        config.settings(),
        BoardLayout::default(),
        config.rng(),
        &mut canvas,
    )?;

    let mut rejected = Vec::new();
    for &index in moves {
        if let Err(reason) = game.select_cell(index, &mut canvas, &mut timer) {
            warn!(index, %reason, "Replay move refused");
            rejected.push((index, reason));
            continue;
        }
        while let Some(tick) = timer.pop_due(Duration::MAX) {
            game.on_tick(tick, &mut canvas, &mut timer);
        }
    }

    let state = game.state();
    let (status_line, _) = status_line(state.status(), state.current_player());
    info!(status = ?state.status(), moves = state.history().len(), "Replay finished");
    Ok(ReplayReport {
        board: state.board().display(),
        status: *state.status(),
        status_line,
        rejected,
        shapes: canvas.len(),
        elapsed: timer.now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AppConfig {
        AppConfig::default().with_overrides(Some(5), None)
    }

    #[test]
    fn test_replay_diagonal_win() {
        let report = run_replay(&seeded(), &[0, 1, 4, 2, 8]).unwrap();
        assert!(matches!(report.status(), GameStatus::Won { .. }));
        assert_eq!(report.status_line(), "Player X wins!");
        assert_eq!(report.board(), "X|O|O\n-+-+-\n4|X|6\n-+-+-\n7|8|X");
        assert!(report.rejected().is_empty());
        assert!(report.to_string().contains("Line (0, 4, 8)"));
    }

    #[test]
    fn test_replay_skips_refused_moves() {
        let report = run_replay(&seeded(), &[4, 4, 12, 0]).unwrap();
        assert_eq!(
            report.rejected(),
            &vec![
                (4, Rejected::Occupied(scribble_core::Position::Center)),
                (12, Rejected::OutOfBounds(12)),
            ]
        );
        assert_eq!(report.status_line(), "Player X's turn");
        // Two marks: ten X frames and sixteen O frames at 10ms.
        assert_eq!(*report.elapsed(), Duration::from_millis(260));
    }
}
