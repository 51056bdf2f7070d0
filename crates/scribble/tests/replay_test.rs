//! Tests for headless replays.

use scribble::{AppConfig, run_replay};
use scribble_core::GameStatus;

fn seeded(seed: u64) -> AppConfig {
    AppConfig::default().with_overrides(Some(seed), None)
}

#[test]
fn test_draw_replay() {
    let report = run_replay(&seeded(3), &[0, 1, 2, 4, 3, 5, 7, 6, 8]).unwrap();
    assert_eq!(*report.status(), GameStatus::Draw);
    assert_eq!(report.status_line(), "It's a draw!");
    assert!(!report.board().chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_moves_after_the_win_are_refused() {
    let report = run_replay(&seeded(3), &[0, 1, 4, 2, 8, 5]).unwrap();
    assert!(matches!(report.status(), GameStatus::Won { .. }));
    assert_eq!(report.rejected().len(), 1);
    assert_eq!(report.rejected()[0].0, 5);
    assert!(report.to_string().contains("Skipped move 5: Game is already over"));
}

#[test]
fn test_same_seed_same_canvas() {
    let a = run_replay(&seeded(11), &[4, 0, 8]).unwrap();
    let b = run_replay(&seeded(11), &[4, 0, 8]).unwrap();
    assert_eq!(a, b);
}
