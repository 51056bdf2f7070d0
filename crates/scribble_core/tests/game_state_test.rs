//! Tests for move application, evaluation and reset.

use scribble_core::{
    Board, Evaluation, GameState, GameStatus, Player, Position, Rejected, Square, WIN_LINES,
    evaluate,
};

fn play(moves: &[usize]) -> GameState {
    let mut state = GameState::new();
    for &index in moves {
        state.apply_move(index).expect("scripted move should be legal");
    }
    state
}

#[test]
fn test_diagonal_win_scenario() {
    let state = play(&[0, 1, 4, 2, 8]);
    let GameStatus::Won { player, line } = *state.status() else {
        panic!("expected a win, got {:?}", state.status());
    };
    assert_eq!(player, Player::X);
    assert_eq!(line.indices(), [0, 4, 8]);
    // The winner keeps the turn so the status line can name them.
    assert_eq!(state.current_player(), Player::X);
}

#[test]
fn test_full_board_draw_scenario() {
    let state = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(*state.status(), GameStatus::Draw);
    assert!(state.board().is_full());
    assert_eq!(evaluate(state.board()), Evaluation::Draw);
}

#[test]
fn test_cells_are_write_once() {
    let moves = [4, 0, 8, 2, 1, 7, 6, 3, 5];
    let mut state = GameState::new();
    let mut seen: Vec<Board> = Vec::new();
    for index in moves {
        if state.status().is_terminal() {
            break;
        }
        state.apply_move(index).unwrap();
        for earlier in &seen {
            for pos in Position::ALL {
                if earlier.get(pos) != Square::Empty {
                    assert_eq!(earlier.get(pos), state.board().get(pos), "{pos} changed");
                }
            }
        }
        seen.push(state.board().clone());
    }
}

#[test]
fn test_rejections_leave_state_unchanged() {
    let mut state = play(&[4]);
    let before = state.clone();

    assert_eq!(state.apply_move(4), Err(Rejected::Occupied(Position::Center)));
    assert_eq!(state, before);
    assert_eq!(state.apply_move(9), Err(Rejected::OutOfBounds(9)));
    assert_eq!(state, before);

    let mut finished = play(&[0, 1, 4, 2, 8]);
    let snapshot = finished.clone();
    assert_eq!(finished.apply_move(5), Err(Rejected::GameOver));
    assert_eq!(finished.apply_move(5), Err(Rejected::GameOver));
    assert_eq!(finished, snapshot);
}

#[test]
fn test_turns_alternate_until_terminal() {
    let mut state = GameState::new();
    assert_eq!(state.current_player(), Player::X);
    let accepted = state.apply_move(0).unwrap();
    assert_eq!(*accepted.player(), Player::X);
    assert_eq!(*accepted.status(), GameStatus::InProgress);
    assert_eq!(state.current_player(), Player::O);
    state.apply_move(3).unwrap();
    assert_eq!(state.current_player(), Player::X);
    assert_eq!(state.history(), &[Position::TopLeft, Position::MiddleLeft]);
}

#[test]
fn test_reset_from_any_state() {
    for moves in [&[][..], &[4, 0][..], &[0, 1, 4, 2, 8][..], &[0, 1, 2, 4, 3, 5, 7, 6, 8][..]] {
        let mut state = play(moves);
        state.reset();
        assert!(Position::ALL.iter().all(|pos| state.board().is_empty(*pos)));
        assert_eq!(state.current_player(), Player::X);
        assert_eq!(*state.status(), GameStatus::InProgress);
        assert!(state.history().is_empty());
    }
}

#[test]
fn test_every_line_wins_for_its_owner() {
    for line in WIN_LINES {
        for player in [Player::X, Player::O] {
            let board = Board::with_marks(line.cells().map(|pos| (pos, player)));
            assert_eq!(evaluate(&board), Evaluation::Win { player, line }, "line {line}");
        }
    }
}

#[test]
fn test_empty_board_is_undecided() {
    assert_eq!(evaluate(&Board::new()), Evaluation::Undecided);
}

#[test]
fn test_rejection_messages() {
    assert!(Rejected::Occupied(Position::Center).to_string().contains("occupied"));
    assert!(Rejected::OutOfBounds(12).to_string().contains("12"));
    assert_eq!(Rejected::GameOver.to_string(), "Game is already over");
}
