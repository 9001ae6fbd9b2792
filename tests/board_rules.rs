//! Exhaustive validation of board invariants
//!
//! Sweeps every per-cell assignment of the 3x3 board (3^9 configurations)
//! rather than sampling, so line-priority and count-inference rules are
//! checked on every input they can ever see.

use noughts::{
    Board, Cell, Outcome, Player,
    lines::{LINES, line_winner},
};

fn board_from_code(mut code: usize) -> Board {
    let mut cells = [[Cell::Empty; 3]; 3];
    for row in 0..3 {
        for col in 0..3 {
            cells[row][col] = match code % 3 {
                0 => Cell::Empty,
                1 => Cell::X,
                _ => Cell::O,
            };
            code /= 3;
        }
    }
    Board::from_cells(cells)
}

fn complete_lines(board: &Board, player: Player) -> usize {
    LINES
        .iter()
        .filter(|line| line_winner(board, line) == Some(player))
        .count()
}

mod terminal_detection {
    use super::*;

    #[test]
    fn winning_line_never_yields_draw_or_in_progress() {
        for code in 0..19683 {
            let board = board_from_code(code);
            let x_lines = complete_lines(&board, Player::X);
            let o_lines = complete_lines(&board, Player::O);

            if x_lines + o_lines > 0 {
                assert!(
                    matches!(board.outcome(), Outcome::Win(_)),
                    "board with a complete line must report a win:\n{board}"
                );
            }
        }
    }

    #[test]
    fn single_winner_is_reported_regardless_of_line() {
        // Whenever only one mark holds complete lines, the outcome names
        // that mark no matter which of its lines sits first in priority.
        for code in 0..19683 {
            let board = board_from_code(code);
            let x_lines = complete_lines(&board, Player::X);
            let o_lines = complete_lines(&board, Player::O);

            if x_lines > 0 && o_lines == 0 {
                assert_eq!(board.outcome(), Outcome::Win(Player::X), "\n{board}");
            }
            if o_lines > 0 && x_lines == 0 {
                assert_eq!(board.outcome(), Outcome::Win(Player::O), "\n{board}");
            }
        }
    }

    #[test]
    fn no_line_splits_between_draw_and_in_progress() {
        for code in 0..19683 {
            let board = board_from_code(code);
            if complete_lines(&board, Player::X) + complete_lines(&board, Player::O) > 0 {
                continue;
            }

            let has_empty = !board.empty_cells().is_empty();
            let expected = if has_empty {
                Outcome::InProgress
            } else {
                Outcome::Draw
            };
            assert_eq!(board.outcome(), expected, "\n{board}");
        }
    }

    #[test]
    fn full_board_without_line_is_a_draw() {
        let board = Board::from_string("XOX XXO OXO").unwrap();
        assert_eq!(board.outcome(), Outcome::Draw);
    }
}

mod turn_inference {
    use super::*;

    #[test]
    fn last_mover_follows_mark_counts_everywhere() {
        for code in 0..19683 {
            let board = board_from_code(code);
            let (x_count, o_count) = board.mark_counts();

            match board.last_mover() {
                Ok(Player::O) => assert_eq!(x_count, o_count, "\n{board}"),
                Ok(Player::X) => assert_eq!(x_count, o_count + 1, "\n{board}"),
                Err(_) => assert!(
                    x_count != o_count && x_count != o_count + 1,
                    "valid counts must not error:\n{board}"
                ),
            }
        }
    }

    #[test]
    fn to_move_is_always_the_opponent_of_last_mover() {
        for code in 0..19683 {
            let board = board_from_code(code);
            if let Ok(mover) = board.last_mover() {
                assert_eq!(board.to_move().unwrap(), mover.opponent());
            }
        }
    }
}
