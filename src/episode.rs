//! Single-episode game loop

use crate::{
    Result,
    board::{Board, Outcome, Player},
    participant::Participant,
};

/// Play one episode between two participants, X moving first.
///
/// Each ply the active participant is asked for exactly one move, the move
/// is applied, and the board is checked for a terminal state. Once the
/// episode ends, by a win or after nine plies as a draw, `episode_over`
/// is called exactly once on both participants with the final outcome.
///
/// # Errors
///
/// Propagates any participant or board error; the episode is abandoned
/// without terminal notifications in that case, since a failed ply means a
/// precondition was violated and the outcome is undefined.
pub fn play_episode(
    player_x: &mut dyn Participant,
    player_o: &mut dyn Participant,
) -> Result<Outcome> {
    let mut board = Board::new();
    let mut outcome = Outcome::InProgress;

    for ply in 0..9 {
        let mover = if ply % 2 == 0 { Player::X } else { Player::O };
        let (row, col) = match mover {
            Player::X => player_x.select_action(&board)?,
            Player::O => player_o.select_action(&board)?,
        };

        board = board.place(row, col, mover)?;
        outcome = board.outcome();
        if outcome.is_terminal() {
            break;
        }
    }

    player_x.episode_over(outcome);
    player_o.episode_over(outcome);

    Ok(outcome)
}
