//! Participant port - the contract between the game loop and every player
//!
//! Learning agents, the heuristic Teacher, random baselines, and human
//! players all face the orchestrating loop through this one trait, so the
//! loop never needs to know which kind of player it is driving.

use crate::{
    Result,
    board::{Board, Outcome},
};

/// A player the game loop can drive through one episode.
///
/// The loop supplies the current board and expects an empty-cell
/// coordinate back; once the episode reaches a terminal state it calls
/// [`episode_over`] exactly once on every participant so adaptive players
/// can apply their terminal update and stateless ones can report or ignore
/// the result.
///
/// [`episode_over`]: Participant::episode_over
pub trait Participant {
    /// Choose an empty cell on the given board.
    ///
    /// Returns `(row, col)` with both coordinates in 0..3.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the board has no empty
    /// cell. That is a precondition violation by the caller, since the
    /// loop must not request moves on terminal boards.
    fn select_action(&mut self, board: &Board) -> Result<(usize, usize)>;

    /// Observe the final outcome of the episode.
    ///
    /// Called exactly once per episode, after the terminal state is
    /// reached. Adaptive participants apply their terminal backup here and
    /// reset any per-episode state.
    fn episode_over(&mut self, outcome: Outcome);

    /// Get the participant's name, used in summaries and logging.
    fn name(&self) -> &str;
}
