//! Temporal-difference learning agent
//!
//! The agent keeps a tabular value function over post-move board states
//! and updates it with a one-step TD rule: during play it bootstraps the
//! previously committed state toward the best value seen while choosing
//! greedily, and at episode end it backs the last committed state up
//! toward the terminal reward.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    board::{Board, Outcome, Player},
    enumerate,
    error::Result,
    participant::Participant,
    value_table::ValueTable,
};

/// Default learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.99;

/// Default exploration rate ε
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.1;

/// Default seed and reward value for a lost episode
pub const DEFAULT_LOSS_VALUE: f64 = -1.0;

/// The one prior (state, score) pair linking a committed move to the next
/// backup. Cleared at episode end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeTrace {
    /// The successor state committed to by the most recent action
    pub state: Board,
    /// The table score of that state at commit time
    pub score: f64,
}

/// Tabular TD(0) learning agent.
///
/// Construction enumerates every reachable post-move state for the agent's
/// player into the value table; any state missed by the pruned enumeration
/// is seeded lazily on first lookup.
#[derive(Debug, Clone)]
pub struct LearningAgent {
    table: ValueTable,
    player: Player,
    exploration_rate: f64,
    learning: bool,
    trace: Option<EpisodeTrace>,
    rng: StdRng,
}

impl LearningAgent {
    /// Create an agent with default parameters
    pub fn new(player: Player) -> Self {
        Self::with_parameters(
            player,
            DEFAULT_LEARNING_RATE,
            DEFAULT_EXPLORATION_RATE,
            DEFAULT_LOSS_VALUE,
            true,
        )
    }

    /// Create an agent with explicit parameters.
    ///
    /// # Arguments
    ///
    /// * `player` - Which mark the agent plays
    /// * `learning_rate` - α, the TD step size
    /// * `exploration_rate` - ε, the probability of a uniform random move
    /// * `loss_value` - Seed and terminal reward for an opponent win
    /// * `learning` - Whether backups modify the table
    pub fn with_parameters(
        player: Player,
        learning_rate: f64,
        exploration_rate: f64,
        loss_value: f64,
        learning: bool,
    ) -> Self {
        let mut table = ValueTable::new(player, learning_rate, loss_value);
        enumerate::seed_all_states(&mut table);

        Self {
            table,
            player,
            exploration_rate,
            learning,
            trace: None,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reseed the agent's random source for reproducible exploration
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn set_exploration_rate(&mut self, epsilon: f64) {
        self.exploration_rate = epsilon;
    }

    pub fn learning(&self) -> bool {
        self.learning
    }

    pub fn set_learning(&mut self, learning: bool) {
        self.learning = learning;
    }

    /// Borrow the value table for inspection
    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Get the value of a state, seeding it if absent
    pub fn lookup(&mut self, board: &Board) -> f64 {
        self.table.lookup(board)
    }

    /// Choose an empty cell with an ε-greedy policy.
    ///
    /// With probability ε a uniform random empty cell is taken; otherwise
    /// the cell whose successor state scores highest, ties broken by the
    /// first candidate in row-major order. The greedy branch first backs up
    /// the previous trace toward the maximum candidate value, then either
    /// branch records the chosen successor and its score as the new trace.
    pub fn select_action(&mut self, board: &Board) -> Result<(usize, usize)> {
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        let (row, col) = if self.rng.random::<f64>() < self.exploration_rate {
            moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(crate::Error::NoValidMoves)?
        } else {
            self.greedy(board, &moves)?
        };

        let successor = board.place(row, col, self.player)?;
        let score = self.table.lookup(&successor);
        self.trace = Some(EpisodeTrace {
            state: successor,
            score,
        });

        Ok((row, col))
    }

    /// Apply the terminal backup for the episode's outcome and clear the
    /// trace. The reward mapping is the same as the seeding mapping: own
    /// win 1.0, in-progress 0.5, draw 0.0, opponent win the loss value.
    pub fn episode_over(&mut self, outcome: Outcome) {
        let reward = self.table.seed_value(outcome);
        self.backup(reward);
        self.trace = None;
    }

    fn greedy(&mut self, board: &Board, moves: &[(usize, usize)]) -> Result<(usize, usize)> {
        let mut best: Option<((usize, usize), f64)> = None;

        for &(row, col) in moves {
            let successor = board.place(row, col, self.player)?;
            let value = self.table.lookup(&successor);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some(((row, col), value)),
            }
        }

        let (chosen, best_value) = best.ok_or(crate::Error::NoValidMoves)?;

        // Mid-episode bootstrap: the previous committed state moves toward
        // the best value available now, before the trace is overwritten.
        self.backup(best_value);

        Ok(chosen)
    }

    fn backup(&mut self, target: f64) {
        if !self.learning {
            return;
        }
        if let Some(trace) = self.trace {
            self.table.td_update(trace.state, trace.score, target);
        }
    }
}

impl Participant for LearningAgent {
    fn select_action(&mut self, board: &Board) -> Result<(usize, usize)> {
        LearningAgent::select_action(self, board)
    }

    fn episode_over(&mut self, outcome: Outcome) {
        LearningAgent::episode_over(self, outcome);
    }

    fn name(&self) -> &str {
        "TD-Agent"
    }
}
