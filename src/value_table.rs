//! State-value storage for temporal difference learning

use std::collections::HashMap;

use crate::board::{Board, Outcome, Player};

/// Value table mapping board states to desirability scores.
///
/// Scores are from the perspective of one designated player. Keys are the
/// board snapshots themselves (`Board` is `Copy + Hash`), order-sensitive
/// and not normalized for symmetry. Entries are created through seeding
/// only, eagerly by the state enumerator at agent construction and lazily
/// on first lookup, and are modified only through the TD update rule.
#[derive(Debug, Clone)]
pub struct ValueTable {
    values: HashMap<Board, f64>,
    player: Player,
    /// Learning rate α
    learning_rate: f64,
    /// Seed and reward value for an opponent win
    loss_value: f64,
}

impl ValueTable {
    /// Create an empty value table for the given player
    pub fn new(player: Player, learning_rate: f64, loss_value: f64) -> Self {
        Self {
            values: HashMap::new(),
            player,
            learning_rate,
            loss_value,
        }
    }

    /// The player whose perspective the scores encode
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn loss_value(&self) -> f64 {
        self.loss_value
    }

    /// Map an outcome to its seed (and terminal reward) value: 1.0 for an
    /// own win, 0.5 for a game still in progress, 0.0 for a draw, and the
    /// configured loss value for an opponent win.
    pub fn seed_value(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::Win(winner) if winner == self.player => 1.0,
            Outcome::InProgress => 0.5,
            Outcome::Draw => 0.0,
            Outcome::Win(_) => self.loss_value,
        }
    }

    /// Insert a state with its outcome-based seed value
    pub fn seed(&mut self, board: Board) {
        let value = self.seed_value(board.outcome());
        self.values.insert(board, value);
    }

    /// Get the value for a state, seeding it first if absent.
    ///
    /// The lazy insert fills any gap left by enumeration, so repeated
    /// lookups of the same state always return the same value until a TD
    /// update touches it.
    pub fn lookup(&mut self, board: &Board) -> f64 {
        if let Some(&value) = self.values.get(board) {
            return value;
        }
        let seeded = self.seed_value(board.outcome());
        self.values.insert(*board, seeded);
        seeded
    }

    /// Get the value for a state without seeding
    pub fn peek(&self, board: &Board) -> Option<f64> {
        self.values.get(board).copied()
    }

    /// Check whether a state already has an entry
    pub fn contains(&self, board: &Board) -> bool {
        self.values.contains_key(board)
    }

    /// Apply the one-step TD update: `value[board] += α * (target - recorded)`.
    ///
    /// `recorded` is the score captured when the state was committed to,
    /// which under single-table episodic play equals the stored value at
    /// update time.
    pub fn td_update(&mut self, board: Board, recorded: f64, target: f64) {
        let seeded = self.seed_value(board.outcome());
        let value = self.values.entry(board).or_insert(seeded);
        *value += self.learning_rate * (target - recorded);
    }

    /// Number of states with an entry
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_values_per_outcome() {
        let table = ValueTable::new(Player::X, 0.99, -1.0);
        assert_eq!(table.seed_value(Outcome::Win(Player::X)), 1.0);
        assert_eq!(table.seed_value(Outcome::InProgress), 0.5);
        assert_eq!(table.seed_value(Outcome::Draw), 0.0);
        assert_eq!(table.seed_value(Outcome::Win(Player::O)), -1.0);
    }

    #[test]
    fn test_seed_values_respect_perspective() {
        let table = ValueTable::new(Player::O, 0.99, -2.5);
        assert_eq!(table.seed_value(Outcome::Win(Player::O)), 1.0);
        assert_eq!(table.seed_value(Outcome::Win(Player::X)), -2.5);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let mut table = ValueTable::new(Player::X, 0.99, -1.0);
        let board = Board::from_string("X.. .O. ...").unwrap();

        let first = table.lookup(&board);
        let second = table.lookup(&board);
        assert_eq!(first, 0.5, "in-progress state should seed at 0.5");
        assert_eq!(first, second, "repeated lookup must not reseed");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_lookup_seeds_terminal_states() {
        let mut table = ValueTable::new(Player::X, 0.99, -1.0);
        let won = Board::from_string("XXX OO. ...").unwrap();
        let lost = Board::from_string("OOO XX. X..").unwrap();
        assert_eq!(table.lookup(&won), 1.0);
        assert_eq!(table.lookup(&lost), -1.0);
    }

    #[test]
    fn test_td_update_arithmetic() {
        let mut table = ValueTable::new(Player::X, 0.4, -1.0);
        let board = Board::from_string("X.. .O. ...").unwrap();

        let before = table.lookup(&board);
        table.td_update(board, before, 1.0);
        let after = table.peek(&board).unwrap();
        assert_eq!(
            after,
            before + 0.4 * (1.0 - before),
            "update must be exactly value + alpha * (target - value)"
        );
    }
}
