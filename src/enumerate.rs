//! Exhaustive state enumeration for value-function seeding

use crate::{
    board::{Board, Cell, Outcome},
    value_table::ValueTable,
};

/// Populate a value table with every board configuration reachable by
/// per-cell assignment where the table's player made the most recent move.
///
/// Cells are assigned depth-first in row-major order, each taking every
/// value in {Empty, X, O}. A branch stops descending as soon as its
/// assigned prefix reaches a terminal state. At full depth, a state is
/// seeded exactly when its inferred last mover is the table's designated
/// player: these are the post-move states the agent scores during greedy
/// selection. Seeding them up front covers the bulk of those states; the
/// table's lazy insert fills the remainder (wins whose line completes early
/// in row-major order are pruned here and seeded on first lookup). States
/// with impossible mark counts fail the last-mover inference and are
/// skipped.
///
/// Invoked once, at learning-agent construction.
pub fn seed_all_states(table: &mut ValueTable) {
    let mut board = Board::new();
    descend(&mut board, 0, table);
}

fn descend(board: &mut Board, idx: usize, table: &mut ValueTable) {
    if idx == 9 {
        if board.last_mover().is_ok_and(|mover| mover == table.player()) {
            table.seed(*board);
        }
        return;
    }

    if board.outcome() != Outcome::InProgress {
        return;
    }

    let (row, col) = (idx / 3, idx % 3);
    for cell in [Cell::Empty, Cell::X, Cell::O] {
        board.set(row, col, cell);
        descend(board, idx + 1, table);
    }
    board.set(row, col, Cell::Empty);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    fn seeded_table(player: Player) -> ValueTable {
        let mut table = ValueTable::new(player, 0.99, -1.0);
        seed_all_states(&mut table);
        table
    }

    #[test]
    fn test_enumeration_is_nonempty() {
        let table = seeded_table(Player::X);
        assert!(
            table.len() > 1_000,
            "expected thousands of seeded states, got {}",
            table.len()
        );
    }

    #[test]
    fn test_x_table_omits_empty_board() {
        // On the empty board O is inferred to have moved last, so the empty
        // board belongs to O's table, not X's.
        let table = seeded_table(Player::X);
        assert!(!table.contains(&Board::new()));

        let table = seeded_table(Player::O);
        assert!(table.contains(&Board::new()));
    }

    #[test]
    fn test_seeded_states_have_matching_last_mover() {
        let table = seeded_table(Player::X);
        let probe = Board::from_string("X.. ...  ...").unwrap();
        assert!(table.contains(&probe), "post-X-move state should be seeded");

        let o_probe = Board::from_string("XO. ... ...").unwrap();
        assert!(
            !table.contains(&o_probe),
            "post-O-move state belongs to O's table"
        );
    }

    #[test]
    fn test_terminal_states_carry_outcome_seeds() {
        // X wins on the main diagonal, whose last cell is assigned at full
        // depth, so the state survives prefix pruning.
        let mut table = seeded_table(Player::X);
        let won = Board::from_string("XOO .X. ..X").unwrap();
        assert_eq!(won.outcome(), Outcome::Win(Player::X));
        assert_eq!(table.peek(&won), Some(1.0));
        assert_eq!(table.lookup(&won), 1.0, "lookup must not disturb the seed");
    }

    #[test]
    fn test_pruned_branches_are_not_seeded() {
        // A win on the top row is terminal after three assignments; nothing
        // below that prefix is enumerated.
        let table = seeded_table(Player::X);
        let early_win = Board::from_string("XXX OO. ...").unwrap();
        assert!(!table.contains(&early_win));
    }

    #[test]
    fn test_lookup_after_enumeration_does_not_reseed() {
        let mut table = seeded_table(Player::X);
        let len_before = table.len();
        let probe = Board::from_string("XO. .X. ...").unwrap();
        assert!(table.contains(&probe));
        table.lookup(&probe);
        assert_eq!(
            table.len(),
            len_before,
            "lookup of seeded state must not insert"
        );
    }
}
