//! Winning line tables and threat scanning

use crate::board::{Board, Cell, Player};

/// The eight winning lines, in the order terminal detection checks them:
/// rows top to bottom, columns left to right, then the two diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)], // rows
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)], // columns
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)], // diagonals
];

/// Check whether a single line is fully held by one player
pub fn line_winner(board: &Board, line: &[(usize, usize); 3]) -> Option<Player> {
    let (r0, c0) = line[0];
    let first = board.cell(r0, c0);
    let held = line.iter().all(|&(r, c)| board.cell(r, c) == first);
    match first {
        Cell::X if held => Some(Player::X),
        Cell::O if held => Some(Player::O),
        _ => None,
    }
}

/// Find the first cell that would complete a line for `player`.
///
/// Scans [`LINES`] in order for a line holding two of `player`'s marks and
/// exactly one empty cell, returning that empty cell. This is the shared
/// primitive behind the Teacher's Win and BlockWin rules.
pub fn completing_cell(board: &Board, player: Player) -> Option<(usize, usize)> {
    let target = player.to_cell();
    for line in &LINES {
        if let Some(cell) = completing_cell_in_line(board, target, line) {
            return Some(cell);
        }
    }
    None
}

fn completing_cell_in_line(
    board: &Board,
    target: Cell,
    line: &[(usize, usize); 3],
) -> Option<(usize, usize)> {
    let mut own = 0;
    let mut open = None;

    for &(row, col) in line {
        match board.cell(row, col) {
            Cell::Empty => {
                if open.is_some() {
                    // More than one empty cell in this line
                    return None;
                }
                open = Some((row, col));
            }
            c if c == target => own += 1,
            _ => return None, // opponent mark blocks the line
        }
    }

    if own == 2 { open } else { None }
}
