//! Heuristic opponent implementing the classical optimal-play hierarchy
//!
//! The Teacher decides each ply with a fixed priority cascade of
//! closed-form pattern tests: Win, BlockWin, Fork, BlockFork, Center,
//! Corner, Side, then a random fallback. There is no search or lookahead;
//! every rule is an O(1) scan over fixed board coordinates. A skill
//! parameter turns the Teacher into a noisy player: with probability
//! `1 - ability_level` it plays a uniformly random empty cell before any
//! pattern logic runs.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    board::{Board, Cell, Outcome, Player},
    error::Result,
    lines,
    participant::Participant,
};

/// Default probability of following the optimal strategy
pub const DEFAULT_ABILITY_LEVEL: f64 = 0.9;

/// One fork geometry: two required own marks plus open cells that together
/// yield two simultaneous winning threats when `play` is taken.
#[derive(Debug, Clone, Copy)]
struct PatternRule {
    marks: [(usize, usize); 2],
    open: [(usize, usize); 3],
    play: (usize, usize),
}

/// Fork geometries built on a pair of adjacent edge-middle marks.
const EDGE_PAIR_RULES: [PatternRule; 8] = [
    PatternRule {
        marks: [(1, 0), (0, 1)],
        open: [(0, 0), (2, 0), (0, 2)],
        play: (0, 0),
    },
    PatternRule {
        marks: [(1, 0), (0, 1)],
        open: [(1, 1), (2, 1), (1, 2)],
        play: (1, 1),
    },
    PatternRule {
        marks: [(1, 0), (2, 1)],
        open: [(2, 0), (0, 0), (2, 2)],
        play: (2, 0),
    },
    PatternRule {
        marks: [(1, 0), (2, 1)],
        open: [(1, 1), (0, 1), (1, 2)],
        play: (1, 1),
    },
    PatternRule {
        marks: [(2, 1), (1, 2)],
        open: [(2, 2), (2, 0), (0, 2)],
        play: (2, 2),
    },
    PatternRule {
        marks: [(2, 1), (1, 2)],
        open: [(1, 1), (1, 0), (0, 1)],
        play: (1, 1),
    },
    PatternRule {
        marks: [(1, 2), (0, 1)],
        open: [(0, 2), (0, 0), (2, 2)],
        play: (0, 2),
    },
    PatternRule {
        marks: [(1, 2), (0, 1)],
        open: [(1, 1), (1, 0), (2, 1)],
        play: (1, 1),
    },
];

/// Fork geometries built on a pair of diagonally opposed corner marks.
const CROSS_CORNER_RULES: [PatternRule; 4] = [
    PatternRule {
        marks: [(0, 0), (2, 2)],
        open: [(1, 0), (2, 1), (2, 0)],
        play: (2, 0),
    },
    PatternRule {
        marks: [(0, 0), (2, 2)],
        open: [(0, 1), (1, 2), (0, 2)],
        play: (0, 2),
    },
    PatternRule {
        marks: [(2, 0), (0, 2)],
        open: [(2, 1), (1, 2), (2, 2)],
        play: (2, 2),
    },
    PatternRule {
        marks: [(2, 0), (0, 2)],
        open: [(1, 0), (0, 1), (0, 0)],
        play: (0, 0),
    },
];

const CORNERS: [(usize, usize); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Corner preference pairs: an opponent mark on the first corner makes the
/// diagonally opposite corner the preferred reply.
const OPPOSITE_CORNERS: [((usize, usize), (usize, usize)); 4] = [
    ((0, 0), (2, 2)),
    ((2, 0), (0, 2)),
    ((0, 2), (2, 0)),
    ((2, 2), (0, 0)),
];

/// Edge-middle cells in fixed scan order
const SIDES: [(usize, usize); 4] = [(1, 0), (2, 1), (1, 2), (0, 1)];

/// Heuristic opponent with a tunable skill level.
///
/// Stateless per ply apart from its random source: each call to
/// [`choose_move`] evaluates the cascade fresh against the given board.
///
/// [`choose_move`]: Teacher::choose_move
#[derive(Debug, Clone)]
pub struct Teacher {
    player: Player,
    ability_level: f64,
    rng: StdRng,
}

impl Teacher {
    /// Create a teacher playing as `player`.
    ///
    /// `ability_level` in [0.0, 1.0] is the probability of following the
    /// optimal strategy on any given ply; the remainder is played uniformly
    /// at random.
    pub fn new(player: Player, ability_level: f64) -> Self {
        Self {
            player,
            ability_level,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reseed the teacher's random source for reproducible noise
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn ability_level(&self) -> f64 {
        self.ability_level
    }

    /// Choose a move for the current board.
    ///
    /// The skill-noise check runs first; otherwise the cascade is evaluated
    /// in strict order and the first rule producing a cell wins. The final
    /// random fallback is unreachable on a non-terminal board since Center,
    /// Corner, and Side between them exhaust every cell type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidMoves`] if the board has no empty
    /// cell.
    pub fn choose_move(&mut self, board: &Board) -> Result<(usize, usize)> {
        let moves = board.empty_cells();
        if moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }

        if self.rng.random::<f64>() > self.ability_level {
            return moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(crate::Error::NoValidMoves);
        }

        let chosen = self
            .win(board)
            .or_else(|| self.block_win(board))
            .or_else(|| self.fork(board))
            .or_else(|| self.block_fork(board))
            .or_else(|| Self::center(board))
            .or_else(|| self.corner(board))
            .or_else(|| Self::side(board));

        match chosen {
            Some(cell) => Ok(cell),
            None => moves
                .choose(&mut self.rng)
                .copied()
                .ok_or(crate::Error::NoValidMoves),
        }
    }

    /// Win: complete an own line if two marks and an empty third cell exist
    fn win(&self, board: &Board) -> Option<(usize, usize)> {
        lines::completing_cell(board, self.player)
    }

    /// BlockWin: the same test applied to the opponent's marks
    fn block_win(&self, board: &Board) -> Option<(usize, usize)> {
        lines::completing_cell(board, self.player.opponent())
    }

    /// Fork: create two simultaneous winning threats
    fn fork(&self, board: &Board) -> Option<(usize, usize)> {
        let own = self.player.to_cell();
        match_rules(board, own, &EDGE_PAIR_RULES)
            .or_else(|| match_rules(board, own, &CROSS_CORNER_RULES))
    }

    /// BlockFork: deny the opponent a fork.
    ///
    /// Between the edge-pair and cross-corner geometries sits the double
    /// corner threat: two opponent corners with exactly one corner still
    /// open is answered with the disambiguating side cell (1, 2), provided
    /// that cell is itself still open.
    fn block_fork(&self, board: &Board) -> Option<(usize, usize)> {
        let opponent = self.player.opponent().to_cell();

        if let Some(cell) = match_rules(board, opponent, &EDGE_PAIR_RULES) {
            return Some(cell);
        }

        let open_corners = CORNERS
            .iter()
            .filter(|&&(r, c)| board.cell(r, c) == Cell::Empty)
            .count();
        let opponent_corners = CORNERS
            .iter()
            .filter(|&&(r, c)| board.cell(r, c) == opponent)
            .count();
        if open_corners == 1 && opponent_corners == 2 && board.is_empty(1, 2) {
            return Some((1, 2));
        }

        match_rules(board, opponent, &CROSS_CORNER_RULES)
    }

    /// Center: take the middle cell if it is open
    fn center(board: &Board) -> Option<(usize, usize)> {
        board.is_empty(1, 1).then_some((1, 1))
    }

    /// Corner: prefer the corner diagonally opposite an opponent mark,
    /// otherwise the first open corner in fixed order
    fn corner(&self, board: &Board) -> Option<(usize, usize)> {
        let opponent = self.player.opponent().to_cell();

        for &((mark_row, mark_col), (reply_row, reply_col)) in &OPPOSITE_CORNERS {
            if board.cell(mark_row, mark_col) == opponent && board.is_empty(reply_row, reply_col) {
                return Some((reply_row, reply_col));
            }
        }

        CORNERS
            .iter()
            .copied()
            .find(|&(r, c)| board.is_empty(r, c))
    }

    /// Side: the first open edge-middle cell in fixed order
    fn side(board: &Board) -> Option<(usize, usize)> {
        SIDES.iter().copied().find(|&(r, c)| board.is_empty(r, c))
    }
}

/// Return the play of the first rule whose marks and open cells all match
fn match_rules(board: &Board, mark: Cell, rules: &[PatternRule]) -> Option<(usize, usize)> {
    rules
        .iter()
        .find(|rule| {
            rule.marks.iter().all(|&(r, c)| board.cell(r, c) == mark)
                && rule.open.iter().all(|&(r, c)| board.cell(r, c) == Cell::Empty)
        })
        .map(|rule| rule.play)
}

impl Participant for Teacher {
    fn select_action(&mut self, board: &Board) -> Result<(usize, usize)> {
        self.choose_move(board)
    }

    fn episode_over(&mut self, _outcome: Outcome) {}

    fn name(&self) -> &str {
        "Teacher"
    }
}
