//! Baseline and interactive participants
//!
//! `RandomPlayer` picks uniformly among empty cells. `Human` reads
//! `row,col` coordinates from stdin, reprompting on malformed, out-of-range,
//! or occupied input; input-format problems never escape this module.

use std::io::{self, BufRead, Write};

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Result,
    board::{Board, Outcome, Player},
    participant::Participant,
};

/// Player that moves uniformly at random
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reseed the random source for reproducible play
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Participant for RandomPlayer {
    fn select_action(&mut self, board: &Board) -> Result<(usize, usize)> {
        board
            .empty_cells()
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }

    fn episode_over(&mut self, _outcome: Outcome) {}

    fn name(&self) -> &str {
        "Random"
    }
}

/// Parse a human-entered coordinate of the form `row,col`.
///
/// # Errors
///
/// Returns [`crate::Error::MalformedCoordinate`] when the text is not two
/// comma-separated non-negative integers, and
/// [`crate::Error::CellOutOfBounds`] when either coordinate exceeds 2.
pub fn parse_coordinate(input: &str) -> Result<(usize, usize)> {
    let malformed = || crate::Error::MalformedCoordinate {
        input: input.trim().to_string(),
    };

    let mut parts = input.trim().split(',');
    let row = parts.next().ok_or_else(malformed)?;
    let col = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    let row: usize = row.trim().parse().map_err(|_| malformed())?;
    let col: usize = col.trim().parse().map_err(|_| malformed())?;

    if row > 2 || col > 2 {
        return Err(crate::Error::CellOutOfBounds { row, col });
    }

    Ok((row, col))
}

/// Interactive stdin participant
#[derive(Debug, Clone)]
pub struct Human {
    player: Player,
}

impl Human {
    pub fn new(player: Player) -> Self {
        Self { player }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        let bytes = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|source| crate::Error::Io {
                operation: "read move from stdin".to_string(),
                source,
            })?;
        if bytes == 0 {
            return Err(crate::Error::Io {
                operation: "read move from stdin".to_string(),
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"),
            });
        }
        Ok(line)
    }
}

impl Participant for Human {
    fn select_action(&mut self, board: &Board) -> Result<(usize, usize)> {
        println!("\n{board}");

        loop {
            print!("Your move as row,col (0-2): ");
            io::stdout().flush().map_err(|source| crate::Error::Io {
                operation: "flush prompt".to_string(),
                source,
            })?;

            let line = self.read_line()?;

            let parsed = parse_coordinate(&line).and_then(|(row, col)| {
                if board.is_empty(row, col) {
                    Ok((row, col))
                } else {
                    Err(crate::Error::CellOccupied { row, col })
                }
            });

            match parsed {
                Ok(cell) => return Ok(cell),
                Err(err) => println!("{err}"),
            }
        }
    }

    fn episode_over(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(winner) if winner == self.player => println!("You won!"),
            Outcome::Win(_) => println!("You lost!"),
            Outcome::Draw => println!("It's a draw."),
            Outcome::InProgress => {}
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}
