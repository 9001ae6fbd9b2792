//! Tic-Tac-Toe played and learned at the table level
//!
//! This crate provides:
//! - Complete 3x3 board model with terminal detection and turn inference
//! - Tabular TD(0) learning agent with exhaustive state-value seeding
//! - Heuristic "Teacher" opponent with a tunable skill level
//! - Random and human participants sharing one game-loop contract
//! - Training sessions and performance measurement against random play

pub mod agent;
pub mod board;
pub mod enumerate;
pub mod episode;
pub mod error;
pub mod eval;
pub mod lines;
pub mod participant;
pub mod players;
pub mod teacher;
pub mod training;
pub mod value_table;

pub use agent::{EpisodeTrace, LearningAgent};
pub use board::{Board, Cell, Outcome, Player};
pub use episode::play_episode;
pub use error::{Error, Result};
pub use eval::{VsRandomReport, measure_vs_random};
pub use participant::Participant;
pub use players::{Human, RandomPlayer};
pub use teacher::Teacher;
pub use training::{TrainingConfig, TrainingResults, TrainingSession};
pub use value_table::ValueTable;
