//! Performance measurement against a uniformly random opponent

use std::{fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::LearningAgent,
    board::{Outcome, Player},
    episode::play_episode,
    players::RandomPlayer,
};

/// Win/loss/draw statistics for one seat of the measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatReport {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub draw_rate: f64,
}

impl SeatReport {
    fn new(games: usize, wins: usize, losses: usize, draws: usize) -> Self {
        let rate = |n: usize| {
            if games > 0 {
                n as f64 / games as f64
            } else {
                0.0
            }
        };
        Self {
            games,
            wins,
            losses,
            draws,
            win_rate: rate(wins),
            loss_rate: rate(losses),
            draw_rate: rate(draws),
        }
    }
}

/// Measurement results for both seats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VsRandomReport {
    /// The X-seat agent against a random O
    pub as_x: SeatReport,
    /// The O-seat agent against a random X
    pub as_o: SeatReport,
}

impl VsRandomReport {
    /// Save the report to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: "create evaluation report file".to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Measure two trained agents against uniformly random opponents.
///
/// Both agents are frozen for the duration (exploration off, learning off)
/// and restored to their prior settings afterwards, even if a game
/// errors out. `agent_x` plays `games` episodes as X against a random O;
/// `agent_o` plays `games` episodes as O against a random X.
pub fn measure_vs_random(
    agent_x: &mut LearningAgent,
    agent_o: &mut LearningAgent,
    games: usize,
    seed: Option<u64>,
) -> Result<VsRandomReport> {
    let saved_x = (agent_x.exploration_rate(), agent_x.learning());
    let saved_o = (agent_o.exploration_rate(), agent_o.learning());

    agent_x.set_exploration_rate(0.0);
    agent_x.set_learning(false);
    agent_o.set_exploration_rate(0.0);
    agent_o.set_learning(false);

    let played = play_both_seats(agent_x, agent_o, games, seed);

    agent_x.set_exploration_rate(saved_x.0);
    agent_x.set_learning(saved_x.1);
    agent_o.set_exploration_rate(saved_o.0);
    agent_o.set_learning(saved_o.1);

    played
}

fn play_both_seats(
    agent_x: &mut LearningAgent,
    agent_o: &mut LearningAgent,
    games: usize,
    seed: Option<u64>,
) -> Result<VsRandomReport> {
    let mut random_o = match seed {
        Some(seed) => RandomPlayer::new().with_seed(seed),
        None => RandomPlayer::new(),
    };
    let mut random_x = match seed {
        Some(seed) => RandomPlayer::new().with_seed(seed.wrapping_add(1)),
        None => RandomPlayer::new(),
    };

    let (mut wins, mut losses, mut draws) = (0, 0, 0);
    for _ in 0..games {
        match play_episode(agent_x, &mut random_o)? {
            Outcome::Win(Player::X) => wins += 1,
            Outcome::Win(Player::O) => losses += 1,
            Outcome::Draw | Outcome::InProgress => draws += 1,
        }
    }
    let as_x = SeatReport::new(games, wins, losses, draws);

    let (mut wins, mut losses, mut draws) = (0, 0, 0);
    for _ in 0..games {
        match play_episode(&mut random_x, agent_o)? {
            Outcome::Win(Player::O) => wins += 1,
            Outcome::Win(Player::X) => losses += 1,
            Outcome::Draw | Outcome::InProgress => draws += 1,
        }
    }
    let as_o = SeatReport::new(games, wins, losses, draws);

    Ok(VsRandomReport { as_x, as_o })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_restores_agent_settings() {
        let mut agent_x = LearningAgent::new(Player::X).with_seed(31);
        let mut agent_o = LearningAgent::new(Player::O).with_seed(32);
        agent_x.set_exploration_rate(0.3);

        measure_vs_random(&mut agent_x, &mut agent_o, 10, Some(5)).unwrap();

        assert_eq!(agent_x.exploration_rate(), 0.3);
        assert!(agent_x.learning());
        assert_eq!(
            agent_o.exploration_rate(),
            crate::agent::DEFAULT_EXPLORATION_RATE
        );
        assert!(agent_o.learning());
    }

    #[test]
    fn test_report_rates_sum_to_one() {
        let mut agent_x = LearningAgent::new(Player::X).with_seed(41);
        let mut agent_o = LearningAgent::new(Player::O).with_seed(42);

        let report = measure_vs_random(&mut agent_x, &mut agent_o, 20, Some(6)).unwrap();

        for seat in [&report.as_x, &report.as_o] {
            assert_eq!(seat.games, 20);
            assert_eq!(seat.wins + seat.losses + seat.draws, 20);
            let total_rate = seat.win_rate + seat.loss_rate + seat.draw_rate;
            assert!((total_rate - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_report_save() {
        let report = VsRandomReport {
            as_x: SeatReport::new(10, 6, 1, 3),
            as_o: SeatReport::new(10, 4, 2, 4),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"as_x\""));
        assert!(contents.contains("\"win_rate\": 0.6"));
    }
}
