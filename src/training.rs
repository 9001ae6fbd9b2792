//! Training sessions against the heuristic Teacher

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    agent::LearningAgent,
    board::{Outcome, Player},
    episode::play_episode,
    teacher::Teacher,
};

/// Number of games between win-rate history snapshots
pub const HISTORY_INTERVAL: usize = 100;

/// Configuration for a training session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training games
    pub num_games: usize,

    /// Ability level of the sparring Teacher
    pub teacher_ability: f64,

    /// Which seat the agent occupies (the Teacher takes the other)
    pub agent_player: Player,

    /// Random seed for the Teacher's noise; the agent is seeded separately
    pub seed: Option<u64>,

    /// Whether to render a progress bar
    pub progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 5000,
            teacher_ability: crate::teacher::DEFAULT_ABILITY_LEVEL,
            agent_player: Player::X,
            seed: None,
            progress: false,
        }
    }
}

/// Results accumulated over a training session, from the agent's
/// perspective
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingResults {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,

    /// Cumulative win rate sampled every [`HISTORY_INTERVAL`] games
    pub win_rate_history: Vec<f64>,
}

impl TrainingResults {
    /// Total games recorded
    pub fn total(&self) -> usize {
        self.wins + self.draws + self.losses
    }

    /// Cumulative win rate over all recorded games
    pub fn win_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.wins as f64 / self.total() as f64
        }
    }

    /// Save results to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(|source| crate::Error::Io {
            operation: "create training results file".to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load results from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(|source| crate::Error::Io {
            operation: "open training results file".to_string(),
            source,
        })?;
        let results = serde_json::from_reader(file)?;
        Ok(results)
    }
}

/// A training session pairing one learning agent with a Teacher
pub struct TrainingSession {
    agent: LearningAgent,
    teacher: Teacher,
    config: TrainingConfig,
    results: TrainingResults,
}

impl TrainingSession {
    /// Create a session. The Teacher takes the seat opposite the agent and
    /// derives its seed from the config seed when one is set.
    pub fn new(agent: LearningAgent, config: TrainingConfig) -> Self {
        let mut teacher = Teacher::new(config.agent_player.opponent(), config.teacher_ability);
        if let Some(seed) = config.seed {
            teacher = teacher.with_seed(seed.wrapping_add(1));
        }

        Self {
            agent,
            teacher,
            config,
            results: TrainingResults::default(),
        }
    }

    /// Play the configured number of training games
    pub fn run(&mut self) -> Result<()> {
        let bar = if self.config.progress {
            Some(create_training_progress(self.config.num_games as u64)?)
        } else {
            None
        };

        for game in 0..self.config.num_games {
            let outcome = match self.config.agent_player {
                Player::X => play_episode(&mut self.agent, &mut self.teacher)?,
                Player::O => play_episode(&mut self.teacher, &mut self.agent)?,
            };

            match outcome {
                Outcome::Win(winner) if winner == self.config.agent_player => {
                    self.results.wins += 1;
                }
                Outcome::Win(_) => self.results.losses += 1,
                Outcome::Draw => self.results.draws += 1,
                Outcome::InProgress => {}
            }

            if (game + 1).is_multiple_of(HISTORY_INTERVAL) {
                self.results.win_rate_history.push(self.results.win_rate());
            }

            if let Some(bar) = &bar {
                bar.set_position((game + 1) as u64);
                bar.set_message(format!(
                    "{} D:{} L:{}",
                    self.results.wins, self.results.draws, self.results.losses
                ));
            }
        }

        if let Some(bar) = &bar {
            bar.finish_with_message(format!(
                "{} D:{} L:{}",
                self.results.wins, self.results.draws, self.results.losses
            ));
        }

        Ok(())
    }

    pub fn results(&self) -> &TrainingResults {
        &self.results
    }

    pub fn agent(&self) -> &LearningAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut LearningAgent {
        &mut self.agent
    }

    /// Consume the session and keep the trained agent
    pub fn into_agent(self) -> LearningAgent {
        self.agent
    }
}

fn create_training_progress(total_games: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
            .map_err(|e| crate::Error::ProgressBarTemplate {
                message: e.to_string(),
            })?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Write the win-rate history as CSV rows of `games,win_rate`
pub fn export_history_csv<P: AsRef<Path>>(results: &TrainingResults, path: P) -> Result<()> {
    let file = File::create(path).map_err(|source| crate::Error::Io {
        operation: "create history export file".to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "games,win_rate")?;
    for (i, rate) in results.win_rate_history.iter().enumerate() {
        writeln!(writer, "{},{:.6}", (i + 1) * HISTORY_INTERVAL, rate)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config(games: usize) -> TrainingConfig {
        TrainingConfig {
            num_games: games,
            teacher_ability: 0.5,
            agent_player: Player::X,
            seed: Some(17),
            progress: false,
        }
    }

    #[test]
    fn test_session_plays_all_games() {
        let agent = LearningAgent::new(Player::X).with_seed(17);
        let mut session = TrainingSession::new(agent, quick_config(250));
        session.run().unwrap();

        let results = session.results();
        assert_eq!(results.total(), 250);
        assert_eq!(results.win_rate_history.len(), 2);
    }

    #[test]
    fn test_session_supports_o_seat() {
        let agent = LearningAgent::new(Player::O).with_seed(23);
        let config = TrainingConfig {
            agent_player: Player::O,
            ..quick_config(50)
        };
        let mut session = TrainingSession::new(agent, config);
        session.run().unwrap();
        assert_eq!(session.results().total(), 50);
    }

    #[test]
    fn test_results_save_load_round_trip() {
        let results = TrainingResults {
            wins: 7,
            draws: 2,
            losses: 1,
            win_rate_history: vec![0.5, 0.7],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        results.save(&path).unwrap();

        let loaded = TrainingResults::load(&path).unwrap();
        assert_eq!(loaded.wins, 7);
        assert_eq!(loaded.draws, 2);
        assert_eq!(loaded.losses, 1);
        assert_eq!(loaded.win_rate_history, vec![0.5, 0.7]);
        assert!((loaded.win_rate() - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_history_csv_export() {
        let results = TrainingResults {
            wins: 60,
            draws: 30,
            losses: 10,
            win_rate_history: vec![0.55, 0.6],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        export_history_csv(&results, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("games,win_rate"));
        assert_eq!(lines.next(), Some("100,0.550000"));
        assert_eq!(lines.next(), Some("200,0.600000"));
    }
}
