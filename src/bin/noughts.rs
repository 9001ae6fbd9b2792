//! noughts CLI - train, evaluate, and play against Tic-Tac-Toe agents
//!
//! Subcommands:
//! - `train` trains a TD agent against the Teacher and reports results
//! - `evaluate` trains agents for both seats and measures them against
//!   random opponents
//! - `play` trains a sparring agent, then plays an interactive game

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use noughts::{
    Human, LearningAgent, Participant, Player, RandomPlayer, Teacher, TrainingConfig,
    TrainingSession, agent, eval, play_episode, teacher, training,
};

#[derive(Parser)]
#[command(name = "noughts")]
#[command(version, about = "Tic-Tac-Toe value learning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a TD agent against the Teacher
    Train(TrainArgs),

    /// Train agents for both seats and measure them against random play
    Evaluate(EvaluateArgs),

    /// Play an interactive game against a trained agent or the Teacher
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 5000)]
    games: usize,

    /// Teacher ability level (probability of an optimal move)
    #[arg(long, default_value_t = teacher::DEFAULT_ABILITY_LEVEL)]
    ability: f64,

    /// Exploration rate epsilon
    #[arg(long, default_value_t = agent::DEFAULT_EXPLORATION_RATE)]
    exploration: f64,

    /// Learning rate alpha
    #[arg(long, default_value_t = agent::DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    /// Value assigned to lost episodes
    #[arg(long, default_value_t = agent::DEFAULT_LOSS_VALUE, allow_hyphen_values = true)]
    loss_value: f64,

    /// Which seat the agent plays (`x` or `o`)
    #[arg(long, default_value = "x")]
    agent_player: String,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Export results summary to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export the win-rate history to a CSV file
    #[arg(long)]
    export_history: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EvaluateArgs {
    /// Number of training games per seat
    #[arg(long, short = 'g', default_value_t = 5000)]
    games: usize,

    /// Number of measurement games per seat
    #[arg(long, default_value_t = 1000)]
    eval_games: usize,

    /// Teacher ability level during training
    #[arg(long, default_value_t = teacher::DEFAULT_ABILITY_LEVEL)]
    ability: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Export the measurement report to a JSON file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Opponent kind: `agent`, `teacher`, or `random`
    #[arg(long, short = 'o', default_value = "agent")]
    opponent: String,

    /// Which seat the human plays (`x` or `o`)
    #[arg(long, default_value = "o")]
    human_player: String,

    /// Training games for the sparring agent before play begins
    #[arg(long, default_value_t = 2000)]
    training_games: usize,

    /// Teacher ability level (sparring and `teacher` opponent)
    #[arg(long, default_value_t = 1.0)]
    ability: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => run_train(args),
        Commands::Evaluate(args) => run_evaluate(args),
        Commands::Play(args) => run_play(args),
    }
}

fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.to_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => Err(anyhow::anyhow!(
            "invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn train_agent(
    player: Player,
    games: usize,
    ability: f64,
    exploration: f64,
    learning_rate: f64,
    loss_value: f64,
    seed: Option<u64>,
    progress: bool,
) -> Result<TrainingSession> {
    let mut agent = LearningAgent::with_parameters(player, learning_rate, exploration, loss_value, true);
    if let Some(seed) = seed {
        agent = agent.with_seed(seed);
    }

    let config = TrainingConfig {
        num_games: games,
        teacher_ability: ability,
        agent_player: player,
        seed,
        progress,
    };

    let mut session = TrainingSession::new(agent, config);
    session.run()?;
    Ok(session)
}

fn print_results(results: &noughts::TrainingResults) {
    println!("\n=== Training Results ===");
    println!("Games:  {}", results.total());
    println!("Wins:   {} ({:.1}%)", results.wins, 100.0 * results.win_rate());
    println!(
        "Draws:  {} ({:.1}%)",
        results.draws,
        100.0 * results.draws as f64 / results.total().max(1) as f64
    );
    println!(
        "Losses: {} ({:.1}%)",
        results.losses,
        100.0 * results.losses as f64 / results.total().max(1) as f64
    );
}

fn run_train(args: TrainArgs) -> Result<()> {
    let player = parse_player_token(&args.agent_player, "--agent-player")?;

    println!("=== Training Configuration ===");
    println!("Agent plays as: {player}");
    println!("Games: {}", args.games);
    println!("Teacher ability: {}", args.ability);
    if let Some(seed) = args.seed {
        println!("Seed: {seed}");
    }

    let session = train_agent(
        player,
        args.games,
        args.ability,
        args.exploration,
        args.learning_rate,
        args.loss_value,
        args.seed,
        true,
    )?;

    print_results(session.results());
    println!("Value table size: {}", session.agent().table().len());

    if let Some(path) = &args.export {
        session.results().save(path)?;
        println!("Results exported to: {}", path.display());
    }
    if let Some(path) = &args.export_history {
        training::export_history_csv(session.results(), path)?;
        println!("History exported to: {}", path.display());
    }

    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    println!("=== Evaluation ===");
    println!(
        "Training {} games per seat at Teacher ability {}",
        args.games, args.ability
    );

    let session_x = train_agent(
        Player::X,
        args.games,
        args.ability,
        agent::DEFAULT_EXPLORATION_RATE,
        agent::DEFAULT_LEARNING_RATE,
        agent::DEFAULT_LOSS_VALUE,
        args.seed,
        true,
    )?;
    let session_o = train_agent(
        Player::O,
        args.games,
        args.ability,
        agent::DEFAULT_EXPLORATION_RATE,
        agent::DEFAULT_LEARNING_RATE,
        agent::DEFAULT_LOSS_VALUE,
        args.seed.map(|s| s.wrapping_add(1000)),
        true,
    )?;

    let mut agent_x = session_x.into_agent();
    let mut agent_o = session_o.into_agent();

    println!(
        "\nMeasuring {} games per seat against random opponents",
        args.eval_games
    );
    let report = eval::measure_vs_random(&mut agent_x, &mut agent_o, args.eval_games, args.seed)?;

    println!("\n=== Measurement Results ===");
    for (label, seat) in [("As X", &report.as_x), ("As O", &report.as_o)] {
        println!(
            "{label}: W {:.1}% / L {:.1}% / D {:.1}%",
            100.0 * seat.win_rate,
            100.0 * seat.loss_rate,
            100.0 * seat.draw_rate
        );
    }

    if let Some(path) = &args.export {
        report.save(path)?;
        println!("Report exported to: {}", path.display());
    }

    Ok(())
}

fn run_play(args: PlayArgs) -> Result<()> {
    let human_player = parse_player_token(&args.human_player, "--human-player")?;
    let machine_player = human_player.opponent();

    let mut machine: Box<dyn Participant> = match args.opponent.to_lowercase().as_str() {
        "agent" => {
            println!(
                "Training sparring agent for {} games...",
                args.training_games
            );
            let session = train_agent(
                machine_player,
                args.training_games,
                args.ability,
                agent::DEFAULT_EXPLORATION_RATE,
                agent::DEFAULT_LEARNING_RATE,
                agent::DEFAULT_LOSS_VALUE,
                args.seed,
                true,
            )?;
            let mut agent = session.into_agent();
            agent.set_exploration_rate(0.0);
            agent.set_learning(false);
            Box::new(agent)
        }
        "teacher" => {
            let mut teacher = Teacher::new(machine_player, args.ability);
            if let Some(seed) = args.seed {
                teacher = teacher.with_seed(seed);
            }
            Box::new(teacher)
        }
        "random" => {
            let mut random = RandomPlayer::new();
            if let Some(seed) = args.seed {
                random = random.with_seed(seed);
            }
            Box::new(random)
        }
        other => {
            return Err(anyhow::anyhow!(
                "unknown opponent '{other}' (expected 'agent', 'teacher', or 'random')"
            ));
        }
    };

    let mut human = Human::new(human_player);
    println!("\nYou play as {human_player}. Coordinates are row,col with 0,0 top-left.");

    let outcome = match human_player {
        Player::X => play_episode(&mut human, machine.as_mut())?,
        Player::O => play_episode(machine.as_mut(), &mut human)?,
    };

    println!("\nFinal outcome: {outcome:?}");
    Ok(())
}
