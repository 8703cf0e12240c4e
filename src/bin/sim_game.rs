//! Headless Game Runner
//!
//! Plays whole games without a manager at the console and prints results
//! as JSON or text. Several games run in parallel, one seed each.

use dugout::core::config::{load_config, EngineConfig};
use dugout::core::error::Result;
use dugout::core::types::Side;
use dugout::engine::strategy::{Strategy, StrategySide};
use dugout::game::session::GameSession;
use dugout::narrative::recommend_strategy;
use dugout::player::roster::{load_team, Team};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// Headless Game Runner - simulate late-inning games in bulk
#[derive(Parser, Debug)]
#[command(name = "sim_game")]
#[command(about = "Simulate games between two rosters and report results")]
struct Args {
    /// Home team file
    #[arg(long, default_value = "data/teams/home.json")]
    home: PathBuf,

    /// Away team file
    #[arg(long, default_value = "data/teams/away.json")]
    away: PathBuf,

    /// Engine config (TOML); defaults are used when absent
    #[arg(long, default_value = "data/engine.toml")]
    config: PathBuf,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Override the inning play starts in
    #[arg(long)]
    start_inning: Option<u32>,

    /// Strategy the home club calls whenever it applies
    #[arg(long)]
    strategy: Option<String>,

    /// Let the rule-based advisor call the home club's strategies
    #[arg(long, conflicts_with = "strategy")]
    advised: bool,

    /// Leave tired pitchers in the game
    #[arg(long)]
    no_relief: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Include the play log in JSON output
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// How the home club picks strategies
#[derive(Debug, Clone, Copy)]
enum Manager {
    Hands,
    Fixed(Strategy),
    Advised,
}

impl Manager {
    fn choose(&self, session: &GameSession) -> Option<Strategy> {
        let role = if session.state().fielding_side() == Side::Home {
            StrategySide::Pitching
        } else {
            StrategySide::Batting
        };
        match self {
            Manager::Hands => None,
            Manager::Fixed(strategy) => (strategy.side() == role).then_some(*strategy),
            Manager::Advised => {
                let snapshot = session.state().snapshot();
                let rec = recommend_strategy(
                    role,
                    session.current_batter(),
                    session.current_pitcher(),
                    &snapshot,
                );
                Some(rec.strategy)
            }
        }
    }
}

/// JSON output structure for one game
#[derive(Serialize)]
struct GameResult {
    seed: u64,
    winner: Option<String>,
    home_runs: u32,
    away_runs: u32,
    final_inning: u32,
    plate_appearances: usize,
    home_pitchers: Vec<String>,
    away_pitchers: Vec<String>,
    summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plays: Option<Vec<String>>,
}

/// JSON output structure for the whole run
#[derive(Serialize)]
struct RunSummary {
    home: String,
    away: String,
    games: usize,
    home_wins: usize,
    away_wins: usize,
    avg_home_runs: f64,
    avg_away_runs: f64,
    results: Vec<GameResult>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dugout=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        load_config(&args.config)?
    } else {
        EngineConfig::default()
    };
    if let Some(inning) = args.start_inning {
        config.game.start_inning = inning;
    }
    config.validate()?;

    let manager = match (&args.strategy, args.advised) {
        (Some(id), _) => Manager::Fixed(id.parse()?),
        (None, true) => Manager::Advised,
        (None, false) => Manager::Hands,
    };

    let home = load_team(&args.home)?;
    let away = load_team(&args.away)?;
    let base_seed = args.seed.or(config.game.seed).unwrap_or_else(rand::random);

    tracing::info!(
        "Simulating {} game(s): {} at {} (base seed {})",
        args.games,
        away.name,
        home.name,
        base_seed
    );

    let results = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let mut game_config = config.clone();
            game_config.game.seed = Some(base_seed.wrapping_add(i as u64));
            play_game(&home, &away, game_config, manager, !args.no_relief, args.verbose)
        })
        .collect::<Result<Vec<_>>>()?;

    let games = results.len();
    let home_wins = results.iter().filter(|r| r.winner.as_deref() == Some(home.name.as_str())).count();
    let away_wins = results.iter().filter(|r| r.winner.as_deref() == Some(away.name.as_str())).count();
    let avg = |f: fn(&GameResult) -> u32| {
        results.iter().map(|r| f(r) as f64).sum::<f64>() / games.max(1) as f64
    };

    let summary = RunSummary {
        home: home.name.clone(),
        away: away.name.clone(),
        games,
        home_wins,
        away_wins,
        avg_home_runs: avg(|r| r.home_runs),
        avg_away_runs: avg(|r| r.away_runs),
        results,
    };

    match args.format.as_str() {
        "text" => print_text(&summary),
        "json" => print_json(&summary)?,
        _ => {
            eprintln!("Unknown format '{}', defaulting to json", args.format);
            print_json(&summary)?;
        }
    }
    Ok(())
}

fn play_game(
    home: &Team,
    away: &Team,
    config: EngineConfig,
    manager: Manager,
    auto_relief: bool,
    verbose: bool,
) -> Result<GameResult> {
    let mut session = GameSession::new(home, away, config)?;
    let plate_appearances = session.play_out(|s| manager.choose(s), auto_relief)?;

    let state = session.state();
    let winner = session.winner().map(|side| session.club(side).name.clone());

    let plays = verbose.then(|| {
        session
            .play_log()
            .iter()
            .map(|r| {
                format!(
                    "{} {} | {} vs {}: {} ({} R)",
                    r.half.label(),
                    r.inning,
                    r.batter_name,
                    r.pitcher_name,
                    r.outcome.label(),
                    r.runs_scored
                )
            })
            .collect()
    });

    let box_score = session.box_score();
    Ok(GameResult {
        seed: session.seed(),
        winner,
        home_runs: state.home_score,
        away_runs: state.away_score,
        final_inning: state.inning,
        plate_appearances,
        home_pitchers: box_score.teams.home.pitchers.clone(),
        away_pitchers: box_score.teams.away.pitchers.clone(),
        summary: session.summary(),
        plays,
    })
}

fn print_json(summary: &RunSummary) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn print_text(summary: &RunSummary) {
    println!("Game Results: {} at {}", summary.away, summary.home);
    println!("=============");
    for result in &summary.results {
        println!(
            "[seed {}] {} - {} {} ({} PA, final inning {})",
            result.seed,
            result.away_runs,
            result.home_runs,
            result.winner.as_deref().unwrap_or("no decision"),
            result.plate_appearances,
            result.final_inning
        );
        if let Some(plays) = &result.plays {
            for play in plays {
                println!("    {}", play);
            }
        }
    }
    println!();
    println!("Games: {}", summary.games);
    println!("{} wins: {}", summary.home, summary.home_wins);
    println!("{} wins: {}", summary.away, summary.away_wins);
    println!(
        "Average score: {} {:.2} - {:.2} {}",
        summary.away, summary.avg_away_runs, summary.avg_home_runs, summary.home
    );
}
