//! Dugout - Manager Console
//!
//! Interactive late-inning game. You manage the home club: call a strategy
//! for each plate appearance, ask the coaches, and go to the bullpen when
//! the mound-visit alarms go off.

use dugout::core::config::{load_config, EngineConfig};
use dugout::core::error::Result;
use dugout::core::types::Side;
use dugout::engine::strategy::{Strategy, StrategySide};
use dugout::game::session::{AtBatReport, GameSession};
use dugout::narrative::{
    select_provider, CoachAdviceFacts, MoundVisitFacts, NarrativeProvider, NarrativeRequest,
    PlayFacts,
};
use dugout::player::roster::{load_team, Team};

use std::io::{self, Write};
use std::path::Path;

const CONFIG_PATH: &str = "data/engine.toml";
const HOME_TEAM_PATH: &str = "data/teams/home.json";
const AWAY_TEAM_PATH: &str = "data/teams/away.json";

/// The club the console manages
const MANAGED: Side = Side::Home;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dugout=info".into()),
        )
        .init();

    let config = if Path::new(CONFIG_PATH).exists() {
        load_config(Path::new(CONFIG_PATH))?
    } else {
        tracing::warn!("{} not found - using defaults", CONFIG_PATH);
        EngineConfig::default()
    };

    let home = load_team(Path::new(HOME_TEAM_PATH))?;
    let away = load_team(Path::new(AWAY_TEAM_PATH))?;
    let narrator = select_provider(&config.narrative);
    let mut session = GameSession::new(&home, &away, config)?;

    println!("\n=== DUGOUT ===");
    println!("{} at {} - you manage {}", away.name, home.name, home.name);
    println!("Seed: {} | Narration: {}", session.seed(), narrator.name());
    println!();
    print_help();

    while !session.is_over() {
        println!();
        display_status(&session);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (input, ""),
        };

        match command {
            "" => continue,
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "status" | "s" => display_box_score(&session),
            "strategies" => display_strategies(managed_side(&session)),
            "bullpen" | "b" => display_bullpen(&session),
            "scout" => display_scouting(&[&home, &away], arg),
            "advice" | "a" => {
                let request =
                    NarrativeRequest::CoachAdvice(CoachAdviceFacts::from_session(&session, MANAGED));
                print_narration(narrator.as_ref(), &request);
            }
            "odds" | "o" => match parse_strategy(&session, arg) {
                Ok(strategy) => display_odds(&session, strategy),
                Err(msg) => println!("{}", msg),
            },
            "pitch" => match arg.parse::<usize>() {
                Ok(n) if n >= 1 => match session.change_pitcher(MANAGED, n - 1) {
                    Ok(pitcher) => println!("Now pitching: {}", pitcher.name),
                    Err(e) => println!("{}", e),
                },
                _ => println!("Usage: pitch <n>  (see 'bullpen')"),
            },
            "play" | "p" => match parse_strategy(&session, arg) {
                Ok(strategy) => {
                    let report = session.play_at_bat(strategy)?;
                    narrate_play(&session, narrator.as_ref(), &report);
                }
                Err(msg) => println!("{}", msg),
            },
            "auto" => {
                let played = session.play_out(|_| None, true)?;
                println!("Simulated {} plate appearances.", played);
            }
            _ => println!("Unknown command. Type 'help' for the list."),
        }
    }

    println!();
    display_box_score(&session);
    match session.winner() {
        Some(side) => println!("\nFinal - {} win.", session.club(side).name),
        None => println!("\nGame suspended: {}", session.summary()),
    }
    Ok(())
}

fn print_help() {
    println!("Commands:");
    println!("  play / p [strategy]   - Play the next plate appearance");
    println!("  odds / o [strategy]   - Outcome odds for the next plate appearance");
    println!("  strategies            - Strategies you can call right now");
    println!("  advice / a            - Ask your coach");
    println!("  bullpen / b           - List available relievers");
    println!("  pitch <n>             - Bring in reliever n");
    println!("  scout <name>          - Scouting grades for a player");
    println!("  status / s            - Box score");
    println!("  auto                  - Simulate to the end");
    println!("  quit / q              - Exit");
}

/// Pitching while the managed club fields, batting otherwise
fn managed_side(session: &GameSession) -> StrategySide {
    if session.state().fielding_side() == MANAGED {
        StrategySide::Pitching
    } else {
        StrategySide::Batting
    }
}

/// Empty means no strategy; strategies for the other dugout are refused
fn parse_strategy(
    session: &GameSession,
    arg: &str,
) -> std::result::Result<Option<Strategy>, String> {
    if arg.is_empty() {
        return Ok(None);
    }
    let strategy: Strategy = arg.parse().map_err(|e| format!("{}", e))?;
    if strategy.side() != managed_side(session) {
        return Err(format!(
            "{} is not available while {}",
            strategy,
            match managed_side(session) {
                StrategySide::Pitching => "pitching",
                StrategySide::Batting => "batting",
            }
        ));
    }
    Ok(Some(strategy))
}

fn display_status(session: &GameSession) {
    let state = session.state();
    let lineup = &session.club(state.batting_side()).lineup;
    println!("{}", session.summary());
    println!(
        "AB (#{}): {}  vs  P: {} ({} pitches, {:.0}% fatigue)",
        lineup.slot() + 1,
        session.current_batter().name,
        session.current_pitcher().name,
        state.pitcher_pitches(),
        state.pitcher_fatigue()
    );
}

fn display_scouting(teams: &[&Team], name: &str) {
    if name.is_empty() {
        println!("Usage: scout <name>");
        return;
    }
    for team in teams {
        if let Ok(b) = team.find_batter(name) {
            let r = &b.ratings;
            println!(
                "{} ({}) contact {} power {} eye {} speed {} | overall {}",
                b.name, team.name, r.contact, r.power, r.eye, r.speed, r.overall
            );
            return;
        }
        if let Ok(p) = team.find_pitcher(name) {
            let r = &p.ratings;
            println!(
                "{} ({}, {}) stuff {} control {} movement {} stamina {} | overall {}",
                p.name,
                team.name,
                p.throws.label(),
                r.stuff,
                r.control,
                r.movement,
                r.stamina,
                r.overall
            );
            return;
        }
    }
    println!("No player named '{}'.", name);
}

fn display_strategies(side: StrategySide) {
    for (i, strategy) in Strategy::for_side(side).iter().enumerate() {
        println!("  {}. {:<18} {}", i + 1, strategy.id(), strategy.description());
    }
}

fn display_bullpen(session: &GameSession) {
    let club = session.club(MANAGED);
    if club.bullpen.is_empty() {
        println!("Bullpen is empty.");
        return;
    }
    for (i, p) in club.bullpen.iter().enumerate() {
        println!(
            "  {}. {:<22} {} | stuff {} control {} movement {} | overall {}",
            i + 1,
            p.name,
            p.throws.label(),
            p.ratings.stuff,
            p.ratings.control,
            p.ratings.movement,
            p.ratings.overall
        );
    }
}

fn display_odds(session: &GameSession, strategy: Option<Strategy>) {
    let odds = session.probabilities(strategy);
    println!(
        "1B {:.1}%  2B {:.1}%  3B {:.1}%  HR {:.1}%",
        odds.single * 100.0,
        odds.double * 100.0,
        odds.triple * 100.0,
        odds.home_run * 100.0
    );
    println!(
        "BB {:.1}%  K {:.1}%  GO {:.1}%  FO {:.1}%  (on base {:.1}%)",
        odds.walk * 100.0,
        odds.strikeout * 100.0,
        odds.groundout * 100.0,
        odds.flyout * 100.0,
        odds.on_base() * 100.0
    );
}

fn display_box_score(session: &GameSession) {
    let score = session.box_score();
    println!("{:<24} {:>3} {:>3} {:>3} {:>3} {:>4}", "", "R", "H", "BB", "K", "PIT");
    for side in [Side::Away, Side::Home] {
        let line = score.teams.get(side);
        println!(
            "{:<24} {:>3} {:>3} {:>3} {:>3} {:>4}",
            session.club(side).name,
            line.runs,
            line.hits,
            line.walks,
            line.strikeouts,
            line.pitches_thrown
        );
    }
    for side in [Side::Away, Side::Home] {
        println!(
            "{} pitchers: {}",
            session.club(side).name,
            score.teams.get(side).pitchers.join(", ")
        );
    }
}

fn narrate_play(session: &GameSession, narrator: &dyn NarrativeProvider, report: &AtBatReport) {
    println!(
        ">> {} - {}{}",
        report.batter_name,
        report.outcome.label(),
        match report.runs_scored {
            0 => String::new(),
            1 => " (1 run)".to_string(),
            n => format!(" ({} runs)", n),
        }
    );
    print_narration(narrator, &NarrativeRequest::Commentary(PlayFacts::from_report(report)));

    if report.half_inning_ended && !report.game_over {
        println!("--- Side retired ---");
    }

    if !report.mound_visit.is_empty() {
        let reasons: Vec<&str> = report.mound_visit.iter().map(|r| r.description()).collect();
        println!("!! Mound visit: {}", reasons.join(", "));
        let facts = MoundVisitFacts::from_session(session, report.mound_visit.clone());
        print_narration(narrator, &NarrativeRequest::MoundVisit(facts));
        if session.state().fielding_side() == MANAGED {
            println!("(Use 'bullpen' and 'pitch <n>' to make a change, or play on.)");
        }
    }
}

fn print_narration(narrator: &dyn NarrativeProvider, request: &NarrativeRequest) {
    match narrator.render(request) {
        Ok(text) => println!("{}", text),
        Err(e) => tracing::warn!("Narration failed: {}", e),
    }
}
