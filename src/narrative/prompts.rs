//! Prompt builders for the remote narrator
//!
//! Each builder returns `(system, user)`. The user prompt carries every fact
//! the model may mention; the system prompt forbids inventing others.

use crate::engine::strategy::{Strategy, StrategySide};
use crate::game::state::GameSnapshot;
use crate::narrative::advisor::{analyze_situation, assess_pitcher_condition};
use crate::narrative::{CoachAdviceFacts, MoundVisitFacts, NarrativeRequest, PlayFacts};

const COMMENTARY_SYSTEM: &str = "You are a baseball play-by-play announcer. \
Write one or two lively sentences about the play described. \
Use only the facts given; never invent scores, runners or players.";

const MOUND_VISIT_SYSTEM: &str = "You write short dialogue for a mound visit. \
Only the catcher and the pitcher speak, two or three lines in total, \
each formatted as `Speaker: line`. End waiting on the manager's decision.";

const COACH_SYSTEM: &str = "You are a major-league coach. Analyse briefly and \
recommend exactly one of the listed strategies. \
Format: [Recommendation] number. strategy / [Reason] ...";

/// Dispatch on the request kind
pub fn build(request: &NarrativeRequest) -> (String, String) {
    match request {
        NarrativeRequest::Commentary(facts) => commentary_prompt(facts),
        NarrativeRequest::MoundVisit(facts) => mound_visit_prompt(facts),
        NarrativeRequest::CoachAdvice(facts) => coach_advice_prompt(facts),
    }
}

/// "1st, 3rd" or "none"
pub fn format_runners(snapshot: &GameSnapshot) -> String {
    let on: Vec<&str> = ["1st", "2nd", "3rd"]
        .iter()
        .zip(snapshot.runners.iter())
        .filter(|(_, occupied)| **occupied)
        .map(|(base, _)| *base)
        .collect();
    if on.is_empty() {
        "none".to_string()
    } else {
        on.join(", ")
    }
}

/// "Bottom 8, 2 out(s), runners: 1st, score: away 3 - 4 home"
pub fn format_situation(snapshot: &GameSnapshot) -> String {
    format!(
        "{} {}, {} out(s), runners: {}, score: away {} - {} home",
        snapshot.half().label(),
        snapshot.inning,
        snapshot.outs,
        format_runners(snapshot),
        snapshot.away_score,
        snapshot.home_score
    )
}

pub fn commentary_prompt(facts: &PlayFacts) -> (String, String) {
    let user = format!(
        "[Situation after the play] {}\n\
         [Batter] {}\n\
         [Pitcher] {}\n\
         [Result] {}\n\
         [Runs scored] {}",
        format_situation(&facts.snapshot),
        facts.batter_name,
        facts.pitcher_name,
        facts.outcome.label(),
        facts.runs_scored
    );
    (COMMENTARY_SYSTEM.to_string(), user)
}

pub fn mound_visit_prompt(facts: &MoundVisitFacts) -> (String, String) {
    let reasons: Vec<&str> = facts.reasons.iter().map(|r| r.description()).collect();
    let user = format!(
        "[Pitcher] {}\n\
         [Catcher] {}\n\
         [Why the visit] {}\n\
         [Fatigue] {:.0}%\n\
         [Pitches] {}\n\
         [Runs allowed] {}\n\
         [Situation] {}",
        facts.pitcher_name,
        facts.catcher_name,
        reasons.join(", "),
        facts.fatigue,
        facts.pitches,
        facts.runs_allowed,
        format_situation(&facts.snapshot)
    );
    (MOUND_VISIT_SYSTEM.to_string(), user)
}

pub fn coach_advice_prompt(facts: &CoachAdviceFacts) -> (String, String) {
    let b = &facts.batter.ratings;
    let p = &facts.pitcher.ratings;
    let snapshot = &facts.snapshot;

    let coach = match facts.side {
        StrategySide::Pitching => "pitching coach",
        StrategySide::Batting => "hitting coach",
    };
    let options: Vec<String> = Strategy::for_side(facts.side)
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {} - {}", i + 1, s.id(), s.description()))
        .collect();

    let user = format!(
        "You are the {}.\n\
         [Situation] {} ({})\n\
         [Batter: {}] Contact {}, Power {}, Eye {}, Overall {}\n\
         [Pitcher: {}] Stuff {}, Control {}, Movement {}, Overall {}\n\
         [Pitcher now] {} pitches, {:.0}% fatigue, {}\n\
         [Options]\n{}\n\
         1) One sentence on the situation.\n\
         2) Recommended option and why, two or three sentences.",
        coach,
        format_situation(snapshot),
        analyze_situation(snapshot).join(", "),
        facts.batter.name,
        b.contact,
        b.power,
        b.eye,
        b.overall,
        facts.pitcher.name,
        p.stuff,
        p.control,
        p.movement,
        p.overall,
        snapshot.pitcher_pitches,
        snapshot.pitcher_fatigue,
        assess_pitcher_condition(snapshot.pitcher_fatigue, snapshot.pitcher_pitches),
        options.join("\n")
    );
    (COACH_SYSTEM.to_string(), user)
}
