//! Rule-based dugout advisor
//!
//! Reads a snapshot and a matchup and names what a coach would notice.
//! Used directly by the template narrator and as prompt material for the
//! remote one. Never touches game state.

use crate::engine::strategy::{Strategy, StrategySide};
use crate::game::state::GameSnapshot;
use crate::player::ratings::{Batter, Pitcher};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the pitcher on the mound is holding up
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitcherCondition {
    Fresh,
    Normal,
    Tiring,
    Tired,
    Exhausted,
}

impl PitcherCondition {
    pub fn description(&self) -> &'static str {
        match self {
            PitcherCondition::Fresh => "fresh",
            PitcherCondition::Normal => "normal",
            PitcherCondition::Tiring => "fatigue building",
            PitcherCondition::Tired => "tired, consider a change",
            PitcherCondition::Exhausted => "exhausted, needs replacing",
        }
    }
}

impl fmt::Display for PitcherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Either fatigue or raw pitch count can push a pitcher down a grade
pub fn assess_pitcher_condition(fatigue: f64, pitches: u32) -> PitcherCondition {
    if fatigue >= 90.0 || pitches >= 110 {
        PitcherCondition::Exhausted
    } else if fatigue >= 80.0 || pitches >= 100 {
        PitcherCondition::Tired
    } else if fatigue >= 60.0 || pitches >= 80 {
        PitcherCondition::Tiring
    } else if fatigue >= 40.0 || pitches >= 60 {
        PitcherCondition::Normal
    } else {
        PitcherCondition::Fresh
    }
}

/// Notable features of the situation, most pressing first
pub fn analyze_situation(snapshot: &GameSnapshot) -> Vec<&'static str> {
    let mut notes = Vec::new();

    if snapshot.runners_in_scoring_position {
        notes.push("runners in scoring position");
    }
    if snapshot.bases_loaded() {
        notes.push("bases loaded");
    }
    if snapshot.inning >= 7 {
        match snapshot.margin() {
            0 | 1 => notes.push("one-run game"),
            2 => notes.push("close game"),
            _ => {}
        }
    }
    if snapshot.pitcher_fatigue >= 80.0 {
        notes.push("tired pitcher");
    }

    if notes.is_empty() {
        notes.push("routine situation");
    }
    notes
}

/// A strategy pick with a one-line rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub reason: String,
}

/// Pick a strategy for `side` from ratings and situation
pub fn recommend_strategy(
    side: StrategySide,
    batter: &Batter,
    pitcher: &Pitcher,
    snapshot: &GameSnapshot,
) -> Recommendation {
    match side {
        StrategySide::Pitching => recommend_pitching(batter, pitcher, snapshot),
        StrategySide::Batting => recommend_batting(batter, pitcher, snapshot),
    }
}

fn recommend_pitching(batter: &Batter, pitcher: &Pitcher, snapshot: &GameSnapshot) -> Recommendation {
    let b = &batter.ratings;
    let p = &pitcher.ratings;
    let first_open = !snapshot.runners[0];

    let (strategy, reason) = if first_open && snapshot.runners_in_scoring_position && b.power >= 65 {
        (
            Strategy::IntentionalWalk,
            format!(
                "First base is open and {} has {} power; set up the force instead.",
                batter.name, b.power
            ),
        )
    } else if p.stuff >= b.contact.saturating_add(5) {
        (
            Strategy::Aggressive,
            format!(
                "{}'s stuff ({}) beats {}'s contact ({}); attack the zone.",
                pitcher.name, p.stuff, batter.name, b.contact
            ),
        )
    } else if b.power >= 60 {
        (
            Strategy::Careful,
            format!("{} can punish mistakes ({} power); work the edges.", batter.name, b.power),
        )
    } else {
        (
            Strategy::Aggressive,
            format!("{} is not a power threat; throw strikes.", batter.name),
        )
    };

    Recommendation { strategy, reason }
}

fn recommend_batting(batter: &Batter, pitcher: &Pitcher, snapshot: &GameSnapshot) -> Recommendation {
    let b = &batter.ratings;
    let p = &pitcher.ratings;

    let (strategy, reason) = if p.control <= 40 || snapshot.pitcher_fatigue >= 85.0 {
        (
            Strategy::Patient,
            format!(
                "{} is struggling to find the zone ({} control, {:.0}% fatigue); wait for a strike.",
                pitcher.name, p.control, snapshot.pitcher_fatigue
            ),
        )
    } else if b.power >= 60 && p.movement < 55 {
        (
            Strategy::PowerSwing,
            format!(
                "{} has {} power against flat movement ({}); look to drive one.",
                batter.name, b.power, p.movement
            ),
        )
    } else {
        (
            Strategy::ContactSwing,
            format!("Shorten up against {} and put the ball in play.", pitcher.name),
        )
    };

    Recommendation { strategy, reason }
}
