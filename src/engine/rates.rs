//! Outcome rate calculator
//!
//! Turns a batter/pitcher matchup and the situation into walk, strikeout
//! and hit percentages. Each rate is linear in the ratings, independent of
//! the others and clamped to its own band. Whatever is left after the three
//! is split between groundouts and flyouts by the simulator.

use crate::engine::constants::*;
use crate::player::ratings::{rating_factor, BatterRatings, PitcherRatings};
use serde::{Deserialize, Serialize};

/// Situational inputs read from the game state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SituationalContext {
    /// Fielding pitcher's fatigue, 0-100
    pub pitcher_fatigue: f64,
    /// A runner on second or third
    pub runners_in_scoring_position: bool,
    /// Batter stands on the same side as the pitcher's arm
    pub same_handedness: bool,
}

/// Walk, strikeout and hit percentages for one plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRates {
    pub walk: f64,
    pub strikeout: f64,
    pub hit: f64,
}

impl OutcomeRates {
    /// Percentage left over for balls in play that become outs
    pub fn in_play_out(&self) -> f64 {
        (100.0 - self.walk - self.strikeout - self.hit).max(0.0)
    }
}

fn fatigue_bonus(fatigue: f64, tired: f64, exhausted: f64) -> f64 {
    let mut bonus = 0.0;
    if fatigue > TIRED_FATIGUE {
        bonus += tired;
    }
    if fatigue > EXHAUSTED_FATIGUE {
        bonus += exhausted;
    }
    bonus
}

pub fn walk_rate(batter: &BatterRatings, pitcher: &PitcherRatings, ctx: &SituationalContext) -> f64 {
    let mut rate = WALK_BASE + rating_factor(batter.eye) * WALK_EYE_WEIGHT
        - rating_factor(pitcher.control) * WALK_CONTROL_WEIGHT;

    if ctx.runners_in_scoring_position {
        rate += WALK_RISP_BONUS;
    }
    rate += fatigue_bonus(ctx.pitcher_fatigue, WALK_TIRED_BONUS, WALK_EXHAUSTED_BONUS);

    rate.clamp(WALK_MIN, WALK_MAX)
}

pub fn strikeout_rate(
    batter: &BatterRatings,
    pitcher: &PitcherRatings,
    ctx: &SituationalContext,
) -> f64 {
    let mut rate = STRIKEOUT_BASE - rating_factor(batter.contact) * STRIKEOUT_CONTACT_WEIGHT
        + rating_factor(pitcher.stuff) * STRIKEOUT_STUFF_WEIGHT;

    rate -= fatigue_bonus(
        ctx.pitcher_fatigue,
        STRIKEOUT_TIRED_PENALTY,
        STRIKEOUT_EXHAUSTED_PENALTY,
    );
    if ctx.same_handedness {
        rate += STRIKEOUT_PLATOON_BONUS;
    }

    rate.clamp(STRIKEOUT_MIN, STRIKEOUT_MAX)
}

pub fn hit_rate(batter: &BatterRatings, pitcher: &PitcherRatings, ctx: &SituationalContext) -> f64 {
    let mut rate = HIT_BASE + rating_factor(batter.contact) * HIT_CONTACT_WEIGHT
        - rating_factor(pitcher.stuff) * HIT_STUFF_WEIGHT;

    rate += fatigue_bonus(ctx.pitcher_fatigue, HIT_TIRED_BONUS, HIT_EXHAUSTED_BONUS);
    if ctx.same_handedness {
        rate -= HIT_PLATOON_PENALTY;
    }

    rate.clamp(HIT_MIN, HIT_MAX)
}

/// All three clamped base rates
pub fn base_rates(
    batter: &BatterRatings,
    pitcher: &PitcherRatings,
    ctx: &SituationalContext,
) -> OutcomeRates {
    OutcomeRates {
        walk: walk_rate(batter, pitcher, ctx),
        strikeout: strikeout_rate(batter, pitcher, ctx),
        hit: hit_rate(batter, pitcher, ctx),
    }
}

/// Home runs as a share of hits, before any strategy multiplier
pub fn home_run_rate(power: u8, movement: u8) -> f64 {
    (HOME_RUN_BASE + rating_factor(power) * HOME_RUN_POWER_WEIGHT
        - rating_factor(movement) * HOME_RUN_MOVEMENT_WEIGHT)
        .clamp(HOME_RUN_MIN, HOME_RUN_MAX)
}

/// Doubles and triples as a share of hits
pub fn extra_base_rate(power: u8, movement: u8) -> f64 {
    (EXTRA_BASE_BASE + rating_factor(power) * EXTRA_BASE_POWER_WEIGHT
        - rating_factor(movement) * EXTRA_BASE_MOVEMENT_WEIGHT)
        .clamp(EXTRA_BASE_MIN, EXTRA_BASE_MAX)
}
