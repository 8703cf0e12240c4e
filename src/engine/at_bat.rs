//! At-bat resolution
//!
//! One plate appearance is two or three uniform draws:
//! 1. `r` in [0,100) picks walk, strikeout, hit or ball-in-play out
//!    against the cumulative (strategy-adjusted) rates.
//! 2. For hits, `r2` in [0,100) picks homer, extra-base hit or single,
//!    then a third draw splits extra-base hits into doubles and triples.
//! 3. For balls in play, a second draw splits grounders from fly balls.
//!
//! The simulator never touches game state; `game::processor` applies the result.

use crate::engine::constants::{DOUBLE_SHARE, GROUNDOUT_SHARE};
use crate::engine::outcome::AtBatOutcome;
use crate::engine::rates::{base_rates, extra_base_rate, home_run_rate, OutcomeRates, SituationalContext};
use crate::engine::strategy::{modifier_for, Strategy};
use crate::player::ratings::{BatterRatings, PitcherRatings};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// First-draw branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateResolution {
    Walk,
    Strikeout,
    Hit,
    InPlayOut,
}

/// Split of hits into types, in percent of hits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitProfile {
    /// Home-run share, power multiplier applied
    pub home_run: f64,
    /// Double-or-triple share
    pub extra_base: f64,
}

impl HitProfile {
    /// Hit profile for a batter's power against a pitcher's movement.
    /// The strategy's power multiplier scales home runs only.
    pub fn for_matchup(power: u8, movement: u8, power_multiplier: f64) -> Self {
        Self {
            home_run: home_run_rate(power, movement) * power_multiplier,
            extra_base: extra_base_rate(power, movement),
        }
    }
}

/// Resolve the first draw against cumulative rates
pub fn classify_plate_appearance(rates: &OutcomeRates, r: f64) -> PlateResolution {
    if r < rates.walk {
        PlateResolution::Walk
    } else if r < rates.walk + rates.strikeout {
        PlateResolution::Strikeout
    } else if r < rates.walk + rates.strikeout + rates.hit {
        PlateResolution::Hit
    } else {
        PlateResolution::InPlayOut
    }
}

/// Resolve a hit from `r2` in [0,100) and a [0,1) draw for double vs triple
pub fn classify_hit(profile: &HitProfile, r2: f64, double_draw: f64) -> AtBatOutcome {
    if r2 < profile.home_run {
        AtBatOutcome::HomeRun
    } else if r2 < profile.home_run + profile.extra_base {
        if double_draw < DOUBLE_SHARE {
            AtBatOutcome::Double
        } else {
            AtBatOutcome::Triple
        }
    } else {
        AtBatOutcome::Single
    }
}

/// Resolve a ball-in-play out from a [0,1) draw
pub fn classify_in_play_out(draw: f64) -> AtBatOutcome {
    if draw < GROUNDOUT_SHARE {
        AtBatOutcome::Groundout
    } else {
        AtBatOutcome::Flyout
    }
}

/// Rates after the strategy modifier, plus the hit profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchupRates {
    pub rates: OutcomeRates,
    pub hits: HitProfile,
}

impl MatchupRates {
    pub fn compute(
        batter: &BatterRatings,
        pitcher: &PitcherRatings,
        ctx: &SituationalContext,
        strategy: Option<Strategy>,
    ) -> Self {
        let modifier = modifier_for(strategy);
        let rates = modifier.apply(base_rates(batter, pitcher, ctx));
        let hits = HitProfile::for_matchup(batter.power, pitcher.movement, modifier.power);
        Self { rates, hits }
    }
}

/// Simulate one plate appearance
pub fn simulate<R: Rng + ?Sized>(
    rng: &mut R,
    batter: &BatterRatings,
    pitcher: &PitcherRatings,
    ctx: &SituationalContext,
    strategy: Option<Strategy>,
) -> AtBatOutcome {
    let matchup = MatchupRates::compute(batter, pitcher, ctx, strategy);

    let r = rng.gen::<f64>() * 100.0;
    let outcome = match classify_plate_appearance(&matchup.rates, r) {
        PlateResolution::Walk => AtBatOutcome::Walk,
        PlateResolution::Strikeout => AtBatOutcome::Strikeout,
        PlateResolution::Hit => {
            let r2 = rng.gen::<f64>() * 100.0;
            let double_draw = if r2 >= matchup.hits.home_run
                && r2 < matchup.hits.home_run + matchup.hits.extra_base
            {
                rng.gen::<f64>()
            } else {
                0.0
            };
            classify_hit(&matchup.hits, r2, double_draw)
        }
        PlateResolution::InPlayOut => classify_in_play_out(rng.gen::<f64>()),
    };

    tracing::trace!(?strategy, r, %outcome, "plate appearance resolved");
    outcome
}

/// Closed-form outcome distribution for a matchup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtBatProbabilities {
    pub single: f64,
    pub double: f64,
    pub triple: f64,
    pub home_run: f64,
    pub walk: f64,
    pub strikeout: f64,
    pub groundout: f64,
    pub flyout: f64,
}

impl AtBatProbabilities {
    pub fn compute(
        batter: &BatterRatings,
        pitcher: &PitcherRatings,
        ctx: &SituationalContext,
        strategy: Option<Strategy>,
    ) -> Self {
        let MatchupRates { rates, hits } = MatchupRates::compute(batter, pitcher, ctx, strategy);

        // Cumulative thresholds on the [0,100) draw
        let c_walk = rates.walk.clamp(0.0, 100.0);
        let c_strikeout = (rates.walk + rates.strikeout).clamp(0.0, 100.0);
        let c_hit = (rates.walk + rates.strikeout + rates.hit).clamp(0.0, 100.0);

        let p_hit = (c_hit - c_strikeout) / 100.0;
        let p_out = (100.0 - c_hit) / 100.0;

        let c_home_run = hits.home_run.clamp(0.0, 100.0);
        let c_extra = (hits.home_run + hits.extra_base).clamp(0.0, 100.0);
        let hr_share = c_home_run / 100.0;
        let xbh_share = (c_extra - c_home_run) / 100.0;
        let single_share = (100.0 - c_extra) / 100.0;

        Self {
            single: p_hit * single_share,
            double: p_hit * xbh_share * DOUBLE_SHARE,
            triple: p_hit * xbh_share * (1.0 - DOUBLE_SHARE),
            home_run: p_hit * hr_share,
            walk: c_walk / 100.0,
            strikeout: (c_strikeout - c_walk) / 100.0,
            groundout: p_out * GROUNDOUT_SHARE,
            flyout: p_out * (1.0 - GROUNDOUT_SHARE),
        }
    }

    pub fn probability(&self, outcome: AtBatOutcome) -> f64 {
        match outcome {
            AtBatOutcome::Single => self.single,
            AtBatOutcome::Double => self.double,
            AtBatOutcome::Triple => self.triple,
            AtBatOutcome::HomeRun => self.home_run,
            AtBatOutcome::Walk => self.walk,
            AtBatOutcome::Strikeout => self.strikeout,
            AtBatOutcome::Groundout => self.groundout,
            AtBatOutcome::Flyout => self.flyout,
        }
    }

    /// Chance the plate appearance ends with the batter on base
    pub fn on_base(&self) -> f64 {
        self.single + self.double + self.triple + self.home_run + self.walk
    }
}
