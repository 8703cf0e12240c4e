//! Mound visit triggers
//!
//! Stateless checks over the game state and the fielding pitcher's rolling
//! counters. Several reasons can fire at once; the caller picks which to show.

use crate::core::config::TriggerConfig;
use crate::engine::outcome::AtBatOutcome;
use crate::game::state::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rolling counters for the pitcher on the mound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherCounters {
    /// Hits allowed in a row within the current half-inning
    pub consecutive_hits: u32,
    /// Runs charged since entering the game
    pub runs_allowed: u32,
}

impl PitcherCounters {
    /// Fold one play into the counters
    pub fn record(&mut self, outcome: AtBatOutcome, runs: u32) {
        if outcome.is_hit() {
            self.consecutive_hits += 1;
        } else {
            self.consecutive_hits = 0;
        }
        self.runs_allowed += runs;
    }

    /// Streaks do not carry across half-innings
    pub fn end_half_inning(&mut self) {
        self.consecutive_hits = 0;
    }
}

/// Why the pitching coach wants to visit the mound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoundVisitReason {
    /// Pitcher is running out of gas
    PitcherFatigue,
    /// String of hits allowed
    ConsecutiveHits,
    /// Runner in scoring position with one out or fewer
    ScoringThreat,
    /// Every base occupied
    BasesLoaded,
    /// Late innings, defense ahead, tying or go-ahead run threatening
    LateLeadThreat,
    /// Late innings, defense behind, game at risk of slipping away
    LateDeficitThreat,
}

impl MoundVisitReason {
    pub fn description(&self) -> &'static str {
        match self {
            MoundVisitReason::PitcherFatigue => "pitcher fatigue is high",
            MoundVisitReason::ConsecutiveHits => "consecutive hits allowed",
            MoundVisitReason::ScoringThreat => "runners in scoring position with less than two outs",
            MoundVisitReason::BasesLoaded => "bases loaded",
            MoundVisitReason::LateLeadThreat => "late-inning lead under threat",
            MoundVisitReason::LateDeficitThreat => "late-inning deficit growing",
        }
    }
}

impl fmt::Display for MoundVisitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Evaluate every trigger rule. Empty means no visit.
pub fn evaluate_triggers(
    state: &GameState,
    counters: &PitcherCounters,
    thresholds: &TriggerConfig,
) -> Vec<MoundVisitReason> {
    let mut reasons = Vec::new();

    if state.pitcher_fatigue() >= thresholds.fatigue_threshold {
        reasons.push(MoundVisitReason::PitcherFatigue);
    }

    if counters.consecutive_hits >= thresholds.consecutive_hits {
        reasons.push(MoundVisitReason::ConsecutiveHits);
    }

    let risp = state.runners_in_scoring_position();
    if risp && state.outs <= 1 {
        reasons.push(MoundVisitReason::ScoringThreat);
    }

    if state.bases.is_loaded() {
        reasons.push(MoundVisitReason::BasesLoaded);
    }

    if state.inning >= thresholds.late_inning && risp {
        let lead = state.lead_for(state.fielding_side());
        if lead > 0 {
            reasons.push(MoundVisitReason::LateLeadThreat);
        } else if lead < 0 {
            reasons.push(MoundVisitReason::LateDeficitThreat);
        }
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Half, PlayerId};
    use crate::game::state::Base;

    #[test]
    fn test_quiet_inning_has_no_reasons() {
        let state = GameState::new(1);
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_fatigue_threshold_inclusive() {
        let mut state = GameState::new(1);
        state.home_pitcher_pitches = 90; // exactly 75%
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert_eq!(reasons, vec![MoundVisitReason::PitcherFatigue]);
    }

    #[test]
    fn test_counters_track_streaks() {
        let mut counters = PitcherCounters::default();
        counters.record(AtBatOutcome::Single, 0);
        counters.record(AtBatOutcome::Double, 1);
        counters.record(AtBatOutcome::HomeRun, 2);
        assert_eq!(counters.consecutive_hits, 3);
        assert_eq!(counters.runs_allowed, 3);

        let reasons = evaluate_triggers(&GameState::new(1), &counters, &TriggerConfig::default());
        assert!(reasons.contains(&MoundVisitReason::ConsecutiveHits));

        counters.record(AtBatOutcome::Walk, 0);
        assert_eq!(counters.consecutive_hits, 0);
        assert_eq!(counters.runs_allowed, 3);
    }

    #[test]
    fn test_bases_loaded_with_two_outs() {
        let mut state = GameState::new(1);
        state.outs = 2;
        for base in Base::DESCENDING {
            state.bases.place(base, PlayerId::new());
        }
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert_eq!(reasons, vec![MoundVisitReason::BasesLoaded]);
    }

    #[test]
    fn test_late_inning_lead_and_deficit() {
        let mut state = GameState::new(8);
        state.bases.place(Base::Second, PlayerId::new());
        state.outs = 2;

        // Top half: home fields and leads
        state.home_score = 3;
        state.away_score = 2;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert_eq!(reasons, vec![MoundVisitReason::LateLeadThreat]);

        // Bottom half: away fields and trails
        state.half = Half::Bottom;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert_eq!(reasons, vec![MoundVisitReason::LateDeficitThreat]);

        // Tied: neither
        state.away_score = 3;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_scoring_threat_with_one_out() {
        let mut state = GameState::new(1);
        state.bases.place(Base::Third, PlayerId::new());
        state.outs = 1;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert_eq!(reasons, vec![MoundVisitReason::ScoringThreat]);

        state.outs = 2;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &TriggerConfig::default());
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_late_threat_inning_boundary() {
        let thresholds = TriggerConfig::default();
        let mut state = GameState::new(thresholds.late_inning - 1);
        state.bases.place(Base::Second, PlayerId::new());
        state.outs = 2;
        state.home_score = 2;
        state.away_score = 1;

        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &thresholds);
        assert!(reasons.is_empty(), "inning 6 fired {:?}", reasons);

        state.inning = thresholds.late_inning;
        let reasons = evaluate_triggers(&state, &PitcherCounters::default(), &thresholds);
        assert_eq!(reasons, vec![MoundVisitReason::LateLeadThreat]);
    }
}
