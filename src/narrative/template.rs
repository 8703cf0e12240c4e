//! Static template narrator
//!
//! Always available. Picks among candidate lines with its own seeded RNG,
//! kept apart from the game RNG so narration never perturbs outcomes.

use crate::core::error::Result;
use crate::engine::outcome::AtBatOutcome;
use crate::engine::strategy::Strategy;
use crate::game::triggers::MoundVisitReason;
use crate::narrative::advisor::{analyze_situation, recommend_strategy};
use crate::narrative::{
    CoachAdviceFacts, MoundVisitFacts, NarrativeProvider, NarrativeRequest, PlayFacts,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

pub struct TemplateNarrator {
    rng: Mutex<ChaCha8Rng>,
}

impl TemplateNarrator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn pick(&self, lines: Vec<String>) -> String {
        // A poisoned lock only means another render panicked mid-choice
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.choose(&mut *rng).cloned().unwrap_or_default()
    }
}

/// Candidate play-by-play lines, first line tagged in tense late innings
pub fn commentary_lines(facts: &PlayFacts) -> Vec<String> {
    let b = &facts.batter_name;
    let p = &facts.pitcher_name;
    let snap = &facts.snapshot;
    let clutch = snap.runners_in_scoring_position;
    let runs = facts.runs_scored;

    let mut lines = Vec::new();
    match facts.outcome {
        AtBatOutcome::HomeRun => {
            lines.push(format!("{} crushes a home run!", b));
            if clutch {
                lines.push(format!("{} launches one with runners in scoring position!", b));
            }
            if runs >= 3 {
                lines.push(format!("{} clears the bases, {} runs score!", b, runs));
            }
        }
        AtBatOutcome::Single | AtBatOutcome::Double | AtBatOutcome::Triple => {
            lines.push(format!("{} lines a clean {}!", b, facts.outcome.label().to_lowercase()));
            if clutch && runs > 0 {
                lines.push(format!("{} comes through, {} in!", b, plural_runs(runs)));
            }
        }
        AtBatOutcome::Strikeout => {
            lines.push(format!("{} strikes out {}.", p, b));
            if clutch && snap.outs >= 2 {
                lines.push(format!("{} escapes the jam!", p));
            }
        }
        AtBatOutcome::Groundout | AtBatOutcome::Flyout => {
            if clutch && snap.outs >= 2 {
                lines.push(format!("{} gets a huge out!", p));
            } else {
                lines.push(format!("{} is retired.", b));
            }
        }
        AtBatOutcome::Walk => {
            lines.push(format!("{} draws a walk.", b));
        }
    }

    if snap.inning >= 8 && snap.margin() <= 1 {
        if let Some(first) = lines.first_mut() {
            first.push_str(" A tense moment!");
        }
    }
    lines
}

fn plural_runs(runs: u32) -> String {
    if runs == 1 {
        "1 run".to_string()
    } else {
        format!("{} runs", runs)
    }
}

/// Catcher opens, pitcher answers; manager decides
pub fn mound_visit_dialogue(facts: &MoundVisitFacts) -> String {
    let p = &facts.pitcher_name;
    let c = &facts.catcher_name;

    let opener = match facts.reasons.first() {
        Some(MoundVisitReason::PitcherFatigue) => format!(
            "{}, you okay? {} pitches in and your stuff is flattening out.",
            p, facts.pitches
        ),
        Some(MoundVisitReason::ConsecutiveHits) => {
            "They're sitting on your fastball. Let's mix it up.".to_string()
        }
        Some(MoundVisitReason::BasesLoaded) => {
            "Bases are full. Keep it down and get the ground ball.".to_string()
        }
        Some(MoundVisitReason::ScoringThreat) => {
            "Runner's in scoring position. Nothing over the middle.".to_string()
        }
        Some(MoundVisitReason::LateLeadThreat) => {
            "We're ahead late. Don't give them anything to hit.".to_string()
        }
        Some(MoundVisitReason::LateDeficitThreat) => {
            "We can't let this get away. Hold them right here.".to_string()
        }
        None => format!("{}, just checking in.", p),
    };
    let reply = if facts.fatigue >= 85.0 {
        "I've still got something. One more hitter."
    } else {
        "I'm fine. Let's keep going."
    };
    let handoff = format!("Skip, your call on {}.", p);

    format!("{}: {}\n{}: {}\n{}: {}", c, opener, p, reply, c, handoff)
}

/// Recommendation in the coach's answer format
pub fn coach_advice(facts: &CoachAdviceFacts) -> String {
    let rec = recommend_strategy(facts.side, &facts.batter, &facts.pitcher, &facts.snapshot);
    let number = Strategy::for_side(facts.side)
        .iter()
        .position(|s| *s == rec.strategy)
        .map(|i| i + 1)
        .unwrap_or(1);
    format!(
        "[Situation] {}\n[Recommendation] {}. {} / [Reason] {}",
        analyze_situation(&facts.snapshot).join(", "),
        number,
        rec.strategy,
        rec.reason
    )
}

impl NarrativeProvider for TemplateNarrator {
    fn name(&self) -> &str {
        "template"
    }

    fn render(&self, request: &NarrativeRequest) -> Result<String> {
        let text = match request {
            NarrativeRequest::Commentary(facts) => self.pick(commentary_lines(facts)),
            NarrativeRequest::MoundVisit(facts) => mound_visit_dialogue(facts),
            NarrativeRequest::CoachAdvice(facts) => coach_advice(facts),
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::GameState;

    fn facts(outcome: AtBatOutcome, runs: u32) -> PlayFacts {
        PlayFacts {
            outcome,
            batter_name: "Rivera".into(),
            pitcher_name: "Okafor".into(),
            snapshot: GameState::new(3).snapshot(),
            runs_scored: runs,
        }
    }

    #[test]
    fn test_every_outcome_has_a_line() {
        for outcome in AtBatOutcome::all() {
            assert!(!commentary_lines(&facts(*outcome, 0)).is_empty(), "{}", outcome);
        }
    }

    #[test]
    fn test_big_homer_adds_line() {
        let mut play = facts(AtBatOutcome::HomeRun, 4);
        play.snapshot.runners_in_scoring_position = true;
        let lines = commentary_lines(&play);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("4 runs score"));
    }

    #[test]
    fn test_clutch_out_credits_pitcher() {
        let mut play = facts(AtBatOutcome::Groundout, 0);
        play.snapshot.runners_in_scoring_position = true;
        play.snapshot.outs = 2;
        assert_eq!(commentary_lines(&play), vec!["Okafor gets a huge out!"]);
    }

    #[test]
    fn test_late_close_game_is_tense() {
        let mut play = facts(AtBatOutcome::Walk, 0);
        play.snapshot.inning = 9;
        play.snapshot.home_score = 2;
        play.snapshot.away_score = 1;
        assert_eq!(commentary_lines(&play), vec!["Rivera draws a walk. A tense moment!"]);
    }

    #[test]
    fn test_same_seed_same_lines() {
        let mut play = facts(AtBatOutcome::HomeRun, 3);
        play.snapshot.runners_in_scoring_position = true;
        let request = NarrativeRequest::Commentary(play);

        let a = TemplateNarrator::new(9);
        let b = TemplateNarrator::new(9);
        for _ in 0..10 {
            assert_eq!(a.render(&request).unwrap(), b.render(&request).unwrap());
        }
    }

    #[test]
    fn test_mound_visit_dialogue_shape() {
        let text = mound_visit_dialogue(&MoundVisitFacts {
            pitcher_name: "Okafor".into(),
            catcher_name: "Catcher".into(),
            reasons: vec![MoundVisitReason::PitcherFatigue],
            pitches: 92,
            fatigue: 76.7,
            runs_allowed: 1,
            snapshot: GameState::new(7).snapshot(),
        });
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Catcher: Okafor, you okay? 92 pitches"));
        assert!(lines[1].starts_with("Okafor: "));
    }
}
