//! Outcome processor
//!
//! Applies a resolved plate appearance to the game state: runner movement,
//! runs, outs and the half-inning change.

use crate::core::types::{PlayerId, Side};
use crate::engine::outcome::AtBatOutcome;
use crate::game::state::{Base, GameSnapshot, GameState};
use serde::{Deserialize, Serialize};

/// What one play did to the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayResult {
    pub outcome: AtBatOutcome,
    pub runs_scored: u32,
    /// Side credited with the runs
    pub batting_side: Side,
    /// The play made the third out
    pub half_inning_ended: bool,
    /// State at the end of the play, before any half-inning flip
    pub snapshot: GameSnapshot,
}

/// Apply `outcome` for `batter` and return what happened.
///
/// Callers must check `GameState::is_game_over` first.
pub fn apply_outcome(state: &mut GameState, outcome: AtBatOutcome, batter: PlayerId) -> PlayResult {
    debug_assert!(!state.is_game_over(), "play applied to a finished game");

    let batting_side = state.batting_side();
    let mut runs = 0;
    let mut third_out = false;

    match outcome {
        AtBatOutcome::Single | AtBatOutcome::Double | AtBatOutcome::Triple => {
            let bases = outcome.bases().unwrap_or(1);
            runs = state.bases.advance_all(bases);
            if let Some(base) = Base::from_number(bases) {
                state.bases.place(base, batter);
            }
        }
        AtBatOutcome::HomeRun => {
            runs = state.bases.advance_all(4) + 1;
            state.bases.clear();
        }
        AtBatOutcome::Walk => {
            runs = state.bases.force_walk(batter);
        }
        AtBatOutcome::Strikeout | AtBatOutcome::Groundout => {
            third_out = state.record_out();
        }
        AtBatOutcome::Flyout => {
            third_out = state.record_out();
            // Sacrifice fly: the out is recorded first, so a fly ball that is
            // the third out never brings the runner home.
            if !third_out && state.bases.take(Base::Third).is_some() {
                runs = 1;
            }
        }
    }

    if runs > 0 {
        state.add_runs(runs);
    }

    let snapshot = state.snapshot();

    if third_out {
        tracing::info!(
            "End of {} {}: away {} - home {}",
            state.half.label().to_lowercase(),
            state.inning,
            state.away_score,
            state.home_score
        );
        state.end_half_inning();
    }

    PlayResult {
        outcome,
        runs_scored: runs,
        batting_side,
        half_inning_ended: third_out,
        snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Half;

    #[test]
    fn test_triple_clears_bases_ahead() {
        let mut state = GameState::new(1);
        state.bases.place(Base::First, PlayerId::new());
        state.bases.place(Base::Second, PlayerId::new());
        let batter = PlayerId::new();

        let result = apply_outcome(&mut state, AtBatOutcome::Triple, batter);
        assert_eq!(result.runs_scored, 2);
        assert_eq!(state.bases.get(Base::Third), Some(batter));
        assert_eq!(state.bases.count(), 1);
        assert_eq!(state.away_score, 2);
    }

    #[test]
    fn test_double_scores_from_second() {
        let mut state = GameState::new(1);
        let runner = PlayerId::new();
        state.bases.place(Base::First, runner);
        state.bases.place(Base::Second, PlayerId::new());

        let result = apply_outcome(&mut state, AtBatOutcome::Double, PlayerId::new());
        assert_eq!(result.runs_scored, 1);
        assert_eq!(state.bases.get(Base::Third), Some(runner));
        assert!(state.bases.is_occupied(Base::Second));
        assert!(!state.bases.is_occupied(Base::First));
    }

    #[test]
    fn test_grand_slam() {
        let mut state = GameState::new(1);
        state.half = Half::Bottom;
        for base in Base::DESCENDING {
            state.bases.place(base, PlayerId::new());
        }
        let result = apply_outcome(&mut state, AtBatOutcome::HomeRun, PlayerId::new());
        assert_eq!(result.runs_scored, 4);
        assert_eq!(result.batting_side, Side::Home);
        assert_eq!(state.home_score, 4);
        assert!(state.bases.is_empty());
    }

    #[test]
    fn test_strikeout_only_records_out() {
        let mut state = GameState::new(1);
        state.bases.place(Base::Third, PlayerId::new());
        let result = apply_outcome(&mut state, AtBatOutcome::Strikeout, PlayerId::new());
        assert_eq!(result.runs_scored, 0);
        assert_eq!(state.outs, 1);
        assert!(state.bases.is_occupied(Base::Third));
    }

    #[test]
    fn test_snapshot_taken_before_flip() {
        let mut state = GameState::new(3);
        state.outs = 2;
        state.bases.place(Base::Second, PlayerId::new());
        let result = apply_outcome(&mut state, AtBatOutcome::Groundout, PlayerId::new());

        assert!(result.half_inning_ended);
        assert_eq!(result.snapshot.outs, 3);
        assert!(!result.snapshot.is_bottom);
        assert!(result.snapshot.runners_in_scoring_position);
        assert_eq!(state.outs, 0);
        assert!(state.is_bottom());
    }
}
