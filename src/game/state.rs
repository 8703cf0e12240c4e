//! Game state - the single authority for in-progress game facts
//!
//! Runner, score and out changes go through `game::processor`. Pitch
//! counts change through pitch accrual and the pitcher-change action.
//! Everything else only reads.

use crate::core::types::{Half, PlayerId, Side};
use crate::engine::rates::SituationalContext;
use crate::player::ratings::{Batter, Pitcher};
use serde::{Deserialize, Serialize};

/// Pitch count at which fatigue reaches 100%
pub const FATIGUE_PITCH_LIMIT: f64 = 120.0;

/// Outs that end a half-inning
pub const OUTS_PER_HALF: u8 = 3;

/// A base a runner can stand on. Home is not a base; reaching it is a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// Bases from third down to first, the order runners must move in
    pub const DESCENDING: [Base; 3] = [Base::Third, Base::Second, Base::First];

    pub fn number(&self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Base> {
        match n {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        self.number() as usize - 1
    }
}

/// Base occupancy, one runner per base at most
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    occupants: [Option<PlayerId>; 3],
}

impl Bases {
    pub fn get(&self, base: Base) -> Option<PlayerId> {
        self.occupants[base.index()]
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.get(base).is_some()
    }

    /// Put a runner on a base, replacing whoever was there
    pub fn place(&mut self, base: Base, runner: PlayerId) {
        self.occupants[base.index()] = Some(runner);
    }

    /// Remove and return the runner on a base
    pub fn take(&mut self, base: Base) -> Option<PlayerId> {
        self.occupants[base.index()].take()
    }

    pub fn clear(&mut self) {
        self.occupants = [None; 3];
    }

    pub fn count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.count() == 3
    }

    /// Occupancy flags for first, second, third
    pub fn occupied(&self) -> [bool; 3] {
        [
            self.is_occupied(Base::First),
            self.is_occupied(Base::Second),
            self.is_occupied(Base::Third),
        ]
    }

    /// Move every runner `n` bases, third base first. Returns runs scored.
    pub fn advance_all(&mut self, n: u8) -> u32 {
        let mut runs = 0;
        for base in Base::DESCENDING {
            if let Some(runner) = self.take(base) {
                match Base::from_number(base.number() + n) {
                    Some(target) => self.place(target, runner),
                    None => runs += 1,
                }
            }
        }
        runs
    }

    /// Walk: only runners in an unbroken chain from first move up.
    /// Returns runs scored (0 or 1).
    pub fn force_walk(&mut self, batter: PlayerId) -> u32 {
        let mut runs = 0;
        if let Some(on_first) = self.get(Base::First) {
            if let Some(on_second) = self.get(Base::Second) {
                if self.is_occupied(Base::Third) {
                    runs = 1;
                }
                self.place(Base::Third, on_second);
            }
            self.place(Base::Second, on_first);
        }
        self.place(Base::First, batter);
        runs
    }

    /// Human-readable occupancy, e.g. "runners on 1st and 3rd"
    pub fn describe(&self) -> String {
        let names: Vec<&str> = [(Base::First, "1st"), (Base::Second, "2nd"), (Base::Third, "3rd")]
            .iter()
            .filter(|(base, _)| self.is_occupied(*base))
            .map(|(_, name)| *name)
            .collect();
        match names.len() {
            0 => "bases empty".to_string(),
            1 => format!("runner on {}", names[0]),
            3 => "bases loaded".to_string(),
            _ => format!("runners on {}", names.join(" and ")),
        }
    }
}

/// Public view of the game used by narrators and logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub inning: u32,
    pub is_bottom: bool,
    pub outs: u8,
    pub home_score: u32,
    pub away_score: u32,
    pub runners: [bool; 3],
    pub runners_in_scoring_position: bool,
    pub pitcher_pitches: u32,
    pub pitcher_fatigue: f64,
}

impl GameSnapshot {
    pub fn half(&self) -> Half {
        if self.is_bottom {
            Half::Bottom
        } else {
            Half::Top
        }
    }

    /// Absolute run difference
    pub fn margin(&self) -> u32 {
        self.home_score.abs_diff(self.away_score)
    }

    pub fn bases_loaded(&self) -> bool {
        self.runners.iter().all(|r| *r)
    }
}

/// In-progress game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub home_score: u32,
    pub away_score: u32,
    /// Current inning, 1-based
    pub inning: u32,
    pub half: Half,
    /// Outs in the current half, always below 3 between plays
    pub outs: u8,
    pub bases: Bases,
    /// Pitches thrown by the home club's active pitcher
    pub home_pitcher_pitches: u32,
    /// Pitches thrown by the away club's active pitcher
    pub away_pitcher_pitches: u32,
    /// Innings before extras
    pub regulation_innings: u32,
}

impl GameState {
    /// Fresh game at the top of `start_inning`, nine-inning regulation
    pub fn new(start_inning: u32) -> Self {
        Self::with_regulation(start_inning, 9)
    }

    pub fn with_regulation(start_inning: u32, regulation_innings: u32) -> Self {
        Self {
            home_score: 0,
            away_score: 0,
            inning: start_inning.max(1),
            half: Half::Top,
            outs: 0,
            bases: Bases::default(),
            home_pitcher_pitches: 0,
            away_pitcher_pitches: 0,
            regulation_innings,
        }
    }

    pub fn is_bottom(&self) -> bool {
        self.half == Half::Bottom
    }

    pub fn batting_side(&self) -> Side {
        self.half.batting_side()
    }

    pub fn fielding_side(&self) -> Side {
        self.half.fielding_side()
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_score,
            Side::Away => self.away_score,
        }
    }

    /// Runs `side` leads by (negative when trailing)
    pub fn lead_for(&self, side: Side) -> i64 {
        self.score(side) as i64 - self.score(side.opponent()) as i64
    }

    pub fn pitches(&self, side: Side) -> u32 {
        match side {
            Side::Home => self.home_pitcher_pitches,
            Side::Away => self.away_pitcher_pitches,
        }
    }

    /// Pitch count of the pitcher currently on the mound
    pub fn pitcher_pitches(&self) -> u32 {
        self.pitches(self.fielding_side())
    }

    /// Charge pitches to `side`'s active pitcher
    pub fn add_pitches(&mut self, side: Side, pitches: u32) {
        match side {
            Side::Home => self.home_pitcher_pitches += pitches,
            Side::Away => self.away_pitcher_pitches += pitches,
        }
    }

    /// New pitcher for `side`: count (and so fatigue) starts over
    pub fn reset_pitch_count(&mut self, side: Side) {
        match side {
            Side::Home => self.home_pitcher_pitches = 0,
            Side::Away => self.away_pitcher_pitches = 0,
        }
    }

    /// Fatigue percentage of `side`'s active pitcher, capped at 100
    pub fn fatigue_for(&self, side: Side) -> f64 {
        (self.pitches(side) as f64 / FATIGUE_PITCH_LIMIT * 100.0).min(100.0)
    }

    /// Fatigue of the pitcher currently on the mound
    pub fn pitcher_fatigue(&self) -> f64 {
        self.fatigue_for(self.fielding_side())
    }

    pub fn runners_in_scoring_position(&self) -> bool {
        self.bases.is_occupied(Base::Second) || self.bases.is_occupied(Base::Third)
    }

    /// Situational inputs for the rate calculator
    pub fn situation(&self, batter: &Batter, pitcher: &Pitcher) -> SituationalContext {
        SituationalContext {
            pitcher_fatigue: self.pitcher_fatigue(),
            runners_in_scoring_position: self.runners_in_scoring_position(),
            same_handedness: batter.bats.shares_hand(pitcher.throws),
        }
    }

    /// Credit runs to the batting side
    pub fn add_runs(&mut self, runs: u32) {
        match self.batting_side() {
            Side::Home => self.home_score += runs,
            Side::Away => self.away_score += runs,
        }
    }

    /// Record an out. Returns true when it is the third.
    pub fn record_out(&mut self) -> bool {
        self.outs += 1;
        self.outs >= OUTS_PER_HALF
    }

    /// Clear the bases and flip to the next half
    pub fn end_half_inning(&mut self) {
        self.outs = 0;
        self.bases.clear();
        match self.half {
            Half::Top => self.half = Half::Bottom,
            Half::Bottom => {
                self.inning += 1;
                self.half = Half::Top;
            }
        }
    }

    /// Terminal condition.
    ///
    /// Over when the home club leads at any point of a bottom half from the
    /// final regulation inning on (walk-off, or no need to bat), or when a
    /// full extra inning has been completed with the scores apart.
    pub fn is_game_over(&self) -> bool {
        let home_leads_in_bottom = self.half == Half::Bottom
            && self.inning >= self.regulation_innings
            && self.home_score > self.away_score;
        let decided_after_full_inning = self.half == Half::Top
            && self.inning > self.regulation_innings
            && self.home_score != self.away_score;
        home_leads_in_bottom || decided_after_full_inning
    }

    /// Winner, once the game is over
    pub fn winner(&self) -> Option<Side> {
        if !self.is_game_over() {
            return None;
        }
        if self.home_score > self.away_score {
            Some(Side::Home)
        } else {
            Some(Side::Away)
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            inning: self.inning,
            is_bottom: self.is_bottom(),
            outs: self.outs,
            home_score: self.home_score,
            away_score: self.away_score,
            runners: self.bases.occupied(),
            runners_in_scoring_position: self.runners_in_scoring_position(),
            pitcher_pitches: self.pitcher_pitches(),
            pitcher_fatigue: self.pitcher_fatigue(),
        }
    }

    /// One-line scoreboard, e.g. "Top 7 | Away 2 - 3 Home | 1 out | runner on 2nd"
    pub fn summary(&self, away_name: &str, home_name: &str) -> String {
        let outs = match self.outs {
            1 => "1 out".to_string(),
            n => format!("{} outs", n),
        };
        format!(
            "{} {} | {} {} - {} {} | {} | {}",
            self.half.label(),
            self.inning,
            away_name,
            self.away_score,
            self.home_score,
            home_name,
            outs,
            self.bases.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_runs_third_first() {
        let mut bases = Bases::default();
        let (a, b) = (PlayerId::new(), PlayerId::new());
        bases.place(Base::First, a);
        bases.place(Base::Second, b);

        let runs = bases.advance_all(1);
        assert_eq!(runs, 0);
        assert_eq!(bases.get(Base::Second), Some(a));
        assert_eq!(bases.get(Base::Third), Some(b));
        assert!(!bases.is_occupied(Base::First));

        let runs = bases.advance_all(2);
        assert_eq!(runs, 2);
        assert!(bases.is_empty());
    }

    #[test]
    fn test_walk_with_first_and_third_leaves_third() {
        let mut bases = Bases::default();
        let (a, c, batter) = (PlayerId::new(), PlayerId::new(), PlayerId::new());
        bases.place(Base::First, a);
        bases.place(Base::Third, c);

        let runs = bases.force_walk(batter);
        assert_eq!(runs, 0);
        assert_eq!(bases.get(Base::First), Some(batter));
        assert_eq!(bases.get(Base::Second), Some(a));
        assert_eq!(bases.get(Base::Third), Some(c));
    }

    #[test]
    fn test_walk_with_runner_on_second_only() {
        let mut bases = Bases::default();
        let (b, batter) = (PlayerId::new(), PlayerId::new());
        bases.place(Base::Second, b);

        assert_eq!(bases.force_walk(batter), 0);
        assert_eq!(bases.get(Base::Second), Some(b));
        assert_eq!(bases.get(Base::First), Some(batter));
        assert!(!bases.is_occupied(Base::Third));
    }

    #[test]
    fn test_fatigue_caps_at_100() {
        let mut state = GameState::new(1);
        state.add_pitches(Side::Home, 60);
        assert!((state.pitcher_fatigue() - 50.0).abs() < 1e-9);
        state.add_pitches(Side::Home, 100);
        assert_eq!(state.pitcher_fatigue(), 100.0);
        assert_eq!(state.fatigue_for(Side::Away), 0.0);

        state.reset_pitch_count(Side::Home);
        assert_eq!(state.pitcher_fatigue(), 0.0);
    }

    #[test]
    fn test_fatigue_follows_fielding_side() {
        let mut state = GameState::new(1);
        state.add_pitches(Side::Away, 90);
        assert_eq!(state.pitcher_pitches(), 0);
        state.end_half_inning();
        assert_eq!(state.pitcher_pitches(), 90);
        assert!((state.pitcher_fatigue() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_inning_flip() {
        let mut state = GameState::new(7);
        state.end_half_inning();
        assert_eq!((state.inning, state.half), (7, Half::Bottom));
        state.end_half_inning();
        assert_eq!((state.inning, state.half), (8, Half::Top));
    }

    #[test]
    fn test_game_over_rules() {
        let mut state = GameState::new(9);
        state.home_score = 1;
        assert!(!state.is_game_over(), "top of 9th, away still bats");

        state.half = Half::Bottom;
        assert!(state.is_game_over(), "home leads after top of 9th");
        assert_eq!(state.winner(), Some(Side::Home));

        let mut state = GameState::new(9);
        state.away_score = 2;
        state.half = Half::Bottom;
        assert!(!state.is_game_over(), "home still bats in the bottom");

        state.end_half_inning();
        assert!(state.is_game_over());
        assert_eq!(state.winner(), Some(Side::Away));

        let mut state = GameState::new(10);
        state.half = Half::Bottom;
        state.away_score = 1;
        assert!(!state.is_game_over(), "extra-inning bottom half is still played");
    }

    #[test]
    fn test_tied_after_nine_goes_to_extras() {
        let mut state = GameState::new(9);
        state.half = Half::Bottom;
        state.end_half_inning();
        assert_eq!(state.inning, 10);
        assert!(!state.is_game_over());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_summary_line() {
        let mut state = GameState::new(7);
        state.outs = 1;
        state.bases.place(Base::Second, PlayerId::new());
        state.home_score = 3;
        state.away_score = 2;
        assert_eq!(
            state.summary("Away", "Home"),
            "Top 7 | Away 2 - 3 Home | 1 out | runner on 2nd"
        );
    }
}
