//! Game session - everything one game needs, owned in one place
//!
//! The session threads a single seeded RNG through every draw, so two
//! sessions built from the same rosters, config and seed replay identically.

use crate::core::config::EngineConfig;
use crate::core::error::{DugoutError, Result};
use crate::core::types::{Half, PerSide, PlayerId, Side};
use crate::engine::at_bat::{simulate, AtBatProbabilities};
use crate::engine::outcome::AtBatOutcome;
use crate::engine::rates::SituationalContext;
use crate::engine::strategy::Strategy;
use crate::game::box_score::BoxScore;
use crate::game::processor::apply_outcome;
use crate::game::state::{GameSnapshot, GameState};
use crate::game::triggers::{evaluate_triggers, MoundVisitReason, PitcherCounters};
use crate::player::ratings::{Batter, Pitcher};
use crate::player::roster::{Lineup, Team};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// One club's in-game personnel
#[derive(Debug, Clone)]
pub struct Club {
    pub name: String,
    pub lineup: Lineup,
    /// Pitcher on the mound when this club fields
    pub pitcher: Pitcher,
    /// Unused arms, best first
    pub bullpen: Vec<Pitcher>,
    pub counters: PitcherCounters,
}

impl Club {
    /// Default lineup, best starter on the mound, everyone else in the pen
    pub fn from_team(team: &Team) -> Result<Self> {
        team.validate()?;
        let starter = team
            .starters()
            .first()
            .map(|p| (*p).clone())
            .ok_or_else(|| DugoutError::InvalidRoster(format!("{} has no pitchers", team.name)))?;
        let bullpen = team.bullpen_excluding(starter.id);

        Ok(Self {
            name: team.name.clone(),
            lineup: team.default_lineup()?,
            pitcher: starter,
            bullpen,
            counters: PitcherCounters::default(),
        })
    }
}

/// Everything that happened in one plate appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtBatReport {
    pub inning: u32,
    pub half: Half,
    pub batter_id: PlayerId,
    pub batter_name: String,
    pub pitcher_name: String,
    pub strategy: Option<Strategy>,
    pub outcome: AtBatOutcome,
    pub runs_scored: u32,
    /// Pitches the plate appearance cost
    pub pitches: u32,
    /// Situation the plate appearance was resolved in
    pub context: SituationalContext,
    pub half_inning_ended: bool,
    /// End-of-play view, pitch count included
    pub snapshot: GameSnapshot,
    /// Reasons to visit the mound before the next batter
    pub mound_visit: Vec<MoundVisitReason>,
    pub game_over: bool,
}

/// A game in progress
pub struct GameSession {
    state: GameState,
    config: EngineConfig,
    rng: ChaCha8Rng,
    seed: u64,
    clubs: PerSide<Club>,
    box_score: BoxScore,
    play_log: Vec<AtBatReport>,
}

impl GameSession {
    pub fn new(home: &Team, away: &Team, config: EngineConfig) -> Result<Self> {
        Self::with_clubs(Club::from_team(home)?, Club::from_team(away)?, config)
    }

    /// Start from clubs with hand-picked lineups and starters
    pub fn with_clubs(home: Club, away: Club, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let seed = config.game.seed.unwrap_or_else(rand::random);
        let state =
            GameState::with_regulation(config.game.start_inning, config.game.regulation_innings);
        let box_score = BoxScore::new(&home.pitcher.name, &away.pitcher.name);

        tracing::info!(
            "New game: {} at {} from inning {} (seed {})",
            away.name,
            home.name,
            state.inning,
            seed
        );

        Ok(Self {
            state,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            clubs: PerSide::new(home, away),
            box_score,
            play_log: Vec::new(),
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn club(&self, side: Side) -> &Club {
        self.clubs.get(side)
    }

    pub fn box_score(&self) -> &BoxScore {
        &self.box_score
    }

    pub fn play_log(&self) -> &[AtBatReport] {
        &self.play_log
    }

    pub fn is_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn winner(&self) -> Option<Side> {
        self.state.winner()
    }

    /// Hitter due up
    pub fn current_batter(&self) -> &Batter {
        self.clubs.get(self.state.batting_side()).lineup.current()
    }

    /// Pitcher on the mound
    pub fn current_pitcher(&self) -> &Pitcher {
        &self.clubs.get(self.state.fielding_side()).pitcher
    }

    /// Counters of the pitcher on the mound
    pub fn current_counters(&self) -> &PitcherCounters {
        &self.clubs.get(self.state.fielding_side()).counters
    }

    /// Outcome odds for the upcoming plate appearance
    pub fn probabilities(&self, strategy: Option<Strategy>) -> AtBatProbabilities {
        let batter = self.current_batter();
        let pitcher = self.current_pitcher();
        let ctx = self.state.situation(batter, pitcher);
        AtBatProbabilities::compute(&batter.ratings, &pitcher.ratings, &ctx, strategy)
    }

    /// Scoreboard line with club names
    pub fn summary(&self) -> String {
        self.state
            .summary(&self.clubs.away.name, &self.clubs.home.name)
    }

    /// Resolve the next plate appearance: charge pitches, simulate, apply,
    /// update counters and check mound-visit triggers.
    pub fn play_at_bat(&mut self, strategy: Option<Strategy>) -> Result<AtBatReport> {
        if self.is_over() {
            return Err(DugoutError::GameOver(self.summary()));
        }

        let batting = self.state.batting_side();
        let fielding = batting.opponent();
        let (inning, half) = (self.state.inning, self.state.half);

        let batter = self.clubs.get(batting).lineup.current().clone();
        let pitcher = self.clubs.get(fielding).pitcher.clone();

        // Pitches land before the swing, so fatigue includes this batter
        let game = &self.config.game;
        let pitches = self
            .rng
            .gen_range(game.min_pitches_per_at_bat..=game.max_pitches_per_at_bat);
        self.state.add_pitches(fielding, pitches);
        self.box_score.record_pitches(fielding, pitches);

        let ctx = self.state.situation(&batter, &pitcher);
        let outcome = simulate(&mut self.rng, &batter.ratings, &pitcher.ratings, &ctx, strategy);
        let result = apply_outcome(&mut self.state, outcome, batter.id);

        self.box_score.record_plate_appearance(
            batting,
            batter.id,
            &batter.name,
            outcome,
            result.runs_scored,
        );

        let counters = &mut self.clubs.get_mut(fielding).counters;
        counters.record(outcome, result.runs_scored);
        if result.half_inning_ended {
            counters.end_half_inning();
        }
        self.clubs.get_mut(batting).lineup.advance();

        let game_over = self.is_over();
        let mound_visit = if result.half_inning_ended || game_over {
            Vec::new()
        } else {
            evaluate_triggers(
                &self.state,
                &self.clubs.get(fielding).counters,
                &self.config.triggers,
            )
        };

        let mut snapshot = result.snapshot;
        snapshot.pitcher_pitches = self.state.pitches(fielding);
        snapshot.pitcher_fatigue = self.state.fatigue_for(fielding);

        tracing::debug!(
            "{} {}: {} vs {} -> {} ({} run(s), {} pitches)",
            half.label(),
            inning,
            batter.name,
            pitcher.name,
            outcome,
            result.runs_scored,
            pitches
        );
        if game_over {
            tracing::info!("Final: {}", self.summary());
        }

        let report = AtBatReport {
            inning,
            half,
            batter_id: batter.id,
            batter_name: batter.name,
            pitcher_name: pitcher.name,
            strategy,
            outcome,
            runs_scored: result.runs_scored,
            pitches,
            context: ctx,
            half_inning_ended: result.half_inning_ended,
            snapshot,
            mound_visit,
            game_over,
        };
        self.play_log.push(report.clone());
        Ok(report)
    }

    /// Bring in `bullpen_index` for `side`. The new arm starts at zero
    /// pitches with fresh counters; the old one leaves the game.
    pub fn change_pitcher(&mut self, side: Side, bullpen_index: usize) -> Result<&Pitcher> {
        let club = self.clubs.get_mut(side);
        if bullpen_index >= club.bullpen.len() {
            return Err(DugoutError::PlayerNotFound(format!(
                "{} bullpen slot {}",
                club.name, bullpen_index
            )));
        }

        let reliever = club.bullpen.remove(bullpen_index);
        tracing::info!(
            "{} pitching change: {} replaces {} after {} pitches",
            club.name,
            reliever.name,
            club.pitcher.name,
            self.state.pitches(side)
        );
        club.pitcher = reliever;
        club.counters = PitcherCounters::default();
        self.state.reset_pitch_count(side);
        self.box_score.record_pitching_change(side, &club.pitcher.name);

        Ok(&self.clubs.get(side).pitcher)
    }

    /// Replace the pitcher on the mound with the best available reliever
    /// once fatigue reaches the visit threshold. Returns the reliever's name.
    pub fn pull_tired_pitcher(&mut self) -> Result<Option<String>> {
        let fielding = self.state.fielding_side();
        let tired = self.state.fatigue_for(fielding) >= self.config.triggers.fatigue_threshold;
        if !tired || self.clubs.get(fielding).bullpen.is_empty() {
            return Ok(None);
        }
        let reliever = self.change_pitcher(fielding, 0)?;
        Ok(Some(reliever.name.clone()))
    }

    /// Play until the game ends. `choose` picks a strategy for each plate
    /// appearance; with `auto_relief` tired pitchers are pulled first.
    pub fn play_out<F>(&mut self, mut choose: F, auto_relief: bool) -> Result<usize>
    where
        F: FnMut(&GameSession) -> Option<Strategy>,
    {
        let mut plate_appearances = 0;
        while !self.is_over() {
            if auto_relief {
                self.pull_tired_pitcher()?;
            }
            let strategy = choose(self);
            self.play_at_bat(strategy)?;
            plate_appearances += 1;
        }
        Ok(plate_appearances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BatSide, Hand};
    use crate::player::ratings::{BatterRatings, PitcherRatings};

    fn team(name: &str) -> Team {
        let mut starter = PitcherRatings::average();
        starter.stamina = 65;
        Team {
            name: name.into(),
            batters: (0..9)
                .map(|i| Batter::new(format!("{} B{}", name, i), BatSide::Right, BatterRatings::average()))
                .collect(),
            pitchers: vec![
                Pitcher::new(format!("{} SP", name), Hand::Right, starter),
                Pitcher::new(format!("{} RP", name), Hand::Left, PitcherRatings::average()),
            ],
        }
    }

    fn seeded(seed: u64) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.game.seed = Some(seed);
        config
    }

    #[test]
    fn test_session_starts_with_best_starter() {
        let session = GameSession::new(&team("H"), &team("A"), seeded(1)).unwrap();
        assert_eq!(session.current_pitcher().name, "H SP");
        assert_eq!(session.current_batter().name, "A B0");
        assert_eq!(session.state().inning, 7);
        assert_eq!(session.club(Side::Home).bullpen.len(), 1);
    }

    #[test]
    fn test_pitches_charged_to_fielding_side() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(2)).unwrap();
        let report = session.play_at_bat(None).unwrap();
        assert!((4..=6).contains(&report.pitches));
        assert_eq!(session.state().pitches(Side::Home), report.pitches);
        assert_eq!(session.state().pitches(Side::Away), 0);
        assert_eq!(report.snapshot.pitcher_pitches, report.pitches);
    }

    #[test]
    fn test_pitches_count_toward_fatigue_of_the_same_batter() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(6)).unwrap();
        session.state.add_pitches(Side::Home, 84);
        assert!((session.state().fatigue_for(Side::Home) - 70.0).abs() < 1e-9);

        let report = session.play_at_bat(None).unwrap();
        assert!(report.context.pitcher_fatigue > 70.0);
        assert_eq!(report.context.pitcher_fatigue, report.snapshot.pitcher_fatigue);
        assert_eq!(session.state().pitches(Side::Home), 84 + report.pitches);
    }

    #[test]
    fn test_reliever_faces_first_batter_with_pitches_charged() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(8)).unwrap();
        session.change_pitcher(Side::Home, 0).unwrap();
        let report = session.play_at_bat(None).unwrap();
        assert!(report.context.pitcher_fatigue > 0.0);
    }

    #[test]
    fn test_batting_order_moves_with_each_plate_appearance() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(9)).unwrap();
        assert_eq!(session.club(Side::Away).lineup.slot(), 0);
        session.play_at_bat(None).unwrap();
        assert_eq!(session.club(Side::Away).lineup.slot(), 1);
        assert_eq!(session.club(Side::Home).lineup.slot(), 0);
    }

    #[test]
    fn test_change_pitcher_resets_count() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(3)).unwrap();
        session.play_at_bat(None).unwrap();
        assert!(session.state().pitches(Side::Home) > 0);

        let name = session.change_pitcher(Side::Home, 0).unwrap().name.clone();
        assert_eq!(name, "H RP");
        assert_eq!(session.state().pitches(Side::Home), 0);
        assert!(session.club(Side::Home).bullpen.is_empty());
        assert!(matches!(
            session.change_pitcher(Side::Home, 0),
            Err(DugoutError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn test_finished_game_rejects_plays() {
        let mut session = GameSession::new(&team("H"), &team("A"), seeded(4)).unwrap();
        session.play_out(|_| None, true).unwrap();
        assert!(session.is_over());
        assert!(session.winner().is_some());
        assert!(matches!(
            session.play_at_bat(None),
            Err(DugoutError::GameOver(_))
        ));
    }
}
