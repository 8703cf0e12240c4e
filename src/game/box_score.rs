//! Box score accumulation

use crate::core::types::{PerSide, PlayerId, Side};
use crate::engine::outcome::AtBatOutcome;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Per-batter line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterLine {
    pub name: String,
    pub plate_appearances: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub rbi: u32,
}

/// Club totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLine {
    pub runs: u32,
    pub hits: u32,
    pub walks: u32,
    pub strikeouts: u32,
    /// Pitches thrown by this club's staff
    pub pitches_thrown: u32,
    /// Pitchers used, in order of appearance
    pub pitchers: Vec<String>,
}

/// Whole-game box score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxScore {
    pub teams: PerSide<TeamLine>,
    pub batters: AHashMap<PlayerId, BatterLine>,
}

impl BoxScore {
    pub fn new(home_starter: &str, away_starter: &str) -> Self {
        let mut teams: PerSide<TeamLine> = PerSide::default();
        teams.home.pitchers.push(home_starter.to_string());
        teams.away.pitchers.push(away_starter.to_string());
        Self {
            teams,
            batters: AHashMap::new(),
        }
    }

    /// Credit a plate appearance to the batting side.
    /// Runs scored on the play count as RBI for the batter.
    pub fn record_plate_appearance(
        &mut self,
        side: Side,
        batter: PlayerId,
        batter_name: &str,
        outcome: AtBatOutcome,
        runs: u32,
    ) {
        let team = self.teams.get_mut(side);
        team.runs += runs;

        let line = self.batters.entry(batter).or_insert_with(|| BatterLine {
            name: batter_name.to_string(),
            ..Default::default()
        });
        line.plate_appearances += 1;
        line.rbi += runs;

        match outcome {
            AtBatOutcome::Walk => {
                team.walks += 1;
                line.walks += 1;
            }
            AtBatOutcome::Strikeout => {
                team.strikeouts += 1;
                line.strikeouts += 1;
            }
            o if o.is_hit() => {
                team.hits += 1;
                line.hits += 1;
                if o == AtBatOutcome::HomeRun {
                    line.home_runs += 1;
                }
            }
            _ => {}
        }
    }

    /// Charge pitches to the fielding side's staff
    pub fn record_pitches(&mut self, fielding: Side, pitches: u32) {
        self.teams.get_mut(fielding).pitches_thrown += pitches;
    }

    pub fn record_pitching_change(&mut self, side: Side, reliever: &str) {
        self.teams.get_mut(side).pitchers.push(reliever.to_string());
    }

    pub fn batter_line(&self, batter: PlayerId) -> Option<&BatterLine> {
        self.batters.get(&batter)
    }
}
