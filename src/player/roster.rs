//! Team rosters and batting order
//!
//! Team files are JSON documents produced by the ratings pipeline:
//! `{ "team_name": ..., "batters": [...], "pitchers": [...] }`.

use crate::core::error::{DugoutError, Result};
use crate::core::types::PlayerId;
use crate::player::ratings::{Batter, Pitcher};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Batters in a batting order
pub const LINEUP_SIZE: usize = 9;

/// Stamina grade separating starters from relievers
pub const STARTER_STAMINA: u8 = 55;

/// A full club roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    #[serde(rename = "team_name", alias = "name")]
    pub name: String,
    pub batters: Vec<Batter>,
    pub pitchers: Vec<Pitcher>,
}

impl Team {
    /// Check roster size, rating range and id uniqueness
    pub fn validate(&self) -> Result<()> {
        if self.batters.len() < LINEUP_SIZE {
            return Err(DugoutError::InvalidRoster(format!(
                "{} has {} batters, needs at least {}",
                self.name,
                self.batters.len(),
                LINEUP_SIZE
            )));
        }

        if self.pitchers.is_empty() {
            return Err(DugoutError::InvalidRoster(format!(
                "{} has no pitchers",
                self.name
            )));
        }

        for batter in &self.batters {
            if let Some((tool, grade)) = batter.out_of_range_grade() {
                return Err(DugoutError::InvalidRoster(format!(
                    "{}: {} grade {} is outside 20-80",
                    batter.name, tool, grade
                )));
            }
        }

        for pitcher in &self.pitchers {
            if let Some((tool, grade)) = pitcher.out_of_range_grade() {
                return Err(DugoutError::InvalidRoster(format!(
                    "{}: {} grade {} is outside 20-80",
                    pitcher.name, tool, grade
                )));
            }
        }

        let mut seen: AHashSet<PlayerId> = AHashSet::new();
        let ids = self
            .batters
            .iter()
            .map(|b| (b.id, &b.name))
            .chain(self.pitchers.iter().map(|p| (p.id, &p.name)));
        for (id, name) in ids {
            if !seen.insert(id) {
                return Err(DugoutError::InvalidRoster(format!(
                    "duplicate player id for {}",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Starting pitchers by overall grade, best first.
    /// Falls back to the whole staff when nobody has starter stamina.
    pub fn starters(&self) -> Vec<&Pitcher> {
        let mut starters: Vec<&Pitcher> = self
            .pitchers
            .iter()
            .filter(|p| p.ratings.stamina >= STARTER_STAMINA)
            .collect();
        if starters.is_empty() {
            starters = self.pitchers.iter().collect();
        }
        starters.sort_by(|a, b| b.ratings.overall.cmp(&a.ratings.overall));
        starters
    }

    /// Every pitcher except `starter`, best first
    pub fn bullpen_excluding(&self, starter: PlayerId) -> Vec<Pitcher> {
        let mut bullpen: Vec<Pitcher> = self
            .pitchers
            .iter()
            .filter(|p| p.id != starter)
            .cloned()
            .collect();
        bullpen.sort_by(|a, b| b.ratings.overall.cmp(&a.ratings.overall));
        bullpen
    }

    /// Default batting order: the nine best hitters by overall grade
    pub fn default_lineup(&self) -> Result<Lineup> {
        let mut batters: Vec<Batter> = self.batters.clone();
        batters.sort_by(|a, b| b.ratings.overall.cmp(&a.ratings.overall));
        batters.truncate(LINEUP_SIZE);
        Lineup::new(batters)
    }

    pub fn find_batter(&self, name: &str) -> Result<&Batter> {
        self.batters
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| DugoutError::PlayerNotFound(name.to_string()))
    }

    pub fn find_pitcher(&self, name: &str) -> Result<&Pitcher> {
        self.pitchers
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| DugoutError::PlayerNotFound(name.to_string()))
    }
}

/// Load and validate a team file
pub fn load_team(path: &Path) -> Result<Team> {
    let content = fs::read_to_string(path)?;
    let team: Team = serde_json::from_str(&content)?;
    team.validate()?;
    tracing::debug!(
        "Loaded {} ({} batters, {} pitchers)",
        team.name,
        team.batters.len(),
        team.pitchers.len()
    );
    Ok(team)
}

/// A batting order that wraps from the ninth hitter back to the leadoff hitter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lineup {
    batters: Vec<Batter>,
    next: usize,
}

impl Lineup {
    pub fn new(batters: Vec<Batter>) -> Result<Self> {
        if batters.len() != LINEUP_SIZE {
            return Err(DugoutError::InvalidRoster(format!(
                "lineup needs {} batters, got {}",
                LINEUP_SIZE,
                batters.len()
            )));
        }
        Ok(Self { batters, next: 0 })
    }

    /// Hitter due up
    pub fn current(&self) -> &Batter {
        &self.batters[self.next]
    }

    /// Slot (0-based) of the hitter due up
    pub fn slot(&self) -> usize {
        self.next
    }

    pub fn advance(&mut self) {
        self.next = (self.next + 1) % self.batters.len();
    }

    pub fn batters(&self) -> &[Batter] {
        &self.batters
    }
}
