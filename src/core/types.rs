//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// One of the two clubs in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::Home => "home",
            Side::Away => "away",
        }
    }
}

/// Half of an inning. The away club bats in the top, the home club in the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    /// Side at the plate during this half
    pub fn batting_side(&self) -> Side {
        match self {
            Half::Top => Side::Away,
            Half::Bottom => Side::Home,
        }
    }

    /// Side in the field (and on the mound) during this half
    pub fn fielding_side(&self) -> Side {
        self.batting_side().opponent()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Half::Top => "Top",
            Half::Bottom => "Bottom",
        }
    }
}

/// Throwing hand of a pitcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hand {
    #[serde(rename = "L", alias = "left")]
    Left,
    #[default]
    #[serde(rename = "R", alias = "right")]
    Right,
}

impl Hand {
    /// "RHP" / "LHP"
    pub fn label(&self) -> &'static str {
        match self {
            Hand::Left => "LHP",
            Hand::Right => "RHP",
        }
    }
}

/// Batting side of a hitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BatSide {
    #[serde(rename = "L", alias = "left")]
    Left,
    #[default]
    #[serde(rename = "R", alias = "right")]
    Right,
    #[serde(rename = "S", alias = "switch")]
    Switch,
}

impl BatSide {
    /// Whether the hitter stands on the same side as the pitcher's arm.
    /// Switch hitters always take the opposite side.
    pub fn shares_hand(&self, throws: Hand) -> bool {
        matches!(
            (self, throws),
            (BatSide::Left, Hand::Left) | (BatSide::Right, Hand::Right)
        )
    }
}

/// A value kept once for each club
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerSide<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}
