//! Player rating snapshots on the 20-80 scouting scale
//!
//! 50 is league average, 20 is the floor and 80 is elite. Ratings are
//! read-only for the length of a game.

use crate::core::types::{BatSide, Hand, PlayerId};
use serde::{Deserialize, Serialize};

/// Lowest grade on the scouting scale
pub const RATING_MIN: u8 = 20;
/// Highest grade on the scouting scale
pub const RATING_MAX: u8 = 80;
/// League-average grade
pub const RATING_AVERAGE: u8 = 50;

/// Distance from average, normalized so 80 maps to +0.6 and 20 to -0.6
pub fn rating_factor(rating: u8) -> f64 {
    (rating as f64 - RATING_AVERAGE as f64) / RATING_AVERAGE as f64
}

/// Hitting tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatterRatings {
    pub contact: u8,
    pub power: u8,
    pub eye: u8,
    pub speed: u8,
    pub defense: u8,
    pub overall: u8,
}

impl BatterRatings {
    /// Every tool at league average
    pub fn average() -> Self {
        Self {
            contact: RATING_AVERAGE,
            power: RATING_AVERAGE,
            eye: RATING_AVERAGE,
            speed: RATING_AVERAGE,
            defense: RATING_AVERAGE,
            overall: RATING_AVERAGE,
        }
    }

    fn grades(&self) -> [(&'static str, u8); 6] {
        [
            ("contact", self.contact),
            ("power", self.power),
            ("eye", self.eye),
            ("speed", self.speed),
            ("defense", self.defense),
            ("overall", self.overall),
        ]
    }
}

/// Pitching tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherRatings {
    pub stuff: u8,
    pub control: u8,
    pub movement: u8,
    pub stamina: u8,
    pub overall: u8,
}

impl PitcherRatings {
    /// Every tool at league average
    pub fn average() -> Self {
        Self {
            stuff: RATING_AVERAGE,
            control: RATING_AVERAGE,
            movement: RATING_AVERAGE,
            stamina: RATING_AVERAGE,
            overall: RATING_AVERAGE,
        }
    }

    fn grades(&self) -> [(&'static str, u8); 5] {
        [
            ("stuff", self.stuff),
            ("control", self.control),
            ("movement", self.movement),
            ("stamina", self.stamina),
            ("overall", self.overall),
        ]
    }
}

/// A position player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batter {
    #[serde(default)]
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub bats: BatSide,
    #[serde(rename = "ratings_20_80")]
    pub ratings: BatterRatings,
}

impl Batter {
    pub fn new(name: impl Into<String>, bats: BatSide, ratings: BatterRatings) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            bats,
            ratings,
        }
    }

    /// First grade outside 20-80, if any
    pub fn out_of_range_grade(&self) -> Option<(&'static str, u8)> {
        self.ratings
            .grades()
            .into_iter()
            .find(|(_, g)| !(RATING_MIN..=RATING_MAX).contains(g))
    }
}

/// A pitcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pitcher {
    #[serde(default)]
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub throws: Hand,
    #[serde(rename = "ratings_20_80")]
    pub ratings: PitcherRatings,
}

impl Pitcher {
    pub fn new(name: impl Into<String>, throws: Hand, ratings: PitcherRatings) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            throws,
            ratings,
        }
    }

    /// First grade outside 20-80, if any
    pub fn out_of_range_grade(&self) -> Option<(&'static str, u8)> {
        self.ratings
            .grades()
            .into_iter()
            .find(|(_, g)| !(RATING_MIN..=RATING_MAX).contains(g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_factor_scale() {
        assert_eq!(rating_factor(50), 0.0);
        assert!((rating_factor(80) - 0.6).abs() < 1e-9);
        assert!((rating_factor(20) + 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_batter_json_without_id_gets_fresh_id() {
        let json = r#"{
            "name": "Test Hitter",
            "bats": "L",
            "ratings_20_80": {
                "contact": 60, "power": 55, "eye": 50,
                "speed": 45, "defense": 50, "overall": 55
            }
        }"#;
        let a: Batter = serde_json::from_str(json).unwrap();
        let b: Batter = serde_json::from_str(json).unwrap();
        assert_eq!(a.bats, BatSide::Left);
        assert_eq!(a.ratings.contact, 60);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_out_of_range_grade_detected() {
        let mut ratings = PitcherRatings::average();
        ratings.control = 85;
        let pitcher = Pitcher::new("Wild Thing", Hand::Right, ratings);
        assert_eq!(pitcher.out_of_range_grade(), Some(("control", 85)));

        let batter = Batter::new("Steady", BatSide::Right, BatterRatings::average());
        assert_eq!(batter.out_of_range_grade(), None);
    }
}
