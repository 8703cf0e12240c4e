//! Manager strategies and their rate modifiers
//!
//! A strategy multiplies the already-clamped base rates for one plate
//! appearance. Nothing is re-clamped here: an inflated walk rate simply
//! crowds the other branches out of the 0-100 draw.

use crate::core::error::DugoutError;
use crate::engine::rates::OutcomeRates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which dugout calls the strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySide {
    Pitching,
    Batting,
}

/// Multipliers applied to walk, strikeout and hit rates, plus home-run power
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyModifier {
    pub walk: f64,
    pub strikeout: f64,
    pub hit: f64,
    pub power: f64,
}

impl StrategyModifier {
    /// No adjustment
    pub const NEUTRAL: StrategyModifier = StrategyModifier {
        walk: 1.0,
        strikeout: 1.0,
        hit: 1.0,
        power: 1.0,
    };

    pub fn apply(&self, rates: OutcomeRates) -> OutcomeRates {
        OutcomeRates {
            walk: rates.walk * self.walk,
            strikeout: rates.strikeout * self.strikeout,
            hit: rates.hit * self.hit,
        }
    }
}

impl Default for StrategyModifier {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Tactical call for a single plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Attack the zone: fewer walks, more strikeouts, more hard contact
    Aggressive,
    /// Work the edges: more walks, fewer hits, less power
    Careful,
    /// Put the batter on first
    IntentionalWalk,
    /// Swing for the fences
    PowerSwing,
    /// Shorten up and put the ball in play
    ContactSwing,
    /// Take pitches and look for a walk
    Patient,
}

impl Strategy {
    /// All strategies
    pub fn all() -> &'static [Strategy] {
        &[
            Strategy::Aggressive,
            Strategy::Careful,
            Strategy::IntentionalWalk,
            Strategy::PowerSwing,
            Strategy::ContactSwing,
            Strategy::Patient,
        ]
    }

    /// Strategies available to one dugout
    pub fn for_side(side: StrategySide) -> Vec<Strategy> {
        Self::all()
            .iter()
            .copied()
            .filter(|s| s.side() == side)
            .collect()
    }

    pub fn side(&self) -> StrategySide {
        match self {
            Strategy::Aggressive | Strategy::Careful | Strategy::IntentionalWalk => {
                StrategySide::Pitching
            }
            Strategy::PowerSwing | Strategy::ContactSwing | Strategy::Patient => {
                StrategySide::Batting
            }
        }
    }

    pub fn modifier(&self) -> StrategyModifier {
        match self {
            Strategy::Aggressive => StrategyModifier {
                walk: 0.4,
                strikeout: 1.6,
                hit: 1.3,
                power: 1.4,
            },
            Strategy::Careful => StrategyModifier {
                walk: 1.8,
                strikeout: 0.6,
                hit: 0.6,
                power: 0.5,
            },
            // 999 pushes any clamped walk rate past 100
            Strategy::IntentionalWalk => StrategyModifier {
                walk: 999.0,
                strikeout: 0.0,
                hit: 0.0,
                power: 0.0,
            },
            Strategy::PowerSwing => StrategyModifier {
                walk: 0.3,
                strikeout: 1.5,
                hit: 1.6,
                power: 2.2,
            },
            Strategy::ContactSwing => StrategyModifier {
                walk: 0.7,
                strikeout: 0.5,
                hit: 1.4,
                power: 0.6,
            },
            Strategy::Patient => StrategyModifier {
                walk: 2.5,
                strikeout: 0.7,
                hit: 0.7,
                power: 0.4,
            },
        }
    }

    /// Stable identifier used in configs, logs and prompts
    pub fn id(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "aggressive",
            Strategy::Careful => "careful",
            Strategy::IntentionalWalk => "intentional_walk",
            Strategy::PowerSwing => "power_swing",
            Strategy::ContactSwing => "contact_swing",
            Strategy::Patient => "patient",
        }
    }

    /// Short description for menus
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Aggressive => "attack the zone (K up, BB down, extra-base risk up)",
            Strategy::Careful => "pitch to the edges (BB up, hits and power down)",
            Strategy::IntentionalWalk => "put the batter on first",
            Strategy::PowerSwing => "swing for the fences (power up, K up)",
            Strategy::ContactSwing => "put it in play (hits up, power down)",
            Strategy::Patient => "work the count (BB up, hits down)",
        }
    }

    /// Permissive lookup: unknown identifiers mean "no strategy"
    pub fn lookup(id: &str) -> Option<Strategy> {
        id.parse().ok()
    }
}

impl FromStr for Strategy {
    type Err = DugoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.id() == wanted)
            .ok_or_else(|| DugoutError::UnknownStrategy(s.to_string()))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Modifier for an optional strategy
pub fn modifier_for(strategy: Option<Strategy>) -> StrategyModifier {
    strategy.map(|s| s.modifier()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip_through_parse() {
        for strategy in Strategy::all() {
            assert_eq!(strategy.id().parse::<Strategy>().unwrap(), *strategy);
        }
        assert_eq!(
            "Power Swing".parse::<Strategy>().unwrap(),
            Strategy::PowerSwing
        );
    }

    #[test]
    fn test_unknown_id_degrades_to_none() {
        assert_eq!(Strategy::lookup("hit_and_run"), None);
        assert_eq!(Strategy::lookup(""), None);
        assert!(matches!(
            "bunt".parse::<Strategy>(),
            Err(DugoutError::UnknownStrategy(_))
        ));
        assert_eq!(modifier_for(None), StrategyModifier::NEUTRAL);
    }

    #[test]
    fn test_sides_split_evenly() {
        assert_eq!(Strategy::for_side(StrategySide::Pitching).len(), 3);
        assert_eq!(Strategy::for_side(StrategySide::Batting).len(), 3);
        assert_eq!(Strategy::Patient.side(), StrategySide::Batting);
    }

    #[test]
    fn test_apply_multiplies_without_clamping() {
        let rates = OutcomeRates {
            walk: 10.0,
            strikeout: 20.0,
            hit: 30.0,
        };
        let patient = Strategy::Patient.modifier().apply(rates);
        assert!((patient.walk - 25.0).abs() < 1e-9);
        assert!((patient.strikeout - 14.0).abs() < 1e-9);
        assert!((patient.hit - 21.0).abs() < 1e-9);

        let ibb = Strategy::IntentionalWalk.modifier().apply(rates);
        assert!(ibb.walk > 100.0);
        assert_eq!(ibb.strikeout, 0.0);
        assert_eq!(ibb.hit, 0.0);
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Strategy::IntentionalWalk).unwrap();
        assert_eq!(json, "\"intentional_walk\"");
    }
}
