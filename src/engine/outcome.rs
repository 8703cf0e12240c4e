//! Plate appearance outcomes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtBatOutcome {
    Single,
    Double,
    Triple,
    #[serde(rename = "homerun")]
    HomeRun,
    Walk,
    Strikeout,
    Groundout,
    Flyout,
}

impl AtBatOutcome {
    /// All outcomes
    pub fn all() -> &'static [AtBatOutcome] {
        &[
            AtBatOutcome::Single,
            AtBatOutcome::Double,
            AtBatOutcome::Triple,
            AtBatOutcome::HomeRun,
            AtBatOutcome::Walk,
            AtBatOutcome::Strikeout,
            AtBatOutcome::Groundout,
            AtBatOutcome::Flyout,
        ]
    }

    pub fn is_hit(&self) -> bool {
        self.bases().is_some()
    }

    pub fn is_out(&self) -> bool {
        matches!(
            self,
            AtBatOutcome::Strikeout | AtBatOutcome::Groundout | AtBatOutcome::Flyout
        )
    }

    /// Bases the batter takes on a hit
    pub fn bases(&self) -> Option<u8> {
        match self {
            AtBatOutcome::Single => Some(1),
            AtBatOutcome::Double => Some(2),
            AtBatOutcome::Triple => Some(3),
            AtBatOutcome::HomeRun => Some(4),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            AtBatOutcome::Single => "single",
            AtBatOutcome::Double => "double",
            AtBatOutcome::Triple => "triple",
            AtBatOutcome::HomeRun => "homerun",
            AtBatOutcome::Walk => "walk",
            AtBatOutcome::Strikeout => "strikeout",
            AtBatOutcome::Groundout => "groundout",
            AtBatOutcome::Flyout => "flyout",
        }
    }

    /// Scorebook-style label
    pub fn label(&self) -> &'static str {
        match self {
            AtBatOutcome::Single => "Single",
            AtBatOutcome::Double => "Double",
            AtBatOutcome::Triple => "Triple",
            AtBatOutcome::HomeRun => "Home run",
            AtBatOutcome::Walk => "Walk",
            AtBatOutcome::Strikeout => "Strikeout",
            AtBatOutcome::Groundout => "Groundout",
            AtBatOutcome::Flyout => "Flyout",
        }
    }
}

impl fmt::Display for AtBatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_and_outs_partition() {
        for outcome in AtBatOutcome::all() {
            let kinds = [outcome.is_hit(), outcome.is_out(), *outcome == AtBatOutcome::Walk];
            assert_eq!(kinds.iter().filter(|k| **k).count(), 1, "{:?}", outcome);
        }
    }

    #[test]
    fn test_serde_ids_match() {
        for outcome in AtBatOutcome::all() {
            let json = serde_json::to_string(outcome).unwrap();
            assert_eq!(json, format!("\"{}\"", outcome.id()));
        }
    }
}
