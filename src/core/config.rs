//! Engine configuration with documented defaults
//!
//! Tunables that shape a session live here. The at-bat formula constants
//! are fixed and live in `engine::constants`.

use crate::core::error::{DugoutError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration for a game session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub game: GameConfig,
    pub triggers: TriggerConfig,
    pub narrative: NarrativeConfig,
}

/// Game flow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Inning the manager takes over in
    ///
    /// The default of 7 drops the player into the late innings, where
    /// bullpen and matchup decisions matter most.
    pub start_inning: u32,

    /// Innings in a regulation game before extras
    pub regulation_innings: u32,

    /// Fewest pitches a plate appearance can cost the pitcher
    pub min_pitches_per_at_bat: u32,

    /// Most pitches a plate appearance can cost the pitcher
    ///
    /// At 4-6 pitches per batter a pitcher reaches the 120-pitch fatigue
    /// ceiling after roughly 24 batters.
    pub max_pitches_per_at_bat: u32,

    /// Seed for the session RNG. A random seed is chosen when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_inning: 7,
            regulation_innings: 9,
            min_pitches_per_at_bat: 4,
            max_pitches_per_at_bat: 6,
            seed: None,
        }
    }
}

/// Thresholds for the mound-visit evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Fatigue percentage at which a visit is due
    pub fatigue_threshold: f64,

    /// Consecutive hits allowed before a visit is due
    pub consecutive_hits: u32,

    /// First inning counted as "late" for lead protection checks
    pub late_inning: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            fatigue_threshold: 75.0,
            consecutive_hits: 3,
            late_inning: 7,
        }
    }
}

/// Narrative provider settings
///
/// Endpoint, model and key come from the environment; see `LlmClient::from_env`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Try the remote language model before falling back to templates
    pub use_llm: bool,

    /// HTTP timeout for a single completion
    pub timeout_secs: u64,

    /// Sampling temperature sent to the model
    ///
    /// Low values keep commentary grounded in the supplied facts.
    pub temperature: f32,

    /// Completion length cap
    pub max_tokens: u32,

    /// Seed for the template narrator's line choice
    pub template_seed: u64,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            use_llm: true,
            timeout_secs: 120,
            temperature: 0.3,
            max_tokens: 500,
            template_seed: 0,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let game = &self.game;
        if game.start_inning == 0 {
            return Err(DugoutError::InvalidConfig(
                "start_inning must be at least 1".into(),
            ));
        }

        if game.regulation_innings == 0 {
            return Err(DugoutError::InvalidConfig(
                "regulation_innings must be at least 1".into(),
            ));
        }

        if game.start_inning > game.regulation_innings {
            return Err(DugoutError::InvalidConfig(format!(
                "start_inning ({}) should be <= regulation_innings ({})",
                game.start_inning, game.regulation_innings
            )));
        }

        if game.min_pitches_per_at_bat == 0
            || game.min_pitches_per_at_bat > game.max_pitches_per_at_bat
        {
            return Err(DugoutError::InvalidConfig(format!(
                "pitches per at-bat range {}..={} is empty or zero",
                game.min_pitches_per_at_bat, game.max_pitches_per_at_bat
            )));
        }

        let triggers = &self.triggers;
        if !(0.0..=100.0).contains(&triggers.fatigue_threshold) {
            return Err(DugoutError::InvalidConfig(format!(
                "fatigue_threshold ({}) must be a percentage",
                triggers.fatigue_threshold
            )));
        }

        if triggers.consecutive_hits == 0 {
            return Err(DugoutError::InvalidConfig(
                "consecutive_hits must be positive".into(),
            ));
        }

        Ok(())
    }
}

/// Load and validate a config file
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path)?;
    let config = EngineConfig::from_toml_str(&content)?;
    tracing::debug!("Loaded engine config from {}", path.display());
    Ok(config)
}
