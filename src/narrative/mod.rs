//! Narrative text: play-by-play, mound-visit dialogue and coach advice
//!
//! Providers only turn already-decided facts into text. Rendering happens
//! after the engine has resolved the play, and a provider failure never
//! changes game state.

pub mod advisor;
pub mod client;
pub mod prompts;
pub mod remote;
pub mod template;

pub use advisor::{
    analyze_situation, assess_pitcher_condition, recommend_strategy, PitcherCondition,
    Recommendation,
};
pub use client::{ApiFormat, LlmClient};
pub use remote::RemoteNarrator;
pub use template::TemplateNarrator;

use crate::core::config::NarrativeConfig;
use crate::core::error::Result;
use crate::core::types::Side;
use crate::engine::outcome::AtBatOutcome;
use crate::engine::strategy::StrategySide;
use crate::game::session::{AtBatReport, GameSession};
use crate::game::state::GameSnapshot;
use crate::game::triggers::MoundVisitReason;
use crate::player::ratings::{Batter, Pitcher};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catcher stand-in; lineups carry no defensive positions
pub const CATCHER: &str = "Catcher";

/// Facts about one finished play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayFacts {
    pub outcome: AtBatOutcome,
    pub batter_name: String,
    pub pitcher_name: String,
    /// State after the play
    pub snapshot: GameSnapshot,
    pub runs_scored: u32,
}

impl PlayFacts {
    pub fn from_report(report: &AtBatReport) -> Self {
        Self {
            outcome: report.outcome,
            batter_name: report.batter_name.clone(),
            pitcher_name: report.pitcher_name.clone(),
            snapshot: report.snapshot.clone(),
            runs_scored: report.runs_scored,
        }
    }
}

/// Facts behind a mound visit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoundVisitFacts {
    pub pitcher_name: String,
    pub catcher_name: String,
    pub reasons: Vec<MoundVisitReason>,
    pub pitches: u32,
    pub fatigue: f64,
    pub runs_allowed: u32,
    pub snapshot: GameSnapshot,
}

impl MoundVisitFacts {
    /// Visit to the pitcher currently on the mound
    pub fn from_session(session: &GameSession, reasons: Vec<MoundVisitReason>) -> Self {
        let state = session.state();
        Self {
            pitcher_name: session.current_pitcher().name.clone(),
            catcher_name: CATCHER.to_string(),
            reasons,
            pitches: state.pitcher_pitches(),
            fatigue: state.pitcher_fatigue(),
            runs_allowed: session.current_counters().runs_allowed,
            snapshot: state.snapshot(),
        }
    }
}

/// Facts for a coach's pre-pitch advice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachAdviceFacts {
    pub side: StrategySide,
    pub batter: Batter,
    pub pitcher: Pitcher,
    pub snapshot: GameSnapshot,
}

impl CoachAdviceFacts {
    /// Advice for `manager`, the club the user runs. The pitching coach
    /// speaks while that club fields, the hitting coach while it bats.
    pub fn from_session(session: &GameSession, manager: Side) -> Self {
        let state = session.state();
        let side = if state.fielding_side() == manager {
            StrategySide::Pitching
        } else {
            StrategySide::Batting
        };
        Self {
            side,
            batter: session.current_batter().clone(),
            pitcher: session.current_pitcher().clone(),
            snapshot: state.snapshot(),
        }
    }
}

/// What to write
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrativeRequest {
    Commentary(PlayFacts),
    MoundVisit(MoundVisitFacts),
    CoachAdvice(CoachAdviceFacts),
}

/// Swappable text generator
///
/// Implementations must be deterministic given their own inputs or
/// isolated from the game RNG; none may feed back into game state.
pub trait NarrativeProvider: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Render `request` into display text
    fn render(&self, request: &NarrativeRequest) -> Result<String>;
}

/// Try `primary`, fall back to templates on any error
pub struct FallbackNarrator {
    primary: Box<dyn NarrativeProvider>,
    fallback: TemplateNarrator,
}

impl FallbackNarrator {
    pub fn new(primary: Box<dyn NarrativeProvider>, fallback: TemplateNarrator) -> Self {
        Self { primary, fallback }
    }
}

impl NarrativeProvider for FallbackNarrator {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn render(&self, request: &NarrativeRequest) -> Result<String> {
        match self.primary.render(request) {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    "{} narrator failed, using templates: {}",
                    self.primary.name(),
                    e
                );
                self.fallback.render(request)
            }
        }
    }
}

/// Pick a provider from config and environment.
///
/// With the LLM enabled and an endpoint configured, the remote narrator is
/// wrapped in a template fallback. Otherwise templates only.
pub fn select_provider(config: &NarrativeConfig) -> Box<dyn NarrativeProvider> {
    let templates = TemplateNarrator::new(config.template_seed);
    if !config.use_llm {
        return Box::new(templates);
    }

    let client = match LlmClient::from_env().and_then(|client| {
        client.with_options(
            Duration::from_secs(config.timeout_secs),
            config.temperature,
            config.max_tokens,
        )
    }) {
        Ok(client) => client,
        Err(e) => {
            tracing::info!("LLM narration unavailable ({}), using templates", e);
            return Box::new(templates);
        }
    };

    match RemoteNarrator::new(client) {
        Ok(remote) => {
            tracing::info!("Narration via {}", remote.name());
            Box::new(FallbackNarrator::new(Box::new(remote), templates))
        }
        Err(e) => {
            tracing::warn!("Could not start LLM runtime ({}), using templates", e);
            Box::new(templates)
        }
    }
}
