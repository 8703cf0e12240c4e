//! Game state machine and per-game session

pub mod box_score;
pub mod processor;
pub mod session;
pub mod state;
pub mod triggers;

pub use box_score::{BatterLine, BoxScore, TeamLine};
pub use processor::{apply_outcome, PlayResult};
pub use session::{AtBatReport, Club, GameSession};
pub use state::{Base, Bases, GameSnapshot, GameState, FATIGUE_PITCH_LIMIT};
pub use triggers::{evaluate_triggers, MoundVisitReason, PitcherCounters};
