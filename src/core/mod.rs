pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, EngineConfig, GameConfig, NarrativeConfig, TriggerConfig};
pub use error::{DugoutError, Result};
pub use types::{BatSide, Half, Hand, PerSide, PlayerId, Side};
