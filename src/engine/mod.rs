//! At-bat resolution engine
//!
//! Ratings and situation go in, one of eight outcomes comes out.

pub mod at_bat;
pub mod constants;
pub mod outcome;
pub mod rates;
pub mod strategy;

pub use at_bat::{
    classify_hit, classify_in_play_out, classify_plate_appearance, simulate, AtBatProbabilities,
    HitProfile, MatchupRates, PlateResolution,
};
pub use outcome::AtBatOutcome;
pub use rates::{base_rates, OutcomeRates, SituationalContext};
pub use strategy::{modifier_for, Strategy, StrategyModifier, StrategySide};
