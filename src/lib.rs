//! Dugout - late-inning baseball manager simulation
//!
//! Ratings-driven plate-appearance engine, a game state machine with
//! mound-visit triggers, and swappable narration on top.

pub mod core;
pub mod engine;
pub mod game;
pub mod narrative;
pub mod player;
