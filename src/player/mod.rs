pub mod ratings;
pub mod roster;

pub use ratings::{rating_factor, Batter, BatterRatings, Pitcher, PitcherRatings};
pub use roster::{load_team, Lineup, Team, LINEUP_SIZE};
