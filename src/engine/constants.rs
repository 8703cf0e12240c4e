//! At-bat model constants - all tuned values in one place
//!
//! Rates are percentages of plate appearances. Rating terms are scaled by
//! `rating_factor`, so a weight of 4.0 moves a rate by 2.4 points at 80.

// Walk rate
pub const WALK_BASE: f64 = 8.5;
pub const WALK_EYE_WEIGHT: f64 = 4.0;
pub const WALK_CONTROL_WEIGHT: f64 = 3.0;
pub const WALK_RISP_BONUS: f64 = 1.5;
pub const WALK_TIRED_BONUS: f64 = 1.5;
pub const WALK_EXHAUSTED_BONUS: f64 = 2.5;
pub const WALK_MIN: f64 = 3.0;
pub const WALK_MAX: f64 = 18.0;

// Strikeout rate
pub const STRIKEOUT_BASE: f64 = 23.0;
pub const STRIKEOUT_CONTACT_WEIGHT: f64 = 8.0;
pub const STRIKEOUT_STUFF_WEIGHT: f64 = 7.0;
pub const STRIKEOUT_TIRED_PENALTY: f64 = 3.0;
pub const STRIKEOUT_EXHAUSTED_PENALTY: f64 = 5.0;
pub const STRIKEOUT_PLATOON_BONUS: f64 = 2.0;
pub const STRIKEOUT_MIN: f64 = 10.0;
pub const STRIKEOUT_MAX: f64 = 40.0;

// Hit rate
pub const HIT_BASE: f64 = 25.0;
pub const HIT_CONTACT_WEIGHT: f64 = 10.0;
pub const HIT_STUFF_WEIGHT: f64 = 8.0;
pub const HIT_TIRED_BONUS: f64 = 3.0;
pub const HIT_EXHAUSTED_BONUS: f64 = 5.0;
pub const HIT_PLATOON_PENALTY: f64 = 2.0;
pub const HIT_MIN: f64 = 15.0;
pub const HIT_MAX: f64 = 40.0;

// Fatigue bands (percent, strictly greater than)
pub const TIRED_FATIGUE: f64 = 70.0;
pub const EXHAUSTED_FATIGUE: f64 = 85.0;

// Hit type, share of hits
pub const HOME_RUN_BASE: f64 = 14.0;
pub const HOME_RUN_POWER_WEIGHT: f64 = 8.0;
pub const HOME_RUN_MOVEMENT_WEIGHT: f64 = 4.0;
pub const HOME_RUN_MIN: f64 = 2.0;
pub const HOME_RUN_MAX: f64 = 30.0;

pub const EXTRA_BASE_BASE: f64 = 27.0;
pub const EXTRA_BASE_POWER_WEIGHT: f64 = 12.0;
pub const EXTRA_BASE_MOVEMENT_WEIGHT: f64 = 6.0;
pub const EXTRA_BASE_MIN: f64 = 15.0;
pub const EXTRA_BASE_MAX: f64 = 45.0;

/// Share of non-homer extra-base hits that are doubles
pub const DOUBLE_SHARE: f64 = 0.92;

/// Share of balls in play for outs that are grounders
pub const GROUNDOUT_SHARE: f64 = 0.55;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_ordered() {
        assert!(WALK_MIN < WALK_BASE && WALK_BASE < WALK_MAX);
        assert!(STRIKEOUT_MIN < STRIKEOUT_BASE && STRIKEOUT_BASE < STRIKEOUT_MAX);
        assert!(HIT_MIN < HIT_BASE && HIT_BASE < HIT_MAX);
        assert!(TIRED_FATIGUE < EXHAUSTED_FATIGUE);
    }

    #[test]
    fn test_shares_are_probabilities() {
        assert!(DOUBLE_SHARE > 0.0 && DOUBLE_SHARE < 1.0);
        assert!(GROUNDOUT_SHARE > 0.0 && GROUNDOUT_SHARE < 1.0);
    }
}
