//! Spaced repetition scheduling policy.
//!
//! The fixed interval ladder plus the mastery and due-ness rules built on
//! top of it. Everything is a pure function of its arguments, including the
//! current instant, which callers inject.

pub mod due;
pub mod mastery;

use crate::error::{EngineError, Result};

/// Highest mastery level an item can reach.
pub const MAX_LEVEL: u8 = 5;

/// Review interval in days for each mastery level 0..=5.
const INTERVAL_DAYS: [i64; 6] = [1, 3, 7, 14, 30, 90];

/// Days until the next review for an item at `level`.
///
/// Levels outside `0..=5` fail with [`EngineError::InvalidLevel`]. The
/// table never clamps, so an out-of-range level stored upstream surfaces
/// here instead of being scheduled on a wrong interval.
pub fn interval_days(level: u8) -> Result<i64> {
    INTERVAL_DAYS
        .get(level as usize)
        .copied()
        .ok_or(EngineError::InvalidLevel { level })
}
