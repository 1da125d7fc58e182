//! Mastery level assignment.
//!
//! Accuracy-threshold policy: the level is a pure function of the lifetime
//! correct/wrong counts and is re-derived after every answer. Early levels
//! are reachable with few attempts; the top levels require both high
//! accuracy and a minimum amount of evidence.

use chrono::{DateTime, Utc};

use crate::error::{EngineError, Result};
use crate::types::ProgressRecord;

/// Accuracy floor and minimum attempts per level, strictest first.
const LEVEL_THRESHOLDS: [(f64, i64, u8); 4] = [
    (0.90, 5, 5),
    (0.80, 4, 4),
    (0.70, 3, 3),
    (0.60, 2, 2),
];

/// Compute the mastery level for an answer history.
///
/// An untouched item is level 0 and a single attempt is enough for level 1,
/// whatever its outcome. Negative counts fail with
/// [`EngineError::InvalidCount`].
pub fn mastery_level(correct_count: i64, wrong_count: i64) -> Result<u8> {
    check_counts(correct_count, wrong_count)?;

    let total = correct_count + wrong_count;
    if total == 0 {
        return Ok(0);
    }

    let accuracy = correct_count as f64 / total as f64;
    for (floor, min_attempts, level) in LEVEL_THRESHOLDS {
        if accuracy >= floor && total >= min_attempts {
            return Ok(level);
        }
    }
    Ok(1)
}

/// Fold one answer outcome into a record.
///
/// Bumps the matching count, re-derives the level, and stamps
/// `last_practiced_at` with the caller's `now`. Returns a new record; the
/// input is untouched and persisting the result stays with the caller.
pub fn apply_answer(
    record: &ProgressRecord,
    correct: bool,
    now: DateTime<Utc>,
) -> Result<ProgressRecord> {
    let mut updated = record.clone();
    if correct {
        updated.correct_count = updated.correct_count.saturating_add(1);
    } else {
        updated.wrong_count = updated.wrong_count.saturating_add(1);
    }
    updated.mastery_level = mastery_level(updated.correct_count, updated.wrong_count)?;
    updated.last_practiced_at = Some(now);
    Ok(updated)
}

pub(crate) fn check_counts(correct: i64, wrong: i64) -> Result<()> {
    if correct < 0 || wrong < 0 {
        return Err(EngineError::InvalidCount { correct, wrong });
    }
    Ok(())
}
