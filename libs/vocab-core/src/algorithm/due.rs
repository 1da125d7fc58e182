//! Due-ness evaluation.
//!
//! Every decision takes an injected `now` so scheduling stays deterministic
//! and replayable in tests. Interval arithmetic is whole days; sub-day
//! drift between host clocks and stored timestamps is accepted as-is and
//! not compensated.

use chrono::{DateTime, Duration, Utc};

use super::interval_days;
use crate::error::Result;
use crate::types::ProgressRecord;

/// Whether an item at `level` is due for review at `now`.
///
/// An item with no recorded practice is always due. Otherwise the item
/// becomes due at the exact instant its interval elapses — the comparison
/// is inclusive, not one tick later.
pub fn is_due(
    level: u8,
    last_practiced_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<bool> {
    let interval = interval_days(level)?;
    match last_practiced_at {
        None => Ok(true),
        Some(last) => Ok(now >= last + Duration::days(interval)),
    }
}

/// Projected instant of the next review for a practiced item.
///
/// Display-only. New items have no projection; they are due immediately,
/// which is why the timestamp parameter is not optional here.
pub fn next_review_at(level: u8, last_practiced_at: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Ok(last_practiced_at + Duration::days(interval_days(level)?))
}

/// Due-ness of a whole progress record, where `None` means "never
/// practiced". Shared by session selection and the aggregates.
pub fn record_is_due(record: Option<&ProgressRecord>, now: DateTime<Utc>) -> Result<bool> {
    match record {
        None => Ok(true),
        Some(rec) => is_due(rec.mastery_level, rec.last_practiced_at, now),
    }
}
