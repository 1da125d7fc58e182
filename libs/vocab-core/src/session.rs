//! Session assembly: working-set selection and the session facade.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::due::record_is_due;
use crate::error::{EngineError, Result};
use crate::stats::due_count;
use crate::types::{Direction, Item, ProgressRecord, ReviewMode, SessionConfig};

/// Study time assumed per item when estimating session length.
const SECONDS_PER_ITEM: u64 = 12;

/// A scheduled study session, ready for the host to render.
///
/// `items` holds catalog-ordered ids; shuffling for presentation is the
/// host's concern. `is_empty` marks the caught-up state, which the host
/// renders as a celebration rather than an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub items: Vec<i64>,
    pub is_empty: bool,
    pub review_mode: ReviewMode,
    pub direction: Direction,
    pub due_count: usize,
    pub estimated_minutes: u64,
}

/// Select the ordered working set for a session.
///
/// Order follows the catalog and is stable for identical inputs:
/// - `Smart` keeps the due items across the whole catalog.
/// - `All` keeps everything, ignoring due-ness.
/// - `Category` narrows to an exact category match, then keeps the due
///   items of that subset. An unknown category yields an empty set.
pub fn working_set(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
    config: &SessionConfig,
    now: DateTime<Utc>,
) -> Result<Vec<i64>> {
    match config.review_mode {
        ReviewMode::All => Ok(catalog.iter().map(|item| item.id).collect()),
        ReviewMode::Smart => due_ids(catalog.iter(), progress, now),
        ReviewMode::Category => {
            let wanted = match config.category_filter.as_deref().map(str::trim) {
                Some(label) if !label.is_empty() => label,
                _ => return Err(EngineError::MissingCategory),
            };
            let in_category = catalog.iter().filter(|item| item.category == wanted);
            due_ids(in_category, progress, now)
        }
    }
}

fn due_ids<'a>(
    items: impl Iterator<Item = &'a Item>,
    progress: &HashMap<i64, ProgressRecord>,
    now: DateTime<Utc>,
) -> Result<Vec<i64>> {
    let mut due = Vec::new();
    for item in items {
        if record_is_due(progress.get(&item.id), now)? {
            due.push(item.id);
        }
    }
    Ok(due)
}

/// Build a study session for one request.
///
/// Composes working-set selection with the dashboard due count (Smart-mode
/// count over the whole catalog, whatever mode was selected) and a length
/// estimate at 12 seconds per item. The running session itself — current
/// index, answers given — is host-managed state; this call is synchronous
/// and stateless.
pub fn build_session(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
    config: &SessionConfig,
    now: DateTime<Utc>,
) -> Result<Session> {
    let items = working_set(catalog, progress, config, now)?;
    let due_count = due_count(catalog, progress, now)?;
    let estimated_minutes = (items.len() as u64 * SECONDS_PER_ITEM).div_ceil(60);

    tracing::debug!(
        mode = ?config.review_mode,
        selected = items.len(),
        due = due_count,
        "built study session"
    );

    Ok(Session {
        is_empty: items.is_empty(),
        review_mode: config.review_mode,
        direction: config.direction,
        due_count,
        estimated_minutes,
        items,
    })
}
