//! Read-only aggregates over a catalog and progress map.
//!
//! Everything here is pure and re-derivable from current state. Hosts that
//! want caching own it, together with its invalidation.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::algorithm::due::record_is_due;
use crate::algorithm::mastery::check_counts;
use crate::error::{EngineError, Result};
use crate::types::{Item, ProgressRecord};

/// Mastery level at which an item counts as mastered.
const MASTERED_LEVEL: u8 = 4;

/// Item counts per mastery level.
///
/// Bucket `i` holds the number of items at level `i`; items without a
/// progress record sit in bucket 0. Every catalog item lands in exactly one
/// bucket, so [`MasteryDistribution::total`] always equals the catalog
/// length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasteryDistribution {
    pub counts: [usize; 6],
}

impl MasteryDistribution {
    pub fn count(&self, level: u8) -> Result<usize> {
        self.counts
            .get(level as usize)
            .copied()
            .ok_or(EngineError::InvalidLevel { level })
    }

    /// Sum over all buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Composite dashboard statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningStats {
    pub total_items: usize,
    /// Items with a progress record.
    pub items_studied: usize,
    /// Items at level 4 or above.
    pub mastered_items: usize,
    /// Mean of per-item accuracy across items with at least one attempt,
    /// or `None` when nothing has been attempted yet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_accuracy: Option<f64>,
    pub total_correct: i64,
    pub total_wrong: i64,
}

/// Number of catalog items due at `now`. Items without a record always
/// count.
pub fn due_count(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
    now: DateTime<Utc>,
) -> Result<usize> {
    let mut due = 0;
    for item in catalog {
        if record_is_due(progress.get(&item.id), now)? {
            due += 1;
        }
    }
    Ok(due)
}

/// Level distribution across the catalog.
pub fn mastery_distribution(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
) -> Result<MasteryDistribution> {
    let mut counts = [0usize; 6];
    for item in catalog {
        let level = progress.get(&item.id).map_or(0, |rec| rec.mastery_level);
        let bucket = counts
            .get_mut(level as usize)
            .ok_or(EngineError::InvalidLevel { level })?;
        *bucket += 1;
    }
    Ok(MasteryDistribution { counts })
}

/// Due counts keyed by category.
///
/// Every category present in the catalog appears in the map; categories
/// with nothing due keep an explicit 0 so the dashboard can render one row
/// per category without re-deriving the category list.
pub fn due_count_by_category(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
    now: DateTime<Utc>,
) -> Result<BTreeMap<String, usize>> {
    let mut by_category = BTreeMap::new();
    for item in catalog {
        let due = by_category.entry(item.category.clone()).or_insert(0);
        if record_is_due(progress.get(&item.id), now)? {
            *due += 1;
        }
    }
    Ok(by_category)
}

/// Composite statistics for the dashboard.
pub fn learning_stats(
    catalog: &[Item],
    progress: &HashMap<i64, ProgressRecord>,
) -> Result<LearningStats> {
    let mut items_studied = 0;
    let mut mastered_items = 0;
    let mut total_correct = 0i64;
    let mut total_wrong = 0i64;
    let mut accuracy_sum = 0.0;
    let mut attempted_items = 0usize;

    for item in catalog {
        let Some(record) = progress.get(&item.id) else {
            continue;
        };
        check_counts(record.correct_count, record.wrong_count)?;

        items_studied += 1;
        if record.mastery_level >= MASTERED_LEVEL {
            mastered_items += 1;
        }
        total_correct += record.correct_count;
        total_wrong += record.wrong_count;
        if let Some(accuracy) = record.accuracy() {
            accuracy_sum += accuracy;
            attempted_items += 1;
        }
    }

    let average_accuracy = (attempted_items > 0).then(|| accuracy_sum / attempted_items as f64);

    tracing::debug!(
        total = catalog.len(),
        studied = items_studied,
        mastered = mastered_items,
        "computed learning stats"
    );

    Ok(LearningStats {
        total_items: catalog.len(),
        items_studied,
        mastered_items,
        average_accuracy,
        total_correct,
        total_wrong,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn item(id: i64, category: &str) -> Item {
        Item {
            id,
            source_text: format!("source {id}"),
            target_text: format!("target {id}"),
            category: category.to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap()
    }

    fn record(item_id: i64, level: u8, correct: i64, wrong: i64) -> ProgressRecord {
        ProgressRecord {
            item_id,
            mastery_level: level,
            correct_count: correct,
            wrong_count: wrong,
            last_practiced_at: Some(now() - Duration::days(1)),
        }
    }

    #[test]
    fn distribution_sums_to_catalog_length() {
        let catalog = vec![item(1, "Food"), item(2, "Food"), item(3, "Travel")];
        let progress: HashMap<i64, ProgressRecord> =
            [(1, record(1, 5, 9, 1)), (3, record(3, 2, 3, 2))].into();

        let distribution = mastery_distribution(&catalog, &progress).unwrap();
        assert_eq!(distribution.counts, [1, 0, 1, 0, 0, 1]);
        assert_eq!(distribution.total(), catalog.len());
        assert_eq!(distribution.count(5).unwrap(), 1);
    }

    #[test]
    fn distribution_rejects_out_of_range_level() {
        let catalog = vec![item(1, "Food")];
        let progress: HashMap<i64, ProgressRecord> = [(1, record(1, 6, 1, 0))].into();
        assert!(matches!(
            mastery_distribution(&catalog, &progress),
            Err(EngineError::InvalidLevel { level: 6 })
        ));
    }

    #[test]
    fn due_count_mixes_new_and_elapsed_items() {
        let catalog = vec![item(1, "Food"), item(2, "Food"), item(3, "Travel")];
        // Item 1 at level 1 practiced exactly 3 days ago: interval elapsed.
        // Item 2 at level 5 practiced a day ago: not due for months.
        // Item 3 has no record: always due.
        let three_days_ago = ProgressRecord {
            last_practiced_at: Some(now() - Duration::days(3)),
            ..record(1, 1, 0, 1)
        };
        let progress: HashMap<i64, ProgressRecord> =
            [(1, three_days_ago), (2, record(2, 5, 9, 1))].into();

        assert_eq!(due_count(&catalog, &progress, now()).unwrap(), 2);
    }

    #[test]
    fn aggregates_are_idempotent() {
        let catalog = vec![item(1, "Food"), item(2, "Travel")];
        let progress: HashMap<i64, ProgressRecord> = [(1, record(1, 3, 5, 2))].into();

        let first = mastery_distribution(&catalog, &progress).unwrap();
        let second = mastery_distribution(&catalog, &progress).unwrap();
        assert_eq!(first, second);

        assert_eq!(
            due_count(&catalog, &progress, now()).unwrap(),
            due_count(&catalog, &progress, now()).unwrap()
        );
    }

    #[test]
    fn by_category_keeps_zero_due_categories() {
        let catalog = vec![item(1, "Food"), item(2, "Food"), item(3, "Travel")];
        // Both Travel and one Food item are quiet; one Food item is new.
        let progress: HashMap<i64, ProgressRecord> =
            [(2, record(2, 5, 9, 1)), (3, record(3, 5, 9, 1))].into();

        let by_category = due_count_by_category(&catalog, &progress, now()).unwrap();
        assert_eq!(by_category.get("Food"), Some(&1));
        assert_eq!(by_category.get("Travel"), Some(&0));
        assert_eq!(by_category.len(), 2);
    }

    #[test]
    fn learning_stats_composite() {
        let catalog = vec![
            item(1, "Food"),
            item(2, "Food"),
            item(3, "Travel"),
            item(4, "Travel"),
        ];
        let progress: HashMap<i64, ProgressRecord> = [
            (1, record(1, 5, 9, 1)),  // accuracy 0.9, mastered
            (2, record(2, 4, 4, 1)),  // accuracy 0.8, mastered
            (3, record(3, 1, 1, 1)),  // accuracy 0.5
        ]
        .into();

        let stats = learning_stats(&catalog, &progress).unwrap();
        assert_eq!(stats.total_items, 4);
        assert_eq!(stats.items_studied, 3);
        assert_eq!(stats.mastered_items, 2);
        assert_eq!(stats.total_correct, 14);
        assert_eq!(stats.total_wrong, 3);
        let average = stats.average_accuracy.unwrap();
        assert!((average - (0.9 + 0.8 + 0.5) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn average_accuracy_is_none_without_attempts() {
        let catalog = vec![item(1, "Food")];
        let stats = learning_stats(&catalog, &HashMap::new()).unwrap();
        assert_eq!(stats.average_accuracy, None);
        assert_eq!(stats.items_studied, 0);

        // A record that exists but was never answered changes studied, not
        // accuracy.
        let progress: HashMap<i64, ProgressRecord> = [(1, ProgressRecord::new(1))].into();
        let stats = learning_stats(&catalog, &progress).unwrap();
        assert_eq!(stats.items_studied, 1);
        assert_eq!(stats.average_accuracy, None);
    }

    #[test]
    fn learning_stats_reject_negative_counts() {
        let catalog = vec![item(1, "Food")];
        let progress: HashMap<i64, ProgressRecord> = [(1, record(1, 1, -3, 0))].into();
        assert!(matches!(
            learning_stats(&catalog, &progress),
            Err(EngineError::InvalidCount { .. })
        ));
    }

    #[test]
    fn stats_serialize_for_the_host() {
        let catalog = vec![item(1, "Food")];
        let stats = learning_stats(&catalog, &HashMap::new()).unwrap();
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_items"], 1);
        // Undefined accuracy is omitted, not serialized as null.
        assert!(json.get("average_accuracy").is_none());
    }
}
