//! Core types for the scheduling engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A learnable word pair.
///
/// Items are owned by the catalog collaborator and are read-only input
/// here; scheduling looks at `id` and `category` and passes the rest
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub source_text: String,
    pub target_text: String,
    pub category: String,
}

/// Per-user, per-item learning state.
///
/// The storage layer guarantees at most one record per (user, item) pair;
/// progress maps handed to the engine are keyed by item id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub item_id: i64,
    pub mastery_level: u8,
    pub correct_count: i64,
    pub wrong_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_practiced_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// Fresh record for an item that has never been practiced.
    pub fn new(item_id: i64) -> Self {
        Self {
            item_id,
            mastery_level: 0,
            correct_count: 0,
            wrong_count: 0,
            last_practiced_at: None,
        }
    }

    pub fn total_attempts(&self) -> i64 {
        self.correct_count + self.wrong_count
    }

    /// Fraction of correct answers, or `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total_attempts();
        if total > 0 {
            Some(self.correct_count as f64 / total as f64)
        } else {
            None
        }
    }
}

/// Policy selecting which subset of the catalog a session offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewMode {
    Smart,
    All,
    Category,
}

/// Which side of the pair is shown as the prompt.
///
/// Orthogonal to scheduling; carried through to the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    SourceToTarget,
    TargetToSource,
}

impl Default for Direction {
    fn default() -> Self {
        Self::SourceToTarget
    }
}

/// What a study session should contain. Created fresh per session request
/// and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub review_mode: ReviewMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
    pub direction: Direction,
}

impl SessionConfig {
    pub fn smart(direction: Direction) -> Self {
        Self {
            review_mode: ReviewMode::Smart,
            category_filter: None,
            direction,
        }
    }

    pub fn all(direction: Direction) -> Self {
        Self {
            review_mode: ReviewMode::All,
            category_filter: None,
            direction,
        }
    }

    pub fn category(direction: Direction, label: impl Into<String>) -> Self {
        Self {
            review_mode: ReviewMode::Category,
            category_filter: Some(label.into()),
            direction,
        }
    }
}
