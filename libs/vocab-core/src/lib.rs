//! Scheduling core for a vocabulary flashcard application.
//!
//! Provides:
//! - Mastery level assignment from answer history (accuracy thresholds)
//! - Due-ness evaluation over a fixed interval ladder
//! - Working-set selection for study sessions (smart / all / category)
//! - Aggregate statistics for the review dashboard
//!
//! The engine is a pure computation layer: the host owns storage and
//! rendering, hands catalog and progress collections in, and injects the
//! current instant into every scheduling decision, so results are
//! deterministic and replayable.

pub mod algorithm;
pub mod error;
pub mod session;
pub mod stats;
pub mod types;

pub use algorithm::due::{is_due, next_review_at, record_is_due};
pub use algorithm::mastery::{apply_answer, mastery_level};
pub use algorithm::{interval_days, MAX_LEVEL};
pub use error::{EngineError, Result};
pub use session::{build_session, working_set, Session};
pub use stats::{
    due_count, due_count_by_category, learning_stats, mastery_distribution, LearningStats,
    MasteryDistribution,
};
pub use types::{Direction, Item, ProgressRecord, ReviewMode, SessionConfig};
