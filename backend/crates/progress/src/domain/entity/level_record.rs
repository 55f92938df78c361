//! Level Record Entity

use chrono::{DateTime, Utc};

use crate::domain::value_object::{LevelProgress, UserId};

/// Per-user level-completion flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRecord {
    pub user_id: UserId,
    pub levels: LevelProgress,
    pub updated_at: DateTime<Utc>,
}

impl LevelRecord {
    /// All-incomplete record created together with the account
    pub fn initial(user_id: UserId, level_count: usize) -> Self {
        Self {
            user_id,
            levels: LevelProgress::all_incomplete(level_count),
            updated_at: Utc::now(),
        }
    }

    /// Replacement record for an edit
    pub fn replaced(user_id: UserId, levels: LevelProgress) -> Self {
        Self {
            user_id,
            levels,
            updated_at: Utc::now(),
        }
    }
}
