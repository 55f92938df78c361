//! Score Record Entity

use chrono::{DateTime, Utc};

use crate::domain::entity::user::User;
use crate::domain::value_object::{Score, UserId, UserName};

/// Per-user high-water-mark score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub user_id: UserId,
    /// Copy of the owner's name for ranking display
    pub user_name: UserName,
    pub score: Score,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Zero score created together with the account
    pub fn initial(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            score: Score::ZERO,
            created_at: user.created_at,
            updated_at: user.created_at,
        }
    }
}
