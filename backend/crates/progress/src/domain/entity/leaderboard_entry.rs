//! Leaderboard Entry
//!
//! Read-only projection of a score record for ranking.

use crate::domain::value_object::{Score, UserName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_name: UserName,
    pub score: Score,
}
