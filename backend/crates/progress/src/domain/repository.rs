//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer. Method names are unique across the traits so a
//! single store type can implement all of them.

use crate::domain::entity::{
    leaderboard_entry::LeaderboardEntry, level_record::LevelRecord, score_record::ScoreRecord,
    user::User,
};
use crate::domain::value_object::{Score, UserId, UserName};
use crate::error::ProgressResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_user_by_id(&self, user_id: &UserId) -> ProgressResult<Option<User>>;

    /// Find user by exact (case-sensitive) user name
    async fn find_user_by_name(&self, user_name: &UserName) -> ProgressResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> ProgressResult<bool>;

    /// Insert the user, its score and its levels atomically
    ///
    /// A user name collision at insert time is `UserNameTaken`.
    async fn create_with_dependents(
        &self,
        user: &User,
        score: &ScoreRecord,
        levels: &LevelRecord,
    ) -> ProgressResult<()>;

    /// Delete the user and its dependents atomically
    ///
    /// Returns `false` when no such user exists (nothing is changed).
    async fn delete_with_dependents(&self, user_id: &UserId) -> ProgressResult<bool>;
}

/// Score repository trait
#[trait_variant::make(ScoreRepository: Send)]
pub trait LocalScoreRepository {
    /// Find the score record of a user
    async fn find_score(&self, user_id: &UserId) -> ProgressResult<Option<ScoreRecord>>;

    /// Compare-and-set the score of a user
    ///
    /// - `expected = None`: insert only if no record exists
    /// - `expected = Some(old)`: update only if the stored value equals `old`
    ///
    /// Returns `true` when the write happened. A user that no longer exists
    /// is `UserNotFound`.
    async fn compare_and_set_score(
        &self,
        user_id: &UserId,
        user_name: &UserName,
        expected: Option<Score>,
        new: Score,
    ) -> ProgressResult<bool>;

    /// Highest scores first, ties in record creation order
    async fn top_scores(&self, limit: u32) -> ProgressResult<Vec<LeaderboardEntry>>;
}

/// Level repository trait
#[trait_variant::make(LevelRepository: Send)]
pub trait LocalLevelRepository {
    /// Find the level record of a user
    ///
    /// Undecodable stored data is `CorruptLevelData`.
    async fn find_levels(&self, user_id: &UserId) -> ProgressResult<Option<LevelRecord>>;

    /// Insert or overwrite the level record of a user
    ///
    /// A user that no longer exists is `UserNotFound`.
    async fn upsert_levels(&self, record: &LevelRecord) -> ProgressResult<()>;
}

/// Everything the HTTP layer needs from one store
pub trait ProgressRepository:
    UserRepository + ScoreRepository + LevelRepository + Clone + Send + Sync + 'static
{
}

impl<T> ProgressRepository for T where
    T: UserRepository + ScoreRepository + LevelRepository + Clone + Send + Sync + 'static
{
}
