//! In-Memory Repository Implementation
//!
//! Process-local store with the same contract as the PostgreSQL one.
//! A single async mutex guards all tables, so the three-table writes are
//! atomic and compare-and-set is trivially linearizable. Levels are kept in
//! their encoded text form so decoding is exercised exactly as with the
//! database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::entity::{
    leaderboard_entry::LeaderboardEntry, level_record::LevelRecord, score_record::ScoreRecord,
    user::User,
};
use crate::domain::repository::{LevelRepository, ScoreRepository, UserRepository};
use crate::domain::value_object::{LevelProgress, Score, UserId, UserName};
use crate::error::{ProgressError, ProgressResult};

/// In-memory progress repository (cheap to clone, shared state)
#[derive(Clone, Default)]
pub struct MemoryProgressRepository {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, User>,
    scores: HashMap<UserId, StoredScore>,
    levels: HashMap<UserId, StoredLevels>,
    /// Insertion counter standing in for `created_at` ordering
    next_sequence: u64,
}

struct StoredScore {
    record: ScoreRecord,
    sequence: u64,
}

struct StoredLevels {
    encoded: String,
    updated_at: DateTime<Utc>,
}

impl MemoryState {
    fn next_sequence(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }
}

impl MemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored level text verbatim
    ///
    /// Lets callers seed data that did not pass through [`LevelProgress::encode`].
    pub async fn put_raw_levels(&self, user_id: &UserId, encoded: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.levels.insert(
            *user_id,
            StoredLevels {
                encoded: encoded.into(),
                updated_at: Utc::now(),
            },
        );
    }

    /// Remove a score record without touching the user
    pub async fn remove_score(&self, user_id: &UserId) -> bool {
        self.state.lock().await.scores.remove(user_id).is_some()
    }

    /// Number of stored (users, scores, levels)
    pub async fn row_counts(&self) -> (usize, usize, usize) {
        let state = self.state.lock().await;
        (state.users.len(), state.scores.len(), state.levels.len())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryProgressRepository {
    async fn find_user_by_id(&self, user_id: &UserId) -> ProgressResult<Option<User>> {
        Ok(self.state.lock().await.users.get(user_id).cloned())
    }

    async fn find_user_by_name(&self, user_name: &UserName) -> ProgressResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|user| &user.user_name == user_name)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> ProgressResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|user| &user.user_name == user_name))
    }

    async fn create_with_dependents(
        &self,
        user: &User,
        score: &ScoreRecord,
        levels: &LevelRecord,
    ) -> ProgressResult<()> {
        let mut state = self.state.lock().await;

        if state.users.values().any(|u| u.user_name == user.user_name) {
            return Err(ProgressError::UserNameTaken);
        }
        if state.users.contains_key(&user.user_id) {
            return Err(ProgressError::Internal(format!(
                "Duplicate user id {}",
                user.user_id
            )));
        }

        let sequence = state.next_sequence();
        state.users.insert(user.user_id, user.clone());
        state.scores.insert(
            user.user_id,
            StoredScore {
                record: score.clone(),
                sequence,
            },
        );
        state.levels.insert(
            user.user_id,
            StoredLevels {
                encoded: levels.levels.encode(),
                updated_at: levels.updated_at,
            },
        );

        Ok(())
    }

    async fn delete_with_dependents(&self, user_id: &UserId) -> ProgressResult<bool> {
        let mut state = self.state.lock().await;

        if state.users.remove(user_id).is_none() {
            return Ok(false);
        }
        state.scores.remove(user_id);
        state.levels.remove(user_id);

        Ok(true)
    }
}

// ============================================================================
// Score Repository Implementation
// ============================================================================

impl ScoreRepository for MemoryProgressRepository {
    async fn find_score(&self, user_id: &UserId) -> ProgressResult<Option<ScoreRecord>> {
        let state = self.state.lock().await;
        Ok(state.scores.get(user_id).map(|stored| stored.record.clone()))
    }

    async fn compare_and_set_score(
        &self,
        user_id: &UserId,
        user_name: &UserName,
        expected: Option<Score>,
        new: Score,
    ) -> ProgressResult<bool> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(user_id) {
            return Err(ProgressError::UserNotFound);
        }

        let now = Utc::now();
        match expected {
            None => {
                if state.scores.contains_key(user_id) {
                    return Ok(false);
                }
                let sequence = state.next_sequence();
                state.scores.insert(
                    *user_id,
                    StoredScore {
                        record: ScoreRecord {
                            user_id: *user_id,
                            user_name: user_name.clone(),
                            score: new,
                            created_at: now,
                            updated_at: now,
                        },
                        sequence,
                    },
                );
                Ok(true)
            }
            Some(old) => match state.scores.get_mut(user_id) {
                Some(stored) if stored.record.score == old => {
                    stored.record.score = new;
                    stored.record.updated_at = now;
                    Ok(true)
                }
                _ => Ok(false),
            },
        }
    }

    async fn top_scores(&self, limit: u32) -> ProgressResult<Vec<LeaderboardEntry>> {
        let state = self.state.lock().await;

        let mut ranked: Vec<&StoredScore> = state.scores.values().collect();
        ranked.sort_by(|a, b| {
            b.record
                .score
                .cmp(&a.record.score)
                .then(a.sequence.cmp(&b.sequence))
        });

        Ok(ranked
            .into_iter()
            .take(limit as usize)
            .map(|stored| LeaderboardEntry {
                user_name: stored.record.user_name.clone(),
                score: stored.record.score,
            })
            .collect())
    }
}

// ============================================================================
// Level Repository Implementation
// ============================================================================

impl LevelRepository for MemoryProgressRepository {
    async fn find_levels(&self, user_id: &UserId) -> ProgressResult<Option<LevelRecord>> {
        let state = self.state.lock().await;

        let Some(stored) = state.levels.get(user_id) else {
            return Ok(None);
        };

        let levels = LevelProgress::decode(&stored.encoded)
            .map_err(|e| ProgressError::CorruptLevelData(format!("user {}: {}", user_id, e)))?;

        Ok(Some(LevelRecord {
            user_id: *user_id,
            levels,
            updated_at: stored.updated_at,
        }))
    }

    async fn upsert_levels(&self, record: &LevelRecord) -> ProgressResult<()> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&record.user_id) {
            return Err(ProgressError::UserNotFound);
        }

        state.levels.insert(
            record.user_id,
            StoredLevels {
                encoded: record.levels.encode(),
                updated_at: record.updated_at,
            },
        );

        Ok(())
    }
}
