//! Level Use Cases
//!
//! Reads and overwrites the per-user level-completion flags.

use std::sync::Arc;

use crate::application::config::ProgressConfig;
use crate::domain::entity::level_record::LevelRecord;
use crate::domain::repository::{LevelRepository, UserRepository};
use crate::domain::value_object::{LevelProgress, UserId};
use crate::error::{ProgressError, ProgressResult};

pub struct LevelsUseCase<U, L>
where
    U: UserRepository,
    L: LevelRepository,
{
    user_repo: Arc<U>,
    level_repo: Arc<L>,
    config: Arc<ProgressConfig>,
}

impl<U, L> LevelsUseCase<U, L>
where
    U: UserRepository,
    L: LevelRepository,
{
    pub fn new(user_repo: Arc<U>, level_repo: Arc<L>, config: Arc<ProgressConfig>) -> Self {
        Self {
            user_repo,
            level_repo,
            config,
        }
    }

    /// Completion flags of a user, in level order
    pub async fn get(&self, user_id: &UserId) -> ProgressResult<LevelProgress> {
        if let Some(record) = self.level_repo.find_levels(user_id).await? {
            return Ok(record.levels);
        }

        if self.user_repo.find_user_by_id(user_id).await?.is_none() {
            return Err(ProgressError::UserNotFound);
        }
        Err(ProgressError::RecordNotFound("Levels"))
    }

    /// Replace the completion flags unconditionally
    ///
    /// `None` stands for a missing or null sequence in the request.
    pub async fn edit(&self, user_id: &UserId, levels: Option<Vec<bool>>) -> ProgressResult<()> {
        let levels = levels
            .ok_or_else(|| ProgressError::InvalidInput("Levels are required".to_string()))?;

        if levels.len() > self.config.max_level_count {
            return Err(ProgressError::InvalidInput(format!(
                "At most {} levels can be stored (got {})",
                self.config.max_level_count,
                levels.len()
            )));
        }

        if self.user_repo.find_user_by_id(user_id).await?.is_none() {
            return Err(ProgressError::UserNotFound);
        }

        let record = LevelRecord::replaced(*user_id, LevelProgress::new(levels));
        self.level_repo.upsert_levels(&record).await?;

        tracing::info!(
            user_id = %user_id,
            levels = record.levels.len(),
            completed = record.levels.completed_count(),
            "Levels replaced"
        );

        Ok(())
    }
}
