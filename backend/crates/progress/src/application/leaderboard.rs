//! Leaderboard Use Case

use std::sync::Arc;

use crate::domain::repository::ScoreRepository;
use crate::domain::value_object::{Score, UserName};
use crate::error::ProgressResult;

/// One leaderboard row with its 1-based position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub rank: u32,
    pub user_name: UserName,
    pub score: Score,
}

/// Top scores use case
pub struct TopScoresUseCase<S>
where
    S: ScoreRepository,
{
    score_repo: Arc<S>,
}

impl<S> TopScoresUseCase<S>
where
    S: ScoreRepository,
{
    pub fn new(score_repo: Arc<S>) -> Self {
        Self { score_repo }
    }

    /// Highest `limit` scores, best first. `limit = 0` yields nothing.
    pub async fn execute(&self, limit: u32) -> ProgressResult<Vec<RankedEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let entries = self.score_repo.top_scores(limit).await?;

        Ok(entries
            .into_iter()
            .zip(1u32..)
            .map(|(entry, rank)| RankedEntry {
                rank,
                user_name: entry.user_name,
                score: entry.score,
            })
            .collect())
    }
}
