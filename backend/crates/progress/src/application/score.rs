//! Score Use Cases
//!
//! Reads and raises the per-user high-water-mark score.
//!
//! Edits run a compare-and-set loop: read the record, decide, then write
//! conditioned on the value just read. A lost race re-reads and decides
//! again. Every lost race means another writer stored a strictly higher
//! value (or created the record), so the loop is bounded by the number of
//! concurrent writers.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::repository::{ScoreRepository, UserRepository};
use crate::domain::value_object::{Score, UserId};
use crate::error::{ProgressError, ProgressResult};

/// Attempts before an edit gives up under contention
const MAX_CAS_ATTEMPTS: usize = 64;

/// What an edit did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EditScoreOutcome {
    /// No record existed; created with the attempted value
    Created,
    /// Attempted value was higher and replaced the stored one
    Raised,
    /// Attempted value was not higher; nothing changed
    Unchanged,
}

impl EditScoreOutcome {
    pub fn is_mutated(&self) -> bool {
        !matches!(self, EditScoreOutcome::Unchanged)
    }
}

/// Result of an edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditScoreOutput {
    pub outcome: EditScoreOutcome,
    pub final_score: Score,
    /// Absent when the record was just created
    pub previous_score: Option<Score>,
    pub attempted_score: Score,
}

impl EditScoreOutput {
    pub fn mutated(&self) -> bool {
        self.outcome.is_mutated()
    }

    /// Human-readable status line
    pub fn message(&self) -> String {
        match self.outcome {
            EditScoreOutcome::Created => {
                format!("Score record created with {}", self.final_score)
            }
            EditScoreOutcome::Raised => match self.previous_score {
                Some(previous) => {
                    format!("Score raised from {} to {}", previous, self.final_score)
                }
                None => format!("Score raised to {}", self.final_score),
            },
            EditScoreOutcome::Unchanged => format!(
                "Score {} is not higher than current score {}; nothing changed",
                self.attempted_score, self.final_score
            ),
        }
    }
}

/// Score use cases
pub struct ScoreUseCase<U, S>
where
    U: UserRepository,
    S: ScoreRepository,
{
    user_repo: Arc<U>,
    score_repo: Arc<S>,
}

impl<U, S> ScoreUseCase<U, S>
where
    U: UserRepository,
    S: ScoreRepository,
{
    pub fn new(user_repo: Arc<U>, score_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            score_repo,
        }
    }

    /// Current score of a user
    pub async fn get(&self, user_id: &UserId) -> ProgressResult<Score> {
        if let Some(record) = self.score_repo.find_score(user_id).await? {
            return Ok(record.score);
        }

        if self.user_repo.find_user_by_id(user_id).await?.is_none() {
            return Err(ProgressError::UserNotFound);
        }
        Err(ProgressError::RecordNotFound("Score"))
    }

    /// Raise the score if `attempted` is strictly higher than the stored one
    pub async fn edit(&self, user_id: &UserId, attempted: i64) -> ProgressResult<EditScoreOutput> {
        let attempted =
            Score::new(attempted).map_err(|e| ProgressError::InvalidInput(e.to_string()))?;

        let user = self
            .user_repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(ProgressError::UserNotFound)?;

        for _ in 0..MAX_CAS_ATTEMPTS {
            let current = self.score_repo.find_score(user_id).await?;

            let output = match current {
                None => {
                    let written = self
                        .score_repo
                        .compare_and_set_score(user_id, &user.user_name, None, attempted)
                        .await?;
                    if !written {
                        continue;
                    }
                    EditScoreOutput {
                        outcome: EditScoreOutcome::Created,
                        final_score: attempted,
                        previous_score: None,
                        attempted_score: attempted,
                    }
                }
                Some(record) if attempted.exceeds(record.score) => {
                    let written = self
                        .score_repo
                        .compare_and_set_score(
                            user_id,
                            &user.user_name,
                            Some(record.score),
                            attempted,
                        )
                        .await?;
                    if !written {
                        continue;
                    }
                    EditScoreOutput {
                        outcome: EditScoreOutcome::Raised,
                        final_score: attempted,
                        previous_score: Some(record.score),
                        attempted_score: attempted,
                    }
                }
                Some(record) => EditScoreOutput {
                    outcome: EditScoreOutcome::Unchanged,
                    final_score: record.score,
                    previous_score: Some(record.score),
                    attempted_score: attempted,
                },
            };

            if output.mutated() {
                tracing::info!(
                    user_id = %user_id,
                    previous = ?output.previous_score.map(|s| s.value()),
                    score = %output.final_score,
                    "Score raised"
                );
            } else {
                tracing::debug!(
                    user_id = %user_id,
                    attempted = %attempted,
                    current = %output.final_score,
                    "Score not raised"
                );
            }

            return Ok(output);
        }

        Err(ProgressError::Unavailable(
            "Score update did not settle under contention".to_string(),
        ))
    }
}
