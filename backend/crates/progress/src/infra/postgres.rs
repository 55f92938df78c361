//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    leaderboard_entry::LeaderboardEntry, level_record::LevelRecord, score_record::ScoreRecord,
    user::User,
};
use crate::domain::repository::{LevelRepository, ScoreRepository, UserRepository};
use crate::domain::value_object::{
    Email, LevelProgress, Score, UserId, UserName, UserPassword,
};
use crate::error::{ProgressError, ProgressResult};

/// PostgreSQL-backed progress repository
#[derive(Clone)]
pub struct PgProgressRepository {
    pool: PgPool,
}

impl PgProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Unique violation on `users.user_name` means the name was taken by a
/// concurrent registration after the pre-check.
fn map_user_insert_error(err: sqlx::Error) -> ProgressError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_unique_violation()
    {
        return ProgressError::UserNameTaken;
    }
    ProgressError::Database(err)
}

/// Foreign key violation on a `scores`/`levels` write means the owning user
/// was deleted after the caller looked it up.
fn map_dependent_write_error(err: sqlx::Error) -> ProgressError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.is_foreign_key_violation()
    {
        return ProgressError::UserNotFound;
    }
    ProgressError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgProgressRepository {
    async fn find_user_by_id(&self, user_id: &UserId) -> ProgressResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_user_by_name(&self, user_name: &UserName) -> ProgressResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                password_hash,
                created_at
            FROM users
            WHERE user_name = $1
            "#,
        )
        .bind(user_name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> ProgressResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)")
                .bind(user_name.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_with_dependents(
        &self,
        user: &User,
        score: &ScoreRecord,
        levels: &LevelRecord,
    ) -> ProgressResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                email,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .execute(&mut *tx)
        .await
        .map_err(map_user_insert_error)?;

        sqlx::query(
            r#"
            INSERT INTO scores (
                user_id,
                user_name,
                score_value,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(score.user_id.as_uuid())
        .bind(score.user_name.as_str())
        .bind(score.score.value())
        .bind(score.created_at)
        .bind(score.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO levels (
                user_id,
                completed_levels,
                updated_at
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(levels.user_id.as_uuid())
        .bind(levels.levels.encode())
        .bind(levels.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn delete_with_dependents(&self, user_id: &UserId) -> ProgressResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM levels WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM scores WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;

        Ok(true)
    }
}

// ============================================================================
// Score Repository Implementation
// ============================================================================

impl ScoreRepository for PgProgressRepository {
    async fn find_score(&self, user_id: &UserId) -> ProgressResult<Option<ScoreRecord>> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            SELECT
                user_id,
                user_name,
                score_value,
                created_at,
                updated_at
            FROM scores
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn compare_and_set_score(
        &self,
        user_id: &UserId,
        user_name: &UserName,
        expected: Option<Score>,
        new: Score,
    ) -> ProgressResult<bool> {
        let now = Utc::now();

        let affected = match expected {
            None => sqlx::query(
                r#"
                INSERT INTO scores (
                    user_id,
                    user_name,
                    score_value,
                    created_at,
                    updated_at
                ) VALUES ($1, $2, $3, $4, $4)
                ON CONFLICT (user_id) DO NOTHING
                "#,
            )
            .bind(user_id.as_uuid())
            .bind(user_name.as_str())
            .bind(new.value())
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_dependent_write_error)?
            .rows_affected(),

            Some(old) => sqlx::query(
                r#"
                UPDATE scores
                SET score_value = $2, updated_at = $3
                WHERE user_id = $1 AND score_value = $4
                "#,
            )
            .bind(user_id.as_uuid())
            .bind(new.value())
            .bind(now)
            .bind(old.value())
            .execute(&self.pool)
            .await?
            .rows_affected(),
        };

        Ok(affected == 1)
    }

    async fn top_scores(&self, limit: u32) -> ProgressResult<Vec<LeaderboardEntry>> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT user_name, score_value
            FROM scores
            ORDER BY score_value DESC, created_at ASC, user_id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_entry()).collect()
    }
}

// ============================================================================
// Level Repository Implementation
// ============================================================================

impl LevelRepository for PgProgressRepository {
    async fn find_levels(&self, user_id: &UserId) -> ProgressResult<Option<LevelRecord>> {
        let row = sqlx::query_as::<_, LevelRow>(
            r#"
            SELECT
                user_id,
                completed_levels,
                updated_at
            FROM levels
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn upsert_levels(&self, record: &LevelRecord) -> ProgressResult<()> {
        sqlx::query(
            r#"
            INSERT INTO levels (
                user_id,
                completed_levels,
                updated_at
            ) VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                completed_levels = EXCLUDED.completed_levels,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(record.user_id.as_uuid())
        .bind(record.levels.encode())
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_dependent_write_error)?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> ProgressResult<User> {
        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ScoreRow {
    user_id: Uuid,
    user_name: String,
    score_value: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ScoreRow {
    fn into_record(self) -> ProgressResult<ScoreRecord> {
        let score = Score::new(self.score_value)
            .map_err(|e| ProgressError::Internal(format!("Invalid stored score: {}", e)))?;

        Ok(ScoreRecord {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(self.user_name),
            score,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    user_name: String,
    score_value: i64,
}

impl LeaderboardRow {
    fn into_entry(self) -> ProgressResult<LeaderboardEntry> {
        let score = Score::new(self.score_value)
            .map_err(|e| ProgressError::Internal(format!("Invalid stored score: {}", e)))?;

        Ok(LeaderboardEntry {
            user_name: UserName::from_db(self.user_name),
            score,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LevelRow {
    user_id: Uuid,
    completed_levels: String,
    updated_at: DateTime<Utc>,
}

impl LevelRow {
    fn into_record(self) -> ProgressResult<LevelRecord> {
        let levels = LevelProgress::decode(&self.completed_levels).map_err(|e| {
            ProgressError::CorruptLevelData(format!("user {}: {}", self.user_id, e))
        })?;

        Ok(LevelRecord {
            user_id: UserId::from_uuid(self.user_id),
            levels,
            updated_at: self.updated_at,
        })
    }
}
