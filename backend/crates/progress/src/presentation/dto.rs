//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::{EditScoreOutcome, EditScoreOutput, RankedEntry};
use crate::domain::value_object::UserId;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user_id: UserId,
    pub expires_at_ms: i64,
}

// ============================================================================
// Users
// ============================================================================

/// Create user request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Account response (create user, profile)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

// ============================================================================
// Score
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub score: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditScoreRequest {
    pub score: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditScoreResponse {
    pub outcome: EditScoreOutcome,
    pub mutated: bool,
    pub final_score: i64,
    /// Null when the record was just created
    pub previous_score: Option<i64>,
    pub attempted_score: i64,
    pub message: String,
}

impl From<EditScoreOutput> for EditScoreResponse {
    fn from(output: EditScoreOutput) -> Self {
        Self {
            outcome: output.outcome,
            mutated: output.mutated(),
            final_score: output.final_score.value(),
            previous_score: output.previous_score.map(|s| s.value()),
            attempted_score: output.attempted_score.value(),
            message: output.message(),
        }
    }
}

// ============================================================================
// Levels
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelsResponse {
    pub levels: Vec<bool>,
}

/// Edit levels request; a missing or null `levels` is rejected
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditLevelsRequest {
    #[serde(default)]
    pub levels: Option<Vec<bool>>,
}

// ============================================================================
// Leaderboard
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub rank: u32,
    pub user_name: String,
    pub score: i64,
}

impl From<RankedEntry> for LeaderboardEntryResponse {
    fn from(entry: RankedEntry) -> Self {
        Self {
            rank: entry.rank,
            user_name: entry.user_name.into_inner(),
            score: entry.score.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntryResponse>,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
