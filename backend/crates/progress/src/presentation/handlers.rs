//! HTTP Handlers

use axum::Json;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::ProgressConfig;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, CreateUserInput, CreateUserUseCase,
    DeleteUserUseCase, GetProfileUseCase, LevelsUseCase, ScoreUseCase, SessionTokenService,
    TopScoresUseCase,
};
use crate::domain::repository::ProgressRepository;
use crate::error::{ProgressError, ProgressResult};
use crate::presentation::dto::{
    CreateUserRequest, EditLevelsRequest, EditScoreRequest, EditScoreResponse, HealthResponse,
    LeaderboardQuery, LeaderboardResponse, LevelsResponse, LoginRequest, LoginResponse,
    ScoreResponse, UserResponse,
};
use crate::presentation::middleware::Subject;

/// Shared state for progress handlers
#[derive(Clone)]
pub struct ProgressAppState<R>
where
    R: ProgressRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<ProgressConfig>,
    pub tokens: SessionTokenService,
}

// ============================================================================
// Authentication
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<ProgressAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> ProgressResult<Json<LoginResponse>>
where
    R: ProgressRepository,
{
    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(AuthenticateInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    let issued = state.tokens.issue(&output.user_id);

    Ok(Json(LoginResponse {
        token: issued.token,
        user_id: output.user_id,
        expires_at_ms: issued.expires_at_ms,
    }))
}

// ============================================================================
// Account Lifecycle
// ============================================================================

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<ProgressAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> ProgressResult<impl IntoResponse>
where
    R: ProgressRepository,
{
    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(CreateUserInput {
            user_name: req.user_name,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user_id: output.user_id,
            user_name: output.user_name.into_inner(),
            email: output.email.into_inner(),
        }),
    ))
}

/// DELETE /api/me
pub async fn delete_me<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
) -> ProgressResult<StatusCode>
where
    R: ProgressRepository,
{
    DeleteUserUseCase::new(state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/me/profile
pub async fn profile<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
) -> ProgressResult<Json<UserResponse>>
where
    R: ProgressRepository,
{
    let output = GetProfileUseCase::new(state.repo.clone())
        .execute(&user_id)
        .await?;

    Ok(Json(UserResponse {
        user_id: output.user_id,
        user_name: output.user_name.into_inner(),
        email: output.email.into_inner(),
    }))
}

// ============================================================================
// Score
// ============================================================================

/// GET /api/me/score
pub async fn get_score<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
) -> ProgressResult<Json<ScoreResponse>>
where
    R: ProgressRepository,
{
    let score = ScoreUseCase::new(state.repo.clone(), state.repo.clone())
        .get(&user_id)
        .await?;

    Ok(Json(ScoreResponse {
        score: score.value(),
    }))
}

/// PUT /api/me/score
pub async fn edit_score<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
    Json(req): Json<EditScoreRequest>,
) -> ProgressResult<Json<EditScoreResponse>>
where
    R: ProgressRepository,
{
    let output = ScoreUseCase::new(state.repo.clone(), state.repo.clone())
        .edit(&user_id, req.score)
        .await?;

    Ok(Json(output.into()))
}

// ============================================================================
// Levels
// ============================================================================

/// GET /api/me/levels
pub async fn get_levels<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
) -> ProgressResult<Json<LevelsResponse>>
where
    R: ProgressRepository,
{
    let levels = LevelsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .get(&user_id)
        .await?;

    Ok(Json(LevelsResponse {
        levels: levels.into_inner(),
    }))
}

/// PUT /api/me/levels
pub async fn edit_levels<R>(
    State(state): State<ProgressAppState<R>>,
    Extension(Subject(user_id)): Extension<Subject>,
    Json(req): Json<EditLevelsRequest>,
) -> ProgressResult<StatusCode>
where
    R: ProgressRepository,
{
    LevelsUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone())
        .edit(&user_id, req.levels)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Leaderboard
// ============================================================================

/// GET /api/leaderboard?limit=N
pub async fn leaderboard<R>(
    State(state): State<ProgressAppState<R>>,
    Query(query): Query<LeaderboardQuery>,
) -> ProgressResult<Json<LeaderboardResponse>>
where
    R: ProgressRepository,
{
    let limit = query.limit.unwrap_or(state.config.leaderboard_default_limit);
    if limit > state.config.leaderboard_max_limit {
        return Err(ProgressError::InvalidInput(format!(
            "Limit must be at most {}",
            state.config.leaderboard_max_limit
        )));
    }

    let entries = TopScoresUseCase::new(state.repo.clone())
        .execute(limit)
        .await?;

    Ok(Json(LeaderboardResponse {
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

// ============================================================================
// Health
// ============================================================================

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
