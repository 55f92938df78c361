//! Progress Router

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::application::config::ProgressConfig;
use crate::application::session_token::SessionTokenService;
use crate::domain::repository::ProgressRepository;
use crate::infra::postgres::PgProgressRepository;
use crate::presentation::handlers::{self, ProgressAppState};
use crate::presentation::middleware::require_subject;

/// Create the progress router with PostgreSQL repository
pub fn progress_router(repo: PgProgressRepository, config: ProgressConfig) -> Router {
    progress_router_generic(repo, config)
}

/// Create a progress router for any repository implementation
///
/// Routes are relative; the binary nests them under `/api`.
pub fn progress_router_generic<R>(repo: R, config: ProgressConfig) -> Router
where
    R: ProgressRepository,
{
    let config = Arc::new(config);
    let state = ProgressAppState {
        repo: Arc::new(repo),
        tokens: SessionTokenService::new(config.clone()),
        config,
    };

    let protected = Router::new()
        .route("/me", delete(handlers::delete_me::<R>))
        .route("/me/profile", get(handlers::profile::<R>))
        .route(
            "/me/score",
            get(handlers::get_score::<R>).put(handlers::edit_score::<R>),
        )
        .route(
            "/me/levels",
            get(handlers::get_levels::<R>).put(handlers::edit_levels::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_subject,
        ));

    Router::new()
        .route("/auth/login", post(handlers::login::<R>))
        .route("/users", post(handlers::create_user::<R>))
        .route("/leaderboard", get(handlers::leaderboard::<R>))
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(state)
}
