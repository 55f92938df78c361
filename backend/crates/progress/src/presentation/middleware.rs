//! Bearer Token Middleware
//!
//! Resolves the bearer token on protected routes and hands the verified
//! user id to handlers as a request extension.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::session_token::SessionTokenService;
use crate::domain::value_object::UserId;
use crate::error::ProgressError;

/// Verified caller of a protected route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject(pub UserId);

/// Reject requests without a valid bearer token
pub async fn require_subject(
    State(tokens): State<SessionTokenService>,
    mut req: Request,
    next: Next,
) -> Result<Response, ProgressError> {
    let token = extract_bearer_token(req.headers()).ok_or(ProgressError::SessionInvalid)?;
    let user_id = tokens.resolve(&token)?;

    req.extensions_mut().insert(Subject(user_id));

    Ok(next.run(req).await)
}
