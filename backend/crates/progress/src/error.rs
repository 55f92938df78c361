//! Progress Error Types
//!
//! Service-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Every variant maps onto exactly one
//! `ErrorKind`, which decides the HTTP status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::classify_sqlx_error, kind::ErrorKind};
use thiserror::Error;

/// Progress-specific result type alias
pub type ProgressResult<T> = Result<T, ProgressError>;

/// Progress-specific error variants
#[derive(Debug, Error)]
pub enum ProgressError {
    /// Caller supplied malformed or out-of-range input
    #[error("{0}")]
    InvalidInput(String),

    /// User does not exist
    #[error("User not found")]
    UserNotFound,

    /// User exists but the requested record is missing
    #[error("{0} record not found")]
    RecordNotFound(&'static str),

    /// User name already exists
    #[error("User name already exists")]
    UserNameTaken,

    /// Unknown user or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, forged or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Stored level data cannot be decoded
    #[error("Stored level data is corrupt: {0}")]
    CorruptLevelData(String),

    /// Persistence is unreachable or overloaded
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProgressError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProgressError::InvalidInput(_) => ErrorKind::InvalidInput,
            ProgressError::UserNotFound | ProgressError::RecordNotFound(_) => ErrorKind::NotFound,
            ProgressError::UserNameTaken => ErrorKind::Conflict,
            ProgressError::InvalidCredentials | ProgressError::SessionInvalid => {
                ErrorKind::AuthFailure
            }
            ProgressError::CorruptLevelData(_) => ErrorKind::Integrity,
            ProgressError::Unavailable(_) => ErrorKind::Unavailable,
            ProgressError::Database(e) => classify_sqlx_error(e),
            ProgressError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError
    ///
    /// Server-side failures keep their details in the log only.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        let message = match self {
            ProgressError::Database(_) => match kind {
                ErrorKind::Unavailable => "Database unavailable".to_string(),
                ErrorKind::Conflict => "Duplicate key value".to_string(),
                _ => "Database error".to_string(),
            },
            ProgressError::Internal(_) => "Internal error".to_string(),
            ProgressError::CorruptLevelData(_) => "Stored level data is corrupt".to_string(),
            other => other.to_string(),
        };
        AppError::new(kind, message)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ProgressError::Database(e) => {
                let kind = self.kind();
                if kind.is_server_error() {
                    tracing::error!(error = %e, kind = %kind, "Progress database error");
                } else {
                    tracing::warn!(error = %e, kind = %kind, "Progress database error");
                }
            }
            ProgressError::Internal(msg) => {
                tracing::error!(message = %msg, "Progress internal error");
            }
            ProgressError::CorruptLevelData(msg) => {
                tracing::error!(message = %msg, "Corrupt level data");
            }
            ProgressError::Unavailable(msg) => {
                tracing::warn!(message = %msg, "Progress store unavailable");
            }
            ProgressError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Progress error");
            }
        }
    }
}

impl IntoResponse for ProgressError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ProgressError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => ProgressError::InvalidInput(err.message().to_string()),
            ErrorKind::Unavailable => ProgressError::Unavailable(err.message().to_string()),
            ErrorKind::Integrity => ProgressError::CorruptLevelData(err.message().to_string()),
            _ => ProgressError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(
            ProgressError::InvalidInput("bad".into()).kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(ProgressError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ProgressError::RecordNotFound("Score").kind(), ErrorKind::NotFound);
        assert_eq!(ProgressError::UserNameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(ProgressError::InvalidCredentials.kind(), ErrorKind::AuthFailure);
        assert_eq!(ProgressError::SessionInvalid.kind(), ErrorKind::AuthFailure);
        assert_eq!(
            ProgressError::CorruptLevelData("x".into()).kind(),
            ErrorKind::Integrity
        );
        assert_eq!(
            ProgressError::Database(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::Unavailable
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ProgressError::UserNameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ProgressError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ProgressError::Unavailable("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_internal_details_are_not_exposed() {
        let err = ProgressError::Internal("secret stack".into());
        assert!(!err.to_app_error().message().contains("secret"));
    }

    #[test]
    fn test_from_app_error_keeps_validation_message() {
        let err: ProgressError = AppError::invalid_input("Email is required").into();
        assert!(matches!(err, ProgressError::InvalidInput(ref m) if m == "Email is required"));
    }
}
