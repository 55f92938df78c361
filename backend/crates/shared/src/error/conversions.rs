//! Error conversions
//!
//! Database failure classification and the HTTP problem-details response
//! for [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database failure into the shared taxonomy.
///
/// Unreachable persistence (pool exhaustion, closed pool, I/O) is
/// `Unavailable`; unique violations are `Conflict`; everything else is
/// `Internal`. A missing row is `NotFound`, although repositories normally
/// use `fetch_optional` and never surface it.
#[cfg(feature = "sqlx")]
pub fn classify_sqlx_error(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::Unavailable
        }
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return ErrorKind::Conflict;
            }
            // https://www.postgresql.org/docs/current/errcodes-appendix.html
            match db_err.code().as_deref() {
                // Class 08: connection exception
                Some(code) if code.starts_with("08") => ErrorKind::Unavailable,
                // Class 53: insufficient resources
                Some("53000" | "53100" | "53200" | "53300") => ErrorKind::Unavailable,
                // Class 57: operator intervention, including statement timeout 57014
                Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => ErrorKind::Unavailable,
                _ => ErrorKind::Internal,
            }
        }
        _ => ErrorKind::Internal,
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "code": self.kind().code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
