//! Session Token Service
//!
//! Stateless bearer tokens: `<user uuid>.<expires at ms>.<signature>`,
//! where the signature is base64url HMAC-SHA256 over the first two parts.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::{from_base64url, hmac_sha256, hmac_sha256_verify, to_base64url};

use crate::application::config::ProgressConfig;
use crate::domain::value_object::UserId;
use crate::error::{ProgressError, ProgressResult};

/// Freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at_ms: i64,
}

/// Issues and resolves bearer tokens
#[derive(Clone)]
pub struct SessionTokenService {
    config: Arc<ProgressConfig>,
}

impl SessionTokenService {
    pub fn new(config: Arc<ProgressConfig>) -> Self {
        Self { config }
    }

    pub fn issue(&self, user_id: &UserId) -> IssuedToken {
        self.issue_at(user_id, Utc::now().timestamp_millis())
    }

    pub fn issue_at(&self, user_id: &UserId, now_ms: i64) -> IssuedToken {
        let expires_at_ms = now_ms + self.config.token_ttl_ms();
        let payload = format!("{}.{}", user_id, expires_at_ms);
        let signature = hmac_sha256(&self.config.token_secret, payload.as_bytes());

        IssuedToken {
            token: format!("{}.{}", payload, to_base64url(&signature)),
            expires_at_ms,
        }
    }

    /// Verify a token and return its subject
    pub fn resolve(&self, token: &str) -> ProgressResult<UserId> {
        self.resolve_at(token, Utc::now().timestamp_millis())
    }

    pub fn resolve_at(&self, token: &str, now_ms: i64) -> ProgressResult<UserId> {
        let (payload, signature) = token.rsplit_once('.').ok_or(ProgressError::SessionInvalid)?;
        let signature = from_base64url(signature).map_err(|_| ProgressError::SessionInvalid)?;

        if !hmac_sha256_verify(&self.config.token_secret, payload.as_bytes(), &signature) {
            return Err(ProgressError::SessionInvalid);
        }

        let (user_id, expires_at_ms) = payload
            .split_once('.')
            .ok_or(ProgressError::SessionInvalid)?;
        let expires_at_ms: i64 = expires_at_ms
            .parse()
            .map_err(|_| ProgressError::SessionInvalid)?;

        if expires_at_ms <= now_ms {
            return Err(ProgressError::SessionInvalid);
        }

        user_id.parse().map_err(|_| ProgressError::SessionInvalid)
    }
}
