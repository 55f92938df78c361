//! Application Configuration
//!
//! Configuration for the progress application layer.

use std::time::Duration;

/// Progress application configuration
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Number of levels a new account starts with (all incomplete)
    pub default_level_count: usize,
    /// Longest level sequence an edit may store
    pub max_level_count: usize,
    /// Leaderboard size when the caller does not ask for one
    pub leaderboard_default_limit: u32,
    /// Largest leaderboard size a caller may ask for
    pub leaderboard_max_limit: u32,
    /// Secret key for HMAC signing of bearer tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Bearer token lifetime (12 hours)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            default_level_count: 20,
            max_level_count: 1024,
            leaderboard_default_limit: 10,
            leaderboard_max_limit: 100,
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(12 * 3600), // 12 hours
            password_pepper: None,
        }
    }
}

impl ProgressConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (random secret, short-lived tokens)
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            ..Self::with_random_secret()
        }
    }

    /// Get token TTL in milliseconds
    pub fn token_ttl_ms(&self) -> i64 {
        self.token_ttl.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
