//! User Entity
//!
//! Player account with its credentials.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{Email, UserId, UserName, UserPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, case-sensitive, for login and ranking display)
    pub user_name: UserName,
    /// Contact address (not unique)
    pub email: Email,
    /// Argon2id hash of the password
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh id
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
