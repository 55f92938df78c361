//! Authenticate Use Case
//!
//! Verifies a user name and password. Read-only.

use std::sync::Arc;

use crate::application::config::ProgressConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{RawPassword, UserId, UserName};
use crate::error::{ProgressError, ProgressResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub user_name: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug, Clone)]
pub struct AuthenticateOutput {
    pub user_id: UserId,
    pub user_name: UserName,
}

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<ProgressConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<ProgressConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Every failure, including malformed input, is `InvalidCredentials`
    pub async fn execute(&self, input: AuthenticateInput) -> ProgressResult<AuthenticateOutput> {
        let raw_password =
            RawPassword::new(input.password).map_err(|_| ProgressError::InvalidCredentials)?;

        let user = match UserName::new(input.user_name) {
            Ok(user_name) => self.user_repo.find_user_by_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            raw_password.verify_dummy(self.config.pepper());
            return Err(ProgressError::InvalidCredentials);
        };

        if !user.password_hash.verify(&raw_password, self.config.pepper()) {
            return Err(ProgressError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.user_id, "User authenticated");

        Ok(AuthenticateOutput {
            user_id: user.user_id,
            user_name: user.user_name,
        })
    }
}
