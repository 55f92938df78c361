//! Get Profile Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserId, UserName};
use crate::error::{ProgressError, ProgressResult};

/// Public profile of an account
#[derive(Debug, Clone)]
pub struct ProfileOutput {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
}

pub struct GetProfileUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetProfileUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ProgressResult<ProfileOutput> {
        let user = self
            .user_repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(ProgressError::UserNotFound)?;

        Ok(ProfileOutput {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.email,
        })
    }
}
