//! Delete User Use Case

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserId;
use crate::error::{ProgressError, ProgressResult};

/// Delete user use case
///
/// Removes the account, its score and its levels in one transaction.
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ProgressResult<()> {
        if !self.user_repo.delete_with_dependents(user_id).await? {
            return Err(ProgressError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "User deleted");

        Ok(())
    }
}
