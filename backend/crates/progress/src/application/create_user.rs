//! Create User Use Case
//!
//! Registers a player together with a zero score and all-incomplete levels.

use std::sync::Arc;

use crate::application::config::ProgressConfig;
use crate::domain::entity::{level_record::LevelRecord, score_record::ScoreRecord, user::User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, RawPassword, UserId, UserName, UserPassword};
use crate::error::{ProgressError, ProgressResult};

/// Create user input
pub struct CreateUserInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Create user output
#[derive(Debug, Clone)]
pub struct CreateUserOutput {
    pub user_id: UserId,
    pub user_name: UserName,
    pub email: Email,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<ProgressConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<ProgressConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> ProgressResult<CreateUserOutput> {
        let user_name = UserName::new(input.user_name)
            .map_err(|e| ProgressError::InvalidInput(e.to_string()))?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(ProgressError::UserNameTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(user_name, email, password_hash);
        let score = ScoreRecord::initial(&user);
        let levels = LevelRecord::initial(user.user_id, self.config.default_level_count);

        self.user_repo
            .create_with_dependents(&user, &score, &levels)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User created"
        );

        Ok(CreateUserOutput {
            user_id: user.user_id,
            user_name: user.user_name,
            email: user.email,
        })
    }
}
