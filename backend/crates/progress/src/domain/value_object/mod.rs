//! Value Object Module

pub mod email;
pub mod level_progress;
pub mod score;
pub mod user_name;
pub mod user_password;

pub use email::Email;
pub use kernel::id::UserId;
pub use level_progress::{LevelDecodeError, LevelProgress};
pub use score::{Score, ScoreError};
pub use user_name::{UserName, UserNameError};
pub use user_password::{RawPassword, UserPassword};
