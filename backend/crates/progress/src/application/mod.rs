//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod create_user;
pub mod delete_user;
pub mod get_profile;
pub mod leaderboard;
pub mod levels;
pub mod score;
pub mod session_token;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::ProgressConfig;
pub use create_user::{CreateUserInput, CreateUserOutput, CreateUserUseCase};
pub use delete_user::DeleteUserUseCase;
pub use get_profile::{GetProfileUseCase, ProfileOutput};
pub use leaderboard::{RankedEntry, TopScoresUseCase};
pub use levels::LevelsUseCase;
pub use score::{EditScoreOutcome, EditScoreOutput, ScoreUseCase};
pub use session_token::{IssuedToken, SessionTokenService};
