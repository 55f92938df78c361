//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    leaderboard_entry::LeaderboardEntry, level_record::LevelRecord, score_record::ScoreRecord,
    user::User,
};
pub use repository::{LevelRepository, ProgressRepository, ScoreRepository, UserRepository};
