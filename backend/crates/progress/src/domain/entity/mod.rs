//! Entity Module

pub mod leaderboard_entry;
pub mod level_record;
pub mod score_record;
pub mod user;
