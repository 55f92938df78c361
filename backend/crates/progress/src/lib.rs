//! Player Progress Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Account lifecycle (create, delete, profile lookup)
//! - Username + password authentication issuing signed bearer tokens
//! - High-water-mark score per player (compare-and-set, never decreases)
//! - Level-completion flags stored in a compact text encoding
//! - Global leaderboard (top N scores)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id
//! - Unknown users and wrong passwords are indistinguishable to callers
//! - Every per-user operation derives the user from the verified token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::ProgressConfig;
pub use error::{ProgressError, ProgressResult};
pub use infra::memory::MemoryProgressRepository;
pub use infra::postgres::PgProgressRepository;
pub use presentation::router::{progress_router, progress_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
