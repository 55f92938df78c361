//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the service vocabulary:
//! - The error taxonomy every layer speaks (`ErrorKind`, `AppError`)
//! - Typed identifiers shared by the domain crates
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    #[cfg(any(feature = "sqlx", feature = "axum"))]
    pub mod conversions;
    pub mod kind;
}
pub mod id;
