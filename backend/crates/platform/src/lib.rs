//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64url, secure random bytes)
//! - Password hashing (Argon2id with optional pepper)
//! - Bearer credential extraction from request headers

pub mod bearer;
pub mod crypto;
pub mod password;
