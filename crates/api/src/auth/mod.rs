//! Authentication primitives for the single dashboard admin.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation, validation, and refresh-token helpers.

pub mod jwt;
pub mod password;

/// Role claim carried by every admin token.
pub const ROLE_ADMIN: &str = "admin";
