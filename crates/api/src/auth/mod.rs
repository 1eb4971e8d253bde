//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! There is no user table: the single admin account is configured through
//! the environment (see [`crate::config::AdminConfig`]) and every issued
//! token carries the [`ROLE_ADMIN`] role.

pub mod jwt;
pub mod password;

/// The only role the API issues or accepts for admin routes.
pub const ROLE_ADMIN: &str = "admin";
