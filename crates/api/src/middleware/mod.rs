//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated admin from a JWT Bearer token.
//! - [`auth::RequireAdmin`] -- Requires the `admin` role.

pub mod auth;
