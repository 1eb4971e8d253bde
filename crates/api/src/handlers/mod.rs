//! Request handlers for the content API.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `firstlook_db`
//! (or a collaborator from `firstlook_media`) and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod blog_posts;
pub mod films;
pub mod media;
pub mod venues;
