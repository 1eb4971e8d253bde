//! Domain primitives shared across the workspace.
//!
//! Pure logic only: no database handles, no HTTP. The db and api
//! crates build on the types, errors and strategies defined here.

pub mod error;
pub mod related;
pub mod revalidate;
pub mod slug;
pub mod types;
