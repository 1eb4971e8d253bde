//! External collaborators for the content API.
//!
//! Everything here talks to a third party: object storage, the Google
//! Places API, and the Perplexity chat API. Each collaborator sits
//! behind a small trait or client struct so handlers can be tested
//! without network access. Failures are surfaced as [`MediaError`] and
//! never touch database state.

pub mod error;
pub mod generator;
pub mod import;
pub mod places;
pub mod storage;

pub use error::MediaError;
