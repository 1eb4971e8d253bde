//! Error type shared by all repositories.

/// Failures surfaced by repository operations.
///
/// Expected, recoverable cases get their own variants; everything else
/// passes through as the raw `sqlx::Error` for the API layer to
/// classify.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// The requested slug already belongs to another row of the same
    /// entity type.
    #[error("slug `{0}` is already in use")]
    SlugTaken(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
