//! Frontend cache invalidation.
//!
//! Every successful admin write names the statically rendered pages
//! that display the touched entity; the [`Revalidator`] seam carries
//! that list out to whatever refreshes the frontend. Delivery lives in
//! the api crate; tests and unconfigured deployments use the no-op.

use async_trait::async_trait;

/// Pages to refresh after a film write. The home page carries the
/// featured-films strip, so it is always included.
pub fn film_paths(slug: &str) -> Vec<String> {
    vec!["/".into(), "/films".into(), format!("/films/{slug}")]
}

/// Pages to refresh after a venue write.
pub fn venue_paths(slug: &str) -> Vec<String> {
    vec!["/venues".into(), format!("/venues/{slug}")]
}

/// Pages to refresh after a blog post write.
pub fn blog_paths(slug: &str) -> Vec<String> {
    vec!["/blog".into(), format!("/blog/{slug}")]
}

#[async_trait]
pub trait Revalidator: Send + Sync {
    /// Ask the frontend to re-render `paths`.
    ///
    /// Must never fail the calling write: implementations log delivery
    /// problems and return normally.
    async fn revalidate(&self, paths: &[String]);
}

/// Stand-in when no revalidation endpoint is configured, and for tests.
#[derive(Debug, Default)]
pub struct NoopRevalidator;

#[async_trait]
impl Revalidator for NoopRevalidator {
    async fn revalidate(&self, paths: &[String]) {
        tracing::debug!(?paths, "revalidation disabled, skipping");
    }
}
