//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Generic `?limit=` parameter for sampling endpoints.
///
/// Used by the recommended-films, related-posts and photo-import handlers,
/// each of which applies its own default when the parameter is absent.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<usize>,
}

/// Query parameters for the public venue list (`?category=&wedding_type=`).
///
/// Both filters match against the venue's array columns; an absent filter
/// matches everything.
#[derive(Debug, Deserialize)]
pub struct VenueFilterParams {
    pub category: Option<String>,
    pub wedding_type: Option<String>,
}
