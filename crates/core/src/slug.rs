//! Slug rules shared by every sluggable entity.
//!
//! A slug is the public URL identity of a film, venue or blog post:
//! lowercase alphanumeric runs separated by single hyphens. The same
//! rules apply on create and update; uniqueness is enforced per table
//! by the database.

use crate::error::CoreError;

/// Longest slug accepted anywhere.
pub const MAX_SLUG_LEN: usize = 160;

/// Check that `slug` is usable as a URL path segment.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("slug must not be empty".into()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "slug must be at most {MAX_SLUG_LEN} characters"
        )));
    }
    let valid_chars = slug
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if !valid_chars {
        return Err(CoreError::Validation(format!(
            "slug `{slug}` may only contain lowercase letters, digits and hyphens"
        )));
    }
    if slug.starts_with('-') || slug.ends_with('-') || slug.contains("--") {
        return Err(CoreError::Validation(format!(
            "slug `{slug}` must not begin, end or double up on hyphens"
        )));
    }
    Ok(())
}

/// Derive a slug suggestion from free text: alphanumerics lowercased,
/// every other run of characters collapsed into a single hyphen.
///
/// # Examples
///
/// ```
/// use firstlook_core::slug::slugify;
///
/// assert_eq!(slugify("Autumn at The Barn"), "autumn-at-the-barn");
/// assert_eq!(slugify("  Willow & Vine -- Estate  "), "willow-vine-estate");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    // Truncation can leave a trailing hyphen behind.
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
