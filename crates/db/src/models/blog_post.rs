//! Blog post entity model and DTOs.

use chrono::NaiveDate;
use firstlook_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: EntityId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body_html: Option<String>,
    pub header_image_url: Option<String>,
    /// Display date shown on the site, distinct from `created_at`.
    pub published_on: NaiveDate,
    pub category: String,
    pub published: bool,
    pub featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Display projection used by the related-posts strip. Carries the
/// category so the sampler can band candidates without a second fetch.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPostCard {
    pub id: EntityId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub header_image_url: Option<String>,
    pub published_on: NaiveDate,
    pub category: String,
}

/// DTO for creating a new blog post.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlogPost {
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub body_html: Option<String>,
    pub header_image_url: Option<String>,
    pub published_on: NaiveDate,
    pub category: String,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

/// DTO for updating an existing blog post. Only non-`None` fields are
/// applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlogPost {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub body_html: Option<String>,
    pub header_image_url: Option<String>,
    pub published_on: Option<NaiveDate>,
    pub category: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}
