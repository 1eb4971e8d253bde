//! Shared type aliases used across the workspace.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Primary key of a top-level content entity (film, venue, blog post).
///
/// UUIDv7: time-ordered, minted application-side without a database
/// round-trip, safe to expose in admin URLs.
pub type EntityId = Uuid;

/// Primary key of a child or join row. These never leave their parent
/// aggregate, so a plain sequence suffices and keeps the
/// `(sort_order, id)` ordering tie-break deterministic.
pub type RowId = i64;

/// UTC timestamp for `created_at` / `updated_at` columns.
pub type Timestamp = DateTime<Utc>;
