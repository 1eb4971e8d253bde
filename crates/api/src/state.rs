use std::sync::Arc;

use firstlook_core::revalidate::Revalidator;
use firstlook_media::generator::ContentGenerator;
use firstlook_media::places::PlacesClient;
use firstlook_media::storage::ObjectStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
///
/// The optional collaborators are `None` when their env config is absent;
/// handlers that need one answer 503 in that case. The revalidator is always
/// present (a no-op implementation stands in when no webhook is configured),
/// so write handlers never branch on it.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: firstlook_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Object storage for uploaded media (R2).
    pub store: Option<Arc<dyn ObjectStore>>,
    /// Google Places client for venue photo import.
    pub places: Option<Arc<PlacesClient>>,
    /// Draft generator for blog posts (Perplexity).
    pub generator: Option<Arc<dyn ContentGenerator>>,
    /// Frontend cache revalidation hook, fired after content writes.
    pub revalidator: Arc<dyn Revalidator>,
}
