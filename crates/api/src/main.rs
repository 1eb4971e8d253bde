use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firstlook_api::config::ServerConfig;
use firstlook_api::revalidate::WebhookRevalidator;
use firstlook_api::router::build_app_router;
use firstlook_api::state::AppState;
use firstlook_core::revalidate::{NoopRevalidator, Revalidator};
use firstlook_media::generator::{ContentGenerator, PerplexityClient};
use firstlook_media::places::PlacesClient;
use firstlook_media::storage::{ObjectStore, R2Store};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firstlook_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = firstlook_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    firstlook_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    firstlook_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Optional collaborators ---
    let store: Option<Arc<dyn ObjectStore>> = match &config.r2 {
        Some(r2) => {
            tracing::info!(bucket = %r2.bucket, "R2 object store configured");
            Some(Arc::new(R2Store::new(
                &r2.endpoint,
                r2.bucket.clone(),
                &r2.access_key_id,
                &r2.secret_access_key,
                r2.public_base_url.clone(),
            )))
        }
        None => {
            tracing::info!("No object store configured; media upload and photo import disabled");
            None
        }
    };

    let places: Option<Arc<PlacesClient>> = match &config.places_api_key {
        Some(key) => {
            tracing::info!("Google Places client configured");
            Some(Arc::new(PlacesClient::new(key.clone())))
        }
        None => {
            tracing::info!("No Places API key configured; photo import disabled");
            None
        }
    };

    let generator: Option<Arc<dyn ContentGenerator>> = match &config.perplexity_api_key {
        Some(key) => {
            tracing::info!("Perplexity draft generator configured");
            Some(Arc::new(PerplexityClient::new(key.clone())))
        }
        None => {
            tracing::info!("No Perplexity API key configured; draft generation disabled");
            None
        }
    };

    let revalidator: Arc<dyn Revalidator> = match &config.revalidate {
        Some(reval) => {
            tracing::info!(url = %reval.url, "Frontend revalidation configured");
            Arc::new(WebhookRevalidator::new(reval))
        }
        None => {
            tracing::info!("No revalidation endpoint configured; content writes will not notify the frontend");
            Arc::new(NoopRevalidator)
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        store,
        places,
        generator,
        revalidator,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
