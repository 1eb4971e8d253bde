use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Core settings have defaults suitable for local development. The
/// integration collaborators (object storage, photo search, draft
/// generation, revalidation) are optional sub-configs: when one is
/// absent the endpoints that need it answer 503 instead of the server
/// refusing to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// The single admin account accepted by `/auth/login`.
    pub admin: AdminConfig,
    /// R2 object storage. Absent: media upload and photo import answer 503.
    pub r2: Option<R2Config>,
    /// Google Places API key. Absent: photo import answers 503.
    pub places_api_key: Option<String>,
    /// Perplexity API key. Absent: blog draft generation answers 503.
    pub perplexity_api_key: Option<String>,
    /// Frontend revalidation webhook. Absent: writes skip revalidation.
    pub revalidate: Option<RevalidateConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_env`], [`AdminConfig::from_env`],
    /// [`R2Config::from_env`] and [`RevalidateConfig::from_env`] for the
    /// nested tables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            admin: AdminConfig::from_env(),
            r2: R2Config::from_env(),
            places_api_key: optional_env("GOOGLE_PLACES_API_KEY"),
            perplexity_api_key: optional_env("PERPLEXITY_API_KEY"),
            revalidate: RevalidateConfig::from_env(),
        }
    }
}

/// The single admin account. There is no user table; the credentials
/// live in the environment and the login handler verifies against them.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub email: String,
    /// PHC-formatted Argon2id hash, e.g. from `echo -n pw | argon2 ...`.
    pub password_hash: String,
}

impl AdminConfig {
    /// Load the admin credentials from environment variables.
    ///
    /// | Env Var               | Required |
    /// |-----------------------|----------|
    /// | `ADMIN_EMAIL`         | **yes**  |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing; the server is unusable
    /// without an admin.
    pub fn from_env() -> Self {
        let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set");
        let password_hash =
            std::env::var("ADMIN_PASSWORD_HASH").expect("ADMIN_PASSWORD_HASH must be set");
        assert!(
            password_hash.starts_with("$argon2"),
            "ADMIN_PASSWORD_HASH must be a PHC-formatted argon2 hash, not a plaintext password"
        );
        Self {
            email,
            password_hash,
        }
    }
}

/// Cloudflare R2 bucket settings for media storage.
#[derive(Debug, Clone)]
pub struct R2Config {
    /// Account endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`.
    pub endpoint: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// CDN base URL the bucket is publicly served from.
    pub public_base_url: String,
}

impl R2Config {
    /// Load R2 settings, keyed off `R2_ENDPOINT`.
    ///
    /// | Env Var                | Required when `R2_ENDPOINT` is set |
    /// |------------------------|------------------------------------|
    /// | `R2_ENDPOINT`          | (switch)                           |
    /// | `R2_BUCKET`            | **yes**                            |
    /// | `R2_ACCESS_KEY_ID`     | **yes**                            |
    /// | `R2_SECRET_ACCESS_KEY` | **yes**                            |
    /// | `R2_PUBLIC_BASE_URL`   | **yes**                            |
    ///
    /// Returns `None` when `R2_ENDPOINT` is unset. A partial config is a
    /// deployment mistake and panics at startup.
    pub fn from_env() -> Option<Self> {
        let endpoint = optional_env("R2_ENDPOINT")?;
        Some(Self {
            endpoint,
            bucket: std::env::var("R2_BUCKET").expect("R2_BUCKET must be set when R2_ENDPOINT is"),
            access_key_id: std::env::var("R2_ACCESS_KEY_ID")
                .expect("R2_ACCESS_KEY_ID must be set when R2_ENDPOINT is"),
            secret_access_key: std::env::var("R2_SECRET_ACCESS_KEY")
                .expect("R2_SECRET_ACCESS_KEY must be set when R2_ENDPOINT is"),
            public_base_url: std::env::var("R2_PUBLIC_BASE_URL")
                .expect("R2_PUBLIC_BASE_URL must be set when R2_ENDPOINT is"),
        })
    }
}

/// Frontend revalidation webhook settings.
#[derive(Debug, Clone)]
pub struct RevalidateConfig {
    /// Endpoint that accepts `{ "paths": [...] }` POSTs.
    pub url: String,
    /// Shared bearer secret for the endpoint.
    pub secret: String,
}

impl RevalidateConfig {
    /// Load revalidation settings, keyed off `REVALIDATE_URL`.
    ///
    /// | Env Var             | Required when `REVALIDATE_URL` is set |
    /// |---------------------|---------------------------------------|
    /// | `REVALIDATE_URL`    | (switch)                              |
    /// | `REVALIDATE_SECRET` | **yes**                               |
    pub fn from_env() -> Option<Self> {
        let url = optional_env("REVALIDATE_URL")?;
        Some(Self {
            url,
            secret: std::env::var("REVALIDATE_SECRET")
                .expect("REVALIDATE_SECRET must be set when REVALIDATE_URL is"),
        })
    }
}

/// Read an env var, treating empty values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
