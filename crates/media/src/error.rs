//! Error type shared by all external collaborators.

/// Errors from object storage, places lookup or content generation.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream service answered with a non-2xx status code.
    #[error("{service} returned HTTP {status}: {body}")]
    Upstream {
        /// Which collaborator failed.
        service: &'static str,
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The upstream service answered 2xx but the body did not have the
    /// shape we asked for.
    #[error("could not parse {service} response: {detail}")]
    InvalidResponse {
        service: &'static str,
        detail: String,
    },

    /// An object storage operation failed.
    #[error("storage operation failed: {0}")]
    Storage(String),
}
