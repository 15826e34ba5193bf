//! Error types for Confluence integration.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfluenceError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Credential options do not form a usable session.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// TLS client certificate or key could not be loaded.
    #[error("TLS client certificate error: {0}")]
    Tls(String),

    /// No parent page found for the configured space.
    #[error("no page titled {title:?} found in space {space_key:?}")]
    ParentPageNotFound {
        /// Parent page title.
        title: String,
        /// Space key searched.
        space_key: String,
    },

    /// I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}
