//! Timetables feed error types.

/// Errors fetching a feed document.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected
    #[error("unauthorized: check DB_CLIENT_ID and DB_CLIENT_SECRET")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by timetables API")]
    RateLimited,

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body is not a well-formed document
    #[error("XML parse error: {message}")]
    Xml {
        message: String,
        body: Option<String>,
    },

    /// Fixture file missing or unreadable
    #[error("fixture error: {message}")]
    Fixture { message: String },

    /// Client could not be configured
    #[error("not configured: {0}")]
    NotConfigured(String),
}
