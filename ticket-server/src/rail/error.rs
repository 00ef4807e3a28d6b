//! 12306 client error types.

/// Errors from the 12306 HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RailError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned an error status code
    #[error("12306 error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response envelope
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The session endpoint handed out no cookies
    #[error("no session cookie received from 12306")]
    NoSessionCookie,

    /// Upstream accepted the request but returned no payload
    #[error("12306 rejected the query: {0}")]
    Rejected(&'static str),
}
