//! Station loading error types.

/// Errors that can occur while fetching or decoding the station table.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned an error status
    #[error("upstream error {status} fetching {what}")]
    Upstream { status: u16, what: &'static str },

    /// The index page did not reference a station script
    #[error("station script path not found in index page")]
    ScriptNotFound,

    /// The station script did not contain the expected string literal
    #[error("malformed station script: {0}")]
    BadScript(&'static str),

    /// The table decoded to zero stations
    #[error("station table decoded to zero stations")]
    EmptyTable,
}
