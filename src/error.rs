//! Error types for talking to the info APIs

use thiserror::Error;

/// Errors that abort a scenario run.
///
/// A shape mismatch is not an error; it is reported through the comparator's
/// diagnostics and verdict.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network or protocol failure while calling a backend
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A backend answered with a body that is not JSON
    #[error("{backend} returned a body that is not valid JSON: {source}")]
    Decode {
        backend: String,
        #[source]
        source: serde_json::Error,
    },

    /// Printing a response to the console failed
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for info API operations
pub type Result<T> = std::result::Result<T, Error>;
