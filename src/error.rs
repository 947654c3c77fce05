//! Error taxonomy - every failure the console can surface
//!
//! All variants are recoverable: they render as a message and the console
//! stays interactive. Validation failures are raised before any network
//! call is attempted; transport and render failures only after one.

use thiserror::Error;

/// Errors surfaced to the console user
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// No endpoint has been configured yet; raised synchronously before dispatch
    #[error("no endpoint configured (use: endpoint <host[:port]>)")]
    MissingEndpoint,

    /// Endpoint setup or reference-data fetch failed
    #[error("configuration failed: {0}")]
    Configuration(String),

    /// A required field was missing or malformed before dispatch
    #[error("invalid input: {0}")]
    Validation(String),

    /// Non-2xx response or network failure
    #[error("http {status} {status_text}")]
    Transport {
        status: u16,
        status_text: String,
        /// Raw error body, rendered separately from the headline
        body: String,
    },

    /// A success response body could not be parsed as expected
    #[error("could not parse response: {0}")]
    Render(String),

    /// Declared but unbuilt operation variant
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl ConsoleError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ConsoleError::Validation(msg.into())
    }
}
