//! Network messages - communication between console and network layers

use crate::models::HttpMethod;

/// A fully resolved HTTP request, ready for the wire.
///
/// Built by the dispatcher from an `Operation` and the configured endpoint;
/// the network layer never consults session state.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Serialized as JSON with an `application/json` content type for every
    /// method, GET included
    pub body: Option<serde_json::Value>,
}

/// Commands sent from the console layer to the network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one fire-and-forget HTTP request
    Dispatch { id: u64, request: HttpRequest },
    /// Shutdown the network actor
    Shutdown,
}

/// Terminal responses sent from the network layer back to the console.
///
/// Exactly one per dispatched request id; completion order across
/// concurrent requests is unspecified.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// 2xx response with its raw body
    Success {
        id: u64,
        status: u16,
        body: String,
        time_ms: u64,
    },
    /// Non-2xx response or transport failure
    Failure {
        id: u64,
        /// None when the request never reached the server
        status: Option<u16>,
        status_text: String,
        body: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Failure { id, .. } => *id,
        }
    }
}
