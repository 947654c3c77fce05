use serde::{Deserialize, Serialize};

use crate::constants::API_VERSION;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }
}

/// Names the success handler that post-processes a response body.
///
/// Extractors are data rather than closures so operations can cross the
/// channel to the network actor and back; the console state applies them
/// when the matching response arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Extract {
    /// Default renderer only, no session mutation
    #[default]
    None,
    /// `_id` + `displayName` become the current user
    Identity,
    /// `_id` becomes the current channel
    Channel,
    /// `_id` becomes the current channel type
    ChannelType,
    /// `_id` becomes the current blah; `img` refs derive image URLs
    Blah,
    /// `_id` becomes the current comment
    Comment,
    /// First record's `_id` becomes the current badge authority
    BadgeAuthority,
    /// Reference-data records populate the type cache
    BlahTypes,
}

/// One REST call, described as a value.
///
/// Constructed fresh per user action by an operation constructor and
/// consumed immediately by dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation {
    pub method: HttpMethod,
    /// Relative path, joined as `http://{endpoint}/v2/{path}`; may carry
    /// embedded path and query parameters
    pub path: String,
    /// Serialized once as JSON with an `application/json` content type,
    /// regardless of method
    pub body: Option<serde_json::Value>,
    pub extract: Extract,
}

impl Operation {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Operation {
            method,
            path: path.into(),
            body: None,
            extract: Extract::None,
        }
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_extract(mut self, extract: Extract) -> Self {
        self.extract = extract;
        self
    }

    /// Absolute URL against a configured endpoint
    pub fn url(&self, endpoint: &str) -> String {
        format!("http://{}/{}/{}", endpoint, API_VERSION, self.path)
    }
}

/// One reference-data record from `GET /v2/blahs/types`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlahTypeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_endpoint_version_and_path() {
        let op = Operation::new(HttpMethod::GET, "blahs/types");
        assert_eq!(op.url("localhost:8080"), "http://localhost:8080/v2/blahs/types");
    }

    #[test]
    fn test_url_keeps_query_parameters() {
        let op = Operation::new(HttpMethod::GET, "blahs?authorId=U1");
        assert_eq!(op.url("api.example.com"), "http://api.example.com/v2/blahs?authorId=U1");
    }
}
