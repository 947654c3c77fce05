//! HTTP client wrapper - executes one request and classifies the outcome

use std::time::Instant;

use crate::messages::{HttpRequest, NetworkResponse};
use crate::models::HttpMethod;

/// Build a reqwest request from the resolved parameters
fn build_request(client: &reqwest::Client, request: &HttpRequest) -> reqwest::RequestBuilder {
    let mut req_builder = match request.method {
        HttpMethod::GET => client.get(&request.url),
        HttpMethod::POST => client.post(&request.url),
        HttpMethod::PUT => client.put(&request.url),
        HttpMethod::DELETE => client.delete(&request.url),
    };

    // JSON body and content type for every method, GET included; the
    // backend tolerates a body on reads and the console keeps one uniform
    // request shape
    if let Some(body) = &request.body {
        req_builder = req_builder.json(body);
    } else {
        req_builder = req_builder.header("Content-Type", "application/json");
    }

    req_builder
}

/// Execute an HTTP request and return exactly one terminal response
pub async fn execute_request(
    client: &reqwest::Client,
    request: HttpRequest,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let req_builder = build_request(client, &request);

    let result = req_builder.send().await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) => {
            let status = resp.status();
            let status_text = status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string();
            let body = resp.text().await.unwrap_or_default();
            if status.is_success() {
                NetworkResponse::Success {
                    id: request_id,
                    status: status.as_u16(),
                    body,
                    time_ms: start.elapsed().as_millis() as u64,
                }
            } else {
                NetworkResponse::Failure {
                    id: request_id,
                    status: Some(status.as_u16()),
                    status_text,
                    body,
                    time_ms: start.elapsed().as_millis() as u64,
                }
            }
        }
        Err(e) => {
            let msg = if e.is_timeout() {
                "Request timed out (30s)".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            NetworkResponse::Failure {
                id: request_id,
                status: None,
                status_text: msg,
                body: String::new(),
                time_ms: elapsed,
            }
        }
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
