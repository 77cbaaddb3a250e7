//! Shared outbound HTTP plumbing for the service clients
//!
//! One request per call: no retries, no rate limiting, no caching.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::error::Service;
use crate::{NavMindError, Result};

/// Longest upstream error body quoted in an error message
const MAX_ERROR_BODY: usize = 200;

/// Build the HTTP client shared by all service clients
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds.into()))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| NavMindError::config(format!("Failed to create HTTP client: {e}")))
}

/// Join a base URL and a path without doubling or dropping the slash
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Turn a non-success response into an error tagged with the service
pub async fn check_status(service: Service, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        debug!(%service, %status, "upstream responded");
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(%service, %status, "upstream request failed");

    let message = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("authentication failed (HTTP {}). Please check the API key.", status.as_u16())
        }
        StatusCode::TOO_MANY_REQUESTS => "rate limit exceeded (HTTP 429)".to_string(),
        _ => {
            let snippet = truncate(body.trim(), MAX_ERROR_BODY);
            if snippet.is_empty() {
                format!(
                    "request failed with status {} - {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown error")
                )
            } else {
                format!("request failed with status {}: {snippet}", status.as_u16())
            }
        }
    };

    Err(NavMindError::api(service, message))
}

/// Decode a JSON body, mapping failures to a malformed-response error
pub async fn read_json<T: DeserializeOwned>(service: Service, response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| NavMindError::api(service, format!("malformed response: {e}")))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
