//! Shared plumbing for the HTTP-backed clients.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{SourceError, SourceResult};
use crate::config::ServiceConfig;

/// Builds a `reqwest` client honoring the configured timeout and user agent.
pub(crate) fn build_client(config: &ServiceConfig) -> SourceResult<Client> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| SourceError::Configuration {
            message: format!("Failed to create HTTP client: {e}"),
        })
}

/// Decodes a successful response or maps the status to a [`SourceError`].
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> SourceResult<T> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| SourceError::Serialization {
                message: e.to_string(),
            })
    } else {
        handle_error_response(response).await
    }
}

/// Converts an error response to a [`SourceError`].
pub(crate) async fn handle_error_response<T>(response: Response) -> SourceResult<T> {
    let status = response.status();
    let retry_after = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok());

    let body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        401 | 403 => Err(SourceError::Authentication { message: body }),
        429 => Err(SourceError::RateLimited {
            retry_after_secs: retry_after,
        }),
        400 => Err(SourceError::InvalidRequest { message: body }),
        status => Err(SourceError::ServerError {
            status,
            message: body,
        }),
    }
}
