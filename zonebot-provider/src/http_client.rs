//! HTTP 基础工具
//!
//! A single send/receive step shared by providers. Requests are never retried:
//! callers get exactly one attempt and one error.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::ProviderError;
use crate::utils::log_sanitizer::truncate_for_log;

/// 连接超时（秒）
pub const CONNECT_TIMEOUT_SECS: u64 = 10;
/// 整体请求超时（秒）
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Client with the connect and request timeouts applied.
pub fn create_http_client(provider: &str) -> Result<Client, ProviderError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Status and body of a finished request.
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    let provider = provider.to_string();
    let detail = e.to_string();
    if e.is_timeout() {
        ProviderError::Timeout { provider, detail }
    } else {
        ProviderError::NetworkError { provider, detail }
    }
}

/// Send `request` once and read the whole body.
///
/// `label` only appears in logs (e.g. `GET /zones`). HTTP 429 is turned into
/// [`ProviderError::RateLimited`]; every other status is returned to the caller.
pub async fn send_request(
    request: RequestBuilder,
    provider: &str,
    label: &str,
) -> Result<RawResponse, ProviderError> {
    log::debug!("[{provider}] {label}");

    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, &e))?;
    let status = response.status().as_u16();

    // 读取 body 之前先取 Retry-After
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
    log::debug!("[{provider}] {label} -> {status}: {}", truncate_for_log(&body));

    if status == 429 {
        log::warn!("[{provider}] {label} rate limited, retry_after={retry_after:?}");
        return Err(ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after,
            raw_message: Some(truncate_for_log(&body)),
        });
    }

    Ok(RawResponse { status, body })
}

/// Deserialize a response body, logging the raw text when it does not fit `T`.
pub fn decode_json<T: DeserializeOwned>(body: &str, provider: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        log::error!(
            "[{provider}] Unexpected response ({e}): {}",
            truncate_for_log(body)
        );
        ProviderError::ParseError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    })
}
