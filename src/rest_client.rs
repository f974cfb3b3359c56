use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::log;

use crate::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(FetchError::Client)
}

/// Sends a prepared GET, requires 200 and decodes the body as `T`.
pub async fn get_call<T: DeserializeOwned>(request: RequestBuilder, url: &str) -> Result<T, FetchError> {
    let before = Instant::now();
    let rsp = request.send().await
        .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;

    if rsp.status() != StatusCode::OK {
        log::info!("[REST] Call {url} {} {:.2?}", rsp.status(), before.elapsed());
        return Err(FetchError::Status { status: rsp.status().as_u16(), url: url.to_string() });
    }

    let body = rsp.bytes().await
        .map_err(|source| FetchError::Transport { url: url.to_string(), source })?;
    log::info!("[REST] Call {url} {:.2?}", before.elapsed());

    serde_json::from_slice(&body)
        .map_err(|source| FetchError::Decode { url: url.to_string(), source })
}
