use std::time::{Duration, Instant};

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Serialize;
use tracing::log;

use crate::config_handler::Config;
use crate::error::ForwardError;

/// Posts fetched batches to the ingestion service.
pub struct Forwarder {
    url: String,
    client: Client,
}

impl Forwarder {
    pub fn new(url: &str, timeout: Duration) -> Result<Forwarder, ForwardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Forwarder { url: url.to_string(), client })
    }

    pub fn from_config(config: &Config) -> Result<Forwarder, ForwardError> {
        Forwarder::new(&config.ingest_url, config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn forward<T: Serialize>(&self, batch: &[T]) -> Result<(), ForwardError> {
        let before = Instant::now();
        let json = serde_json::to_vec(batch)?;

        let rsp = self.client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(json)
            .send()
            .await?;

        if rsp.status() != StatusCode::OK {
            return Err(ForwardError::Status(rsp.status().as_u16()));
        }
        log::info!("[FORWARD] Sent {} matches to {} {:.2?}", batch.len(), self.url, before.elapsed());
        Ok(())
    }
}
