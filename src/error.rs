use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures while talking to an upstream provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("API request failed with status code: {status} (URL: {url})")]
    Status { status: u16, url: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response structure: {0}")]
    UnexpectedStructure(String),

    #[error("Failed to parse date '{value}' with layout {layout}")]
    DateParse { value: String, layout: String },

    #[error("week not found for the given date {0}")]
    WeekNotFound(DateTime<Utc>),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures while handing a batch to the ingestion service.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to marshal matches: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ingestion service returned status code: {0}")]
    Status(u16),
}
