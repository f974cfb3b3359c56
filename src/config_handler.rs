use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::log;

use crate::date_layout::{DateLayout, NFL_EVENT_LAYOUT};
use crate::models::ForwardFailurePolicy;
use crate::rest_client::DEFAULT_TIMEOUT;

pub const DEFAULT_CONFIG_PATH: &str = "./deployment/config.json";

#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub port: u16,

    pub ingest_url: String,

    pub football_url: String,
    pub football_api_key: String,

    pub nfl_url: String,
    pub nfl_host: String,
    pub nfl_api_key: String,
    pub nfl_season_type: u8,
    pub nfl_event_date_layout: String,

    pub timeout_s: u64,

    pub on_forward_failure: ForwardFailurePolicy,
}

fn default_port() -> u16 {
    8080
}

fn default_ingest_url() -> String {
    "http://localhost:8080/ingest".to_string()
}

fn default_football_url() -> String {
    "http://api.football-data.org/v4".to_string()
}

fn default_nfl_url() -> String {
    "https://nfl-api-data.p.rapidapi.com".to_string()
}

fn default_nfl_host() -> String {
    "nfl-api-data.p.rapidapi.com".to_string()
}

fn default_timeout_s() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: default_port(),
            ingest_url: default_ingest_url(),
            football_url: default_football_url(),
            football_api_key: String::new(),
            nfl_url: default_nfl_url(),
            nfl_host: default_nfl_host(),
            nfl_api_key: String::new(),
            nfl_season_type: 2,
            nfl_event_date_layout: NFL_EVENT_LAYOUT.to_string(),
            timeout_s: default_timeout_s(),
            on_forward_failure: ForwardFailurePolicy::default(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("ingest_url", &self.ingest_url)
            .field("football_url", &self.football_url)
            .field("football_api_key", &redact(&self.football_api_key))
            .field("nfl_url", &self.nfl_url)
            .field("nfl_host", &self.nfl_host)
            .field("nfl_api_key", &redact(&self.nfl_api_key))
            .field("nfl_season_type", &self.nfl_season_type)
            .field("nfl_event_date_layout", &self.nfl_event_date_layout)
            .field("timeout_s", &self.timeout_s)
            .field("on_forward_failure", &self.on_forward_failure)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_s)
    }

    pub fn event_date_layout(&self) -> DateLayout {
        DateLayout::pattern(&self.nfl_event_date_layout)
    }

    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("FOOTBALL_API_KEY") {
            self.football_api_key = key;
        }
        if let Ok(key) = std::env::var("NFL_API_KEY") {
            self.nfl_api_key = key;
        }
        if let Ok(url) = std::env::var("INGEST_URL") {
            log::info!("[CONFIG] INGEST_URL {}", url);
            self.ingest_url = url;
        }
    }
}

pub fn read_config(path: &Path) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Unable to read config {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Could not parse JSON at {}!", path.display()))
}

/// Reads `CONFIG_PATH` (or the default path when present) and applies secrets from the environment.
pub fn get_config() -> anyhow::Result<Config> {
    let mut result = match std::env::var("CONFIG_PATH") {
        Ok(path) => read_config(Path::new(&path))?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => read_config(Path::new(DEFAULT_CONFIG_PATH))?,
        Err(_) => {
            log::info!("[CONFIG] No config file, using defaults");
            Config::default()
        }
    };
    result.apply_env();
    log::info!("[CONFIG] {:?}", result);
    Ok(result)
}
