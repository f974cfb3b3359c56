use std::net::TcpListener;
use std::process::{Child, Command, Output};
use std::time::Duration;

use assert_cmd::prelude::CommandCargoExt;
use sports_ingest_rs::{config_handler::Config, models::ForwardFailurePolicy};

use super::external_server::{FOOTBALL_KEY, NFL_HOST, NFL_KEY};

const BIN: &str = "sports-ingest-rs";

/// Runs the binary against a config written to a temp dir.
pub struct IngestCli {
    config_path: String,
    child_process: Option<Child>,
}

impl Drop for IngestCli {
    fn drop(&mut self) {
        if let Some(child) = self.child_process.as_mut() {
            child.kill().expect("Should kill");
        }
    }
}

impl IngestCli {
    pub fn new(path: &str, external_url: &str, ingest_url: &str, policy: ForwardFailurePolicy) -> IngestCli {
        let config = Config {
            ingest_url: ingest_url.to_string(),
            football_url: external_url.to_string(),
            football_api_key: FOOTBALL_KEY.to_string(),
            nfl_url: external_url.to_string(),
            nfl_host: NFL_HOST.to_string(),
            nfl_api_key: NFL_KEY.to_string(),
            timeout_s: 5,
            on_forward_failure: policy,
            ..Default::default()
        };

        let config_str = serde_json::to_string(&config).unwrap();
        let config_path = format!("{path}/config.json");
        std::fs::write(config_path.clone(), config_str).unwrap();
        IngestCli { config_path, child_process: None }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin(BIN).unwrap();
        cmd.env("CONFIG_PATH", &self.config_path)
            .env_remove("FOOTBALL_API_KEY")
            .env_remove("NFL_API_KEY")
            .env_remove("INGEST_URL");
        cmd
    }

    /// Blocks until the fetch run exits, call from `spawn_blocking`.
    pub fn fetch(&self, args: &[&str]) -> Output {
        self.command()
            .arg("fetch")
            .args(args)
            .output()
            .expect("should run")
    }

    /// Starts `serve` on a free port and returns the ingest url.
    pub fn serve(&mut self) -> String {
        let port = free_port();
        let child_process = self.command()
            .arg("serve")
            .arg("--port")
            .arg(port.to_string())
            .spawn()
            .expect("should start");
        self.child_process = Some(child_process);
        format!("http://127.0.0.1:{port}/ingest")
    }
}

pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
    listener.local_addr().expect("should have addr").port()
}

/// Polls until the server answers, any status counts.
pub async fn wait_until_up(url: &str) {
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if client.get(url).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("{url} never came up");
}
