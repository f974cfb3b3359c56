use std::fmt::Display;

use chrono::{Datelike, NaiveDate, Utc};
use thiserror::Error;
use tracing::log;

use crate::config_handler::Config;
use crate::error::{FetchError, ForwardError};
use crate::football_client::FootballDataClient;
use crate::forwarder::Forwarder;
use crate::models::{ForwardFailurePolicy, Provider};
use crate::models_api::football::Match;
use crate::models_api::nfl::NFLMatch;
use crate::nfl_client::NFLDataClient;

#[derive(Debug, Clone, PartialEq)]
pub enum FootballQuery {
    All,
    Competition { id: String, date_from: NaiveDate, date_to: NaiveDate },
    Team { id: String, date_from: NaiveDate, date_to: NaiveDate },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchRequest {
    Football(FootballQuery),
    /// Without a week the current week is looked up.
    Nfl { year: Option<i32>, week: Option<i32> },
}

impl FetchRequest {
    pub fn provider(&self) -> Provider {
        match self {
            FetchRequest::Football(_) => Provider::Football,
            FetchRequest::Nfl { .. } => Provider::Nfl,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Batch {
    Football(Vec<Match>),
    NFL(Vec<NFLMatch>),
}

impl Batch {
    pub fn len(&self) -> usize {
        match self {
            Batch::Football(m) => m.len(),
            Batch::NFL(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Batch::Football(m) => write!(f, "{} football matches", m.len()),
            Batch::NFL(m) => write!(f, "{} NFL matches", m.len()),
        }
    }
}

#[derive(Debug)]
pub struct RunOutcome {
    pub batch: Batch,
    /// Set when forwarding failed under `ForwardFailurePolicy::Log`.
    pub forward_error: Option<ForwardError>,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("Failed to fetch {provider} matches: {source}")]
    Fetch { provider: Provider, #[source] source: FetchError },

    #[error("Failed to send {batch} to ingestion service: {source}")]
    Forward { batch: Batch, #[source] source: ForwardError },
}

pub struct FetchService {
    football: FootballDataClient,
    nfl: NFLDataClient,
    forwarder: Forwarder,
    policy: ForwardFailurePolicy,
}

impl FetchService {
    pub fn new(football: FootballDataClient, nfl: NFLDataClient, forwarder: Forwarder, policy: ForwardFailurePolicy) -> FetchService {
        FetchService { football, nfl, forwarder, policy }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<FetchService> {
        Ok(FetchService::new(
            FootballDataClient::from_config(config)?,
            NFLDataClient::from_config(config)?,
            Forwarder::from_config(config)?,
            config.on_forward_failure,
        ))
    }

    pub fn with_policy(mut self, policy: ForwardFailurePolicy) -> FetchService {
        self.policy = policy;
        self
    }

    pub async fn fetch(&self, request: &FetchRequest) -> Result<Batch, FetchError> {
        match request {
            FetchRequest::Football(FootballQuery::All) => {
                self.football.fetch_matches().await.map(Batch::Football)
            },
            FetchRequest::Football(FootballQuery::Competition { id, date_from, date_to }) => {
                self.football.fetch_matches_by_competition(id, *date_from, *date_to).await.map(Batch::Football)
            },
            FetchRequest::Football(FootballQuery::Team { id, date_from, date_to }) => {
                self.football.fetch_matches_by_team(id, *date_from, *date_to).await.map(Batch::Football)
            },
            FetchRequest::Nfl { year, week: Some(week) } => {
                let year = year.unwrap_or_else(|| Utc::now().year());
                self.nfl.fetch_games_for_week(year, *week).await.map(Batch::NFL)
            },
            FetchRequest::Nfl { week: None, .. } => {
                self.nfl.fetch_games_for_current_week().await.map(Batch::NFL)
            },
        }
    }

    /// Fetches one batch and hands it to the ingestion service.
    pub async fn run(&self, request: &FetchRequest) -> Result<RunOutcome, RunError> {
        let batch = self.fetch(request).await
            .map_err(|source| RunError::Fetch { provider: request.provider(), source })?;
        log::info!("[FETCH] Fetched {batch}");

        let forwarded = match &batch {
            Batch::Football(matches) => self.forwarder.forward(matches).await,
            Batch::NFL(matches) => self.forwarder.forward(matches).await,
        };

        match (forwarded, self.policy) {
            (Ok(()), _) => {
                log::info!("[FETCH] {} data sent to ingestion service successfully", request.provider());
                Ok(RunOutcome { batch, forward_error: None })
            },
            (Err(e), ForwardFailurePolicy::Log) => {
                log::error!("[FETCH] Failed to send {} data to {}: {e}", request.provider(), self.forwarder.url());
                Ok(RunOutcome { batch, forward_error: Some(e) })
            },
            (Err(source), ForwardFailurePolicy::Exit) => Err(RunError::Forward { batch, source }),
        }
    }
}
