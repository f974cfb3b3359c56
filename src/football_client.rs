use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::log;

use crate::config_handler::Config;
use crate::error::FetchError;
use crate::models_api::football::{Competition, Match};
use crate::models_external::football::{CompetitionsRsp, MatchesRsp};
use crate::rest_client::{self, build_client};

const AUTH_HEADER: &str = "X-Auth-Token";
const QUERY_DATE: &str = "%Y-%m-%d";

pub struct FootballDataClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl FootballDataClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<FootballDataClient, FetchError> {
        Ok(FootballDataClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<FootballDataClient, FetchError> {
        FootballDataClient::new(&config.football_url, &config.football_api_key, config.timeout())
    }

    pub async fn fetch_matches(&self) -> Result<Vec<Match>, FetchError> {
        let url = format!("{}/matches", self.base_url);
        self.fetch_match_list(&url).await
    }

    pub async fn fetch_matches_by_competition(&self, competition_id: &str, date_from: NaiveDate, date_to: NaiveDate) -> Result<Vec<Match>, FetchError> {
        let url = format!("{}/competitions/{competition_id}/matches?dateFrom={}&dateTo={}",
            self.base_url, date_from.format(QUERY_DATE), date_to.format(QUERY_DATE));
        self.fetch_match_list(&url).await
    }

    pub async fn fetch_matches_by_team(&self, team_id: &str, date_from: NaiveDate, date_to: NaiveDate) -> Result<Vec<Match>, FetchError> {
        let url = format!("{}/teams/{team_id}/matches?dateFrom={}&dateTo={}",
            self.base_url, date_from.format(QUERY_DATE), date_to.format(QUERY_DATE));
        self.fetch_match_list(&url).await
    }

    pub async fn fetch_competitions(&self) -> Result<Vec<Competition>, FetchError> {
        let url = format!("{}/competitions", self.base_url);
        let rsp: CompetitionsRsp = self.get(&url).await?;
        Ok(rsp.competitions.into_iter().map(Competition::from).collect())
    }

    async fn fetch_match_list(&self, url: &str) -> Result<Vec<Match>, FetchError> {
        let rsp: MatchesRsp = self.get(url).await?;
        let matches: Vec<Match> = rsp.matches.into_iter().map(Match::from).collect();
        log::info!("[FOOTBALL] Mapped {} matches", matches.len());
        Ok(matches)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let request = self.client.get(url)
            .header(AUTH_HEADER, &self.api_key);
        rest_client::get_call(request, url).await
    }
}
