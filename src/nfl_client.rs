use std::time::Duration;

use chrono::{DateTime, Datelike, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::log;

use crate::config_handler::Config;
use crate::date_layout::DateLayout;
use crate::error::FetchError;
use crate::models_api::nfl::{NFLMatch, NFLTeam};
use crate::models_external::nfl::{find_week, EventRsp, NFLMatchesRsp, TeamRsp, TeamsRsp, WeekEventsRsp, WhitelistRsp};
use crate::rest_client::{self, build_client};
use crate::LogResult;

const KEY_HEADER: &str = "x-rapidapi-key";
const HOST_HEADER: &str = "x-rapidapi-host";

pub struct NFLDataClient {
    base_url: String,
    host: String,
    api_key: String,
    season_type: u8,
    event_date_layout: DateLayout,
    client: Client,
}

impl NFLDataClient {
    pub fn new(base_url: &str, host: &str, api_key: &str, timeout: Duration) -> Result<NFLDataClient, FetchError> {
        Ok(NFLDataClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            host: host.to_string(),
            api_key: api_key.to_string(),
            season_type: 2,
            event_date_layout: DateLayout::pattern(crate::date_layout::NFL_EVENT_LAYOUT),
            client: build_client(timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<NFLDataClient, FetchError> {
        Ok(NFLDataClient::new(&config.nfl_url, &config.nfl_host, &config.nfl_api_key, config.timeout())?
            .with_season_type(config.nfl_season_type)
            .with_event_date_layout(config.event_date_layout()))
    }

    /// 1 preseason, 2 regular season, 3 postseason
    pub fn with_season_type(mut self, season_type: u8) -> NFLDataClient {
        self.season_type = season_type;
        self
    }

    pub fn with_event_date_layout(mut self, layout: DateLayout) -> NFLDataClient {
        self.event_date_layout = layout;
        self
    }

    pub async fn fetch_week_for_date(&self, date: DateTime<Utc>) -> Result<i32, FetchError> {
        let url = format!("{}/nfl-whitelist", self.base_url);
        let rsp: WhitelistRsp = self.get(&url).await?;
        let weeks = rsp.weeks()?;
        find_week(&weeks, date)
    }

    pub async fn fetch_games_for_current_week(&self) -> Result<Vec<NFLMatch>, FetchError> {
        let now = Utc::now();
        let week = self.fetch_week_for_date(now).await?;
        log::info!("[NFL] Current week is {week}");
        self.fetch_games_for_week(now.year(), week).await
    }

    /// Events that fail to resolve are logged and left out of the batch.
    pub async fn fetch_games_for_week(&self, year: i32, week: i32) -> Result<Vec<NFLMatch>, FetchError> {
        let url = format!("{}/nfl-weeks-events?year={year}&week={week}&type={}", self.base_url, self.season_type);
        let rsp: WeekEventsRsp = self.get(&url).await?;

        let mut matches = vec![];
        for item in &rsp.items {
            let game = self.fetch_game_details(&item.eventid).await
                .ok_log(&format!("[NFL] Error fetching game details for event {}", item.eventid));
            if let Some(game) = game {
                matches.push(game);
            }
        }
        log::info!("[NFL] Resolved {}/{} events for {year} week {week}", matches.len(), rsp.items.len());
        Ok(matches)
    }

    pub async fn fetch_game_details(&self, event_id: &str) -> Result<NFLMatch, FetchError> {
        let url = format!("{}/nfl-single-events?id={event_id}", self.base_url);
        let rsp: EventRsp = self.get(&url).await?;
        rsp.into_match(&self.event_date_layout)
    }

    pub async fn fetch_nfl_teams(&self) -> Result<Vec<NFLTeam>, FetchError> {
        let url = format!("{}/nfl-teams", self.base_url);
        let rsp: TeamsRsp = self.get(&url).await?;
        Ok(rsp.teams.into_iter().map(NFLTeam::from).collect())
    }

    pub async fn fetch_nfl_team_detail(&self, team_id: &str) -> Result<NFLTeam, FetchError> {
        let url = format!("{}/nfl-team?team_id={team_id}", self.base_url);
        let rsp: TeamRsp = self.get(&url).await?;
        Ok(rsp.into())
    }

    pub async fn fetch_nfl_live_score(&self) -> Result<Vec<NFLMatch>, FetchError> {
        let url = format!("{}/nfl-livescores", self.base_url);
        let rsp: NFLMatchesRsp = self.get(&url).await?;
        Ok(rsp.matches)
    }

    pub async fn fetch_nfl_matches(&self) -> Result<Vec<NFLMatch>, FetchError> {
        let url = format!("{}/nfl-matches", self.base_url);
        let rsp: NFLMatchesRsp = self.get(&url).await?;
        Ok(rsp.matches)
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let request = self.client.get(url)
            .header(KEY_HEADER, &self.api_key)
            .header(HOST_HEADER, &self.host);
        rest_client::get_call(request, url).await
    }
}
