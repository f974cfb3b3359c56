use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::date_layout::unparsed_time;
use crate::models::null_as_default;

pub const FOOTBALL_ID_PREFIX: &str = "football-data-";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Match {
    pub id: String,
    pub sport: String,
    pub league: String,
    pub season: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub home_team: Team,
    #[serde(deserialize_with = "null_as_default")]
    pub away_team: Team,
    pub start_time: DateTime<Utc>,
    pub status: String,
    pub matchday: i32,
    pub stage: String,
    pub group: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: Score,
}

impl Default for Match {
    fn default() -> Self {
        Match {
            id: String::new(),
            sport: String::new(),
            league: String::new(),
            season: 0,
            home_team: Team::default(),
            away_team: Team::default(),
            start_time: unparsed_time(),
            status: String::new(),
            matchday: 0,
            stage: String::new(),
            group: String::new(),
            score: Score::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Team {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Score {
    pub winner: String,
    pub duration: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_time: ScoreDetail,
    #[serde(deserialize_with = "null_as_default")]
    pub half_time: ScoreDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ScoreDetail {
    pub home: i32,
    pub away: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Competition {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub competition_type: String,
    pub area: String,
}

impl std::fmt::Display for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} - {} {} ({}-{}) {}",
            self.id, self.league, self.home_team.name, self.away_team.name, self.status,
            self.score.full_time.home, self.score.full_time.away, self.start_time)
    }
}
