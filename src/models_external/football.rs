use serde::{Deserialize, Serialize};

use crate::date_layout::{parse_field, unparsed_time, DateLayout, FieldPolicy};
use crate::models::null_as_default;
use crate::models_api::football::{Competition, Match, Score, ScoreDetail, Team, FOOTBALL_ID_PREFIX};

pub const SPORT: &str = "Soccer";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct IdName {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SeasonRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default)]
pub struct HomeAway {
    #[serde(default, deserialize_with = "null_as_default")]
    pub home: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub away: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScoreRsp {
    #[serde(default, deserialize_with = "null_as_default")]
    pub winner: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fullTime: HomeAway,
    #[serde(default, deserialize_with = "null_as_default")]
    pub halfTime: HomeAway,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FootballMatch {
    pub id: i64,
    #[serde(default)]
    pub competition: IdName,
    #[serde(default)]
    pub season: SeasonRef,
    #[serde(default)]
    pub utcDate: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matchday: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub group: String,
    pub homeTeam: IdName,
    pub awayTeam: IdName,
    #[serde(default)]
    pub score: ScoreRsp,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MatchesRsp {
    #[serde(default)]
    pub matches: Vec<FootballMatch>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct AreaRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FootballCompetition {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub competition_type: String,
    #[serde(default)]
    pub area: AreaRef,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct CompetitionsRsp {
    #[serde(default)]
    pub competitions: Vec<FootballCompetition>,
}

impl From<HomeAway> for ScoreDetail {
    fn from(value: HomeAway) -> Self {
        ScoreDetail { home: value.home, away: value.away }
    }
}

impl From<IdName> for Team {
    fn from(value: IdName) -> Self {
        Team { id: value.id.to_string(), name: value.name }
    }
}

impl From<FootballMatch> for Match {
    fn from(value: FootballMatch) -> Self {
        // an unparsable kickoff keeps the match
        let start_time = parse_field(&value.utcDate, &DateLayout::Rfc3339, FieldPolicy::Soft)
            .unwrap_or_else(|_| unparsed_time());
        Match {
            id: format!("{FOOTBALL_ID_PREFIX}{}", value.id),
            sport: SPORT.to_string(),
            league: value.competition.name,
            season: value.season.id,
            home_team: value.homeTeam.into(),
            away_team: value.awayTeam.into(),
            start_time,
            status: value.status,
            matchday: value.matchday,
            stage: value.stage,
            group: value.group,
            score: Score {
                winner: value.score.winner,
                duration: value.score.duration,
                full_time: value.score.fullTime.into(),
                half_time: value.score.halfTime.into(),
            },
        }
    }
}

impl From<FootballCompetition> for Competition {
    fn from(value: FootballCompetition) -> Self {
        Competition {
            id: value.id.to_string(),
            name: value.name,
            code: value.code,
            competition_type: value.competition_type,
            area: value.area.name,
        }
    }
}
