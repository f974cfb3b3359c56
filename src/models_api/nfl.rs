use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::date_layout::unparsed_time;
use crate::models::null_as_default;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLTeam {
    pub id: String,
    pub displayName: String,
    pub logos: String,
}

/// Missing fields decode as empty values, `null` lists and objects as empty ones.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NFLMatch {
    pub id: String,
    pub uid: String,
    pub name: String,
    pub shortName: String,
    pub date: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub competitions: Vec<NFLCompetition>,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: NFLVenue,
    #[serde(deserialize_with = "null_as_default")]
    pub status: NFLStatus,
}

impl Default for NFLMatch {
    fn default() -> Self {
        NFLMatch {
            id: String::new(),
            uid: String::new(),
            name: String::new(),
            shortName: String::new(),
            date: unparsed_time(),
            competitions: vec![],
            venue: NFLVenue::default(),
            status: NFLStatus::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLCompetition {
    pub id: String,
    pub attendance: i32,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub competition_type: NFLType,
    pub neutralSite: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub competitors: Vec<NFLCompetitor>,
    #[serde(deserialize_with = "null_as_default")]
    pub situation: NFLSituation,
    pub hasDefensiveStats: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLType {
    pub id: String,
    pub text: String,
    pub abbreviation: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLCompetitor {
    pub id: String,
    pub homeAway: String,
    pub winner: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub team: NFLTeam,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLVenue {
    pub id: String,
    pub fullName: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: NFLVenueAddress,
    pub grass: bool,
    pub indoor: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<NFLVenueImage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLVenueAddress {
    pub city: String,
    pub state: String,
    pub zipCode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLVenueImage {
    pub href: String,
    pub width: i32,
    pub height: i32,
    pub alt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rel: Vec<String>,
}

/// Down and distance snapshot, all zero for games that are not in progress.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLSituation {
    pub down: i32,
    pub yardLine: i32,
    pub distance: i32,
    pub isRedZone: bool,
    pub homeTimeouts: i32,
    pub awayTimeouts: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLStatus {
    pub clock: i32,
    pub displayClock: String,
    pub period: i32,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub status_type: NFLStatusType,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct NFLStatusType {
    pub id: String,
    pub name: String,
    pub state: String,
    pub completed: bool,
    pub description: String,
    pub detail: String,
    pub shortDetail: String,
}

impl std::fmt::Display for NFLMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} [{}] {}", self.id, self.shortName, self.date, self.status.status_type.shortDetail, self.venue.fullName)
    }
}
