use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_layout::{parse_field, DateLayout, FieldPolicy, WEEK_BOUNDARY_LAYOUT};
use crate::error::FetchError;
use crate::models::{lenient_i32, null_as_default};
use crate::models_api::nfl::{NFLCompetition, NFLCompetitor, NFLMatch, NFLSituation, NFLStatus, NFLStatusType, NFLTeam, NFLType, NFLVenue, NFLVenueAddress, NFLVenueImage};
use crate::LogResult;

/// Index of the regular season weeks in `/nfl-whitelist`.
pub const WEEK_SECTION: usize = 1;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WhitelistRsp {
    #[serde(default)]
    pub sections: Vec<WhitelistSection>,
}

/// Entries differ in shape between sections, they are only typed once a section is picked.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WhitelistSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default)]
    pub entries: Vec<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeekEntry {
    #[serde(deserialize_with = "lenient_i32")]
    pub value: i32,
    pub startDate: String,
    pub endDate: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
}

impl WhitelistRsp {
    pub fn weeks(&self) -> Result<Vec<WeekEntry>, FetchError> {
        let section = self.sections.get(WEEK_SECTION)
            .ok_or_else(|| FetchError::UnexpectedStructure(
                format!("unexpected sections structure, expected at least {} sections got {}", WEEK_SECTION + 1, self.sections.len())))?;

        section.entries.iter()
            .enumerate()
            .map(|(i, entry)| WeekEntry::deserialize(entry)
                .map_err(|e| FetchError::UnexpectedStructure(format!("week entry {i} in section '{}': {e}", section.label))))
            .collect()
    }
}

impl WeekEntry {
    pub fn interval(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), FetchError> {
        let start = WEEK_BOUNDARY_LAYOUT.parse(&self.startDate)?;
        let end = WEEK_BOUNDARY_LAYOUT.parse(&self.endDate)?;
        Ok((start, end))
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> Option<bool> {
        self.interval()
            .ok_log(&format!("[NFL] Skipping week {}", self.value))
            .map(|(start, end)| &start <= date && date < &end)
    }
}

/// First week whose `[startDate, endDate)` contains `date`.
pub fn find_week(weeks: &[WeekEntry], date: DateTime<Utc>) -> Result<i32, FetchError> {
    weeks.iter()
        .find(|e| e.contains(&date).unwrap_or(false))
        .map(|e| e.value)
        .ok_or(FetchError::WeekNotFound(date))
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EventItem {
    #[serde(default)]
    pub eventid: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct WeekEventsRsp {
    #[serde(default)]
    pub items: Vec<EventItem>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LogoRef {
    #[serde(default)]
    pub href: String,
}

/// Logos come either as a plain url or as a list of logo objects.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum LogoField {
    Href(String),
    List(Vec<LogoRef>),
}

impl Default for LogoField {
    fn default() -> Self {
        LogoField::Href("".to_string())
    }
}

impl LogoField {
    pub fn to_href(&self) -> String {
        match self {
            LogoField::Href(href) => href.to_string(),
            LogoField::List(list) => list.first().map(|e| e.href.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TeamRsp {
    pub id: String,
    pub displayName: String,
    #[serde(deserialize_with = "null_as_default")]
    pub logos: LogoField,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct TypeRsp {
    pub id: String,
    pub text: String,
    pub abbreviation: String,
    pub slug: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CompetitorRsp {
    pub id: String,
    pub homeAway: String,
    pub winner: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub team: TeamRsp,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct SituationRsp {
    #[serde(deserialize_with = "lenient_i32")]
    pub down: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub yardLine: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub distance: i32,
    pub isRedZone: bool,
    #[serde(deserialize_with = "lenient_i32")]
    pub homeTimeouts: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub awayTimeouts: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct CompetitionRsp {
    pub id: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub attendance: i32,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub competition_type: TypeRsp,
    pub neutralSite: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub competitors: Vec<CompetitorRsp>,
    #[serde(deserialize_with = "null_as_default")]
    pub situation: SituationRsp,
    pub hasDefensiveStats: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AddressRsp {
    pub city: String,
    pub state: String,
    pub zipCode: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ImageRsp {
    pub href: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub width: i32,
    #[serde(deserialize_with = "lenient_i32")]
    pub height: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub alt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rel: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct VenueRsp {
    pub id: String,
    pub fullName: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: AddressRsp,
    pub grass: bool,
    pub indoor: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<ImageRsp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StatusTypeRsp {
    pub id: String,
    pub name: String,
    pub state: String,
    pub completed: bool,
    pub description: String,
    pub detail: String,
    pub shortDetail: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct StatusRsp {
    #[serde(deserialize_with = "lenient_i32")]
    pub clock: i32,
    pub displayClock: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub period: i32,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub status_type: StatusTypeRsp,
}

/// `/nfl-single-events` payload.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct EventRsp {
    pub id: String,
    pub uid: String,
    pub name: String,
    pub shortName: String,
    pub date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub competitions: Vec<CompetitionRsp>,
    #[serde(deserialize_with = "null_as_default")]
    pub venue: VenueRsp,
    #[serde(deserialize_with = "null_as_default")]
    pub status: StatusRsp,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TeamsRsp {
    #[serde(default)]
    pub teams: Vec<TeamRsp>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct NFLMatchesRsp {
    #[serde(default)]
    pub matches: Vec<NFLMatch>,
}

impl From<TeamRsp> for NFLTeam {
    fn from(value: TeamRsp) -> Self {
        NFLTeam {
            logos: value.logos.to_href(),
            id: value.id,
            displayName: value.displayName,
        }
    }
}

impl From<TypeRsp> for NFLType {
    fn from(value: TypeRsp) -> Self {
        NFLType { id: value.id, text: value.text, abbreviation: value.abbreviation, slug: value.slug }
    }
}

impl From<CompetitorRsp> for NFLCompetitor {
    fn from(value: CompetitorRsp) -> Self {
        NFLCompetitor {
            id: value.id,
            homeAway: value.homeAway,
            winner: value.winner,
            team: value.team.into(),
        }
    }
}

impl From<SituationRsp> for NFLSituation {
    fn from(value: SituationRsp) -> Self {
        NFLSituation {
            down: value.down,
            yardLine: value.yardLine,
            distance: value.distance,
            isRedZone: value.isRedZone,
            homeTimeouts: value.homeTimeouts,
            awayTimeouts: value.awayTimeouts,
        }
    }
}

impl From<CompetitionRsp> for NFLCompetition {
    fn from(value: CompetitionRsp) -> Self {
        NFLCompetition {
            id: value.id,
            attendance: value.attendance,
            competition_type: value.competition_type.into(),
            neutralSite: value.neutralSite,
            competitors: value.competitors.into_iter().map(NFLCompetitor::from).collect(),
            situation: value.situation.into(),
            hasDefensiveStats: value.hasDefensiveStats,
        }
    }
}

impl From<ImageRsp> for NFLVenueImage {
    fn from(value: ImageRsp) -> Self {
        NFLVenueImage { href: value.href, width: value.width, height: value.height, alt: value.alt, rel: value.rel }
    }
}

impl From<VenueRsp> for NFLVenue {
    fn from(value: VenueRsp) -> Self {
        NFLVenue {
            id: value.id,
            fullName: value.fullName,
            address: NFLVenueAddress {
                city: value.address.city,
                state: value.address.state,
                zipCode: value.address.zipCode,
            },
            grass: value.grass,
            indoor: value.indoor,
            images: value.images.into_iter().map(NFLVenueImage::from).collect(),
        }
    }
}

impl From<StatusRsp> for NFLStatus {
    fn from(value: StatusRsp) -> Self {
        let t = value.status_type;
        NFLStatus {
            clock: value.clock,
            displayClock: value.displayClock,
            period: value.period,
            status_type: NFLStatusType {
                id: t.id,
                name: t.name,
                state: t.state,
                completed: t.completed,
                description: t.description,
                detail: t.detail,
                shortDetail: t.shortDetail,
            },
        }
    }
}

impl EventRsp {
    /// The event date is a hard field, an unparsable date rejects the event.
    pub fn into_match(self, date_layout: &DateLayout) -> Result<NFLMatch, FetchError> {
        let date = parse_field(&self.date, date_layout, FieldPolicy::Hard)?;
        Ok(NFLMatch {
            id: self.id,
            uid: self.uid,
            name: self.name,
            shortName: self.shortName,
            date,
            competitions: self.competitions.into_iter().map(NFLCompetition::from).collect(),
            venue: self.venue.into(),
            status: self.status.into(),
        })
    }
}
