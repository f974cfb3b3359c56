use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{football::Match, nfl::NFLMatch};

/// Keys only the football shape carries.
const FOOTBALL_KEYS: [&str; 10] = ["sport", "league", "season", "home_team", "away_team", "start_time", "matchday", "stage", "group", "score"];

/// One element of a forwarded batch, either provider shape.
///
/// Any object decodes: fields are not validated and missing ones stay empty.
/// An object with a football-only key is a `Match`, anything else an `NFLMatch`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum IngestedMatch {
    NFL(NFLMatch),
    Football(Match),
}

impl<'de> Deserialize<'de> for IngestedMatch {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let is_football = value.as_object()
            .map(|o| FOOTBALL_KEYS.iter().any(|k| o.contains_key(*k)))
            .unwrap_or(false);

        if is_football {
            Match::deserialize(value).map(IngestedMatch::Football).map_err(serde::de::Error::custom)
        } else {
            NFLMatch::deserialize(value).map(IngestedMatch::NFL).map_err(serde::de::Error::custom)
        }
    }
}

impl IngestedMatch {
    pub fn id(&self) -> &str {
        match self {
            IngestedMatch::NFL(m) => &m.id,
            IngestedMatch::Football(m) => &m.id,
        }
    }
}

impl Display for IngestedMatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestedMatch::NFL(m) => write!(f, "{m}"),
            IngestedMatch::Football(m) => write!(f, "{m}"),
        }
    }
}

impl From<Match> for IngestedMatch {
    fn from(value: Match) -> Self {
        IngestedMatch::Football(value)
    }
}

impl From<NFLMatch> for IngestedMatch {
    fn from(value: NFLMatch) -> Self {
        IngestedMatch::NFL(value)
    }
}
