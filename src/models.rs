use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Football,
    Nfl,
}

impl FromStr for Provider {
    type Err = ParseStringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "football" | "football-data" => Ok(Provider::Football),
            "nfl" | "NFL" => Ok(Provider::Nfl),
            _ => Err(ParseStringError)
        }
    }
}

impl Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Football => write!(f, "football-data"),
            Provider::Nfl => write!(f, "nfl"),
        }
    }
}

/// What a run does when the batch could not be handed to the ingestion service.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ForwardFailurePolicy {
    /// Fail the run, the process exits non-zero.
    #[default]
    Exit,
    /// Report the failure and finish the run successfully.
    Log,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseStringError;

impl Display for ParseStringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unrecognized value")
    }
}

impl std::error::Error for ParseStringError {}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StringOrNum {
    Number(i64),
    Float(f64),
    String(String),
}

impl StringOrNum {
    pub fn to_num(&self) -> Option<i64> {
        match self {
            StringOrNum::Number(n) => Some(*n),
            StringOrNum::Float(f) => Some(f.trunc() as i64),
            StringOrNum::String(str) => str.trim().parse::<f64>().ok().map(|f| f.trunc() as i64),
        }
    }
}

/// Decodes `null` the same way as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `900`, `900.0` or `"900"` and truncates to an integer, `null` becomes 0.
pub fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<StringOrNum>::deserialize(deserializer)?;
    match value {
        None => Ok(0),
        Some(v) => v.to_num()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("not an integer: {:?}", v))),
    }
}
