use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::log;

use crate::error::FetchError;

/// Layout used for the start/end of NFL weeks, fractional seconds allowed.
pub const WEEK_BOUNDARY_LAYOUT: DateLayout = DateLayout::Rfc3339;

/// Minute precision with a literal `Z`, e.g. `2024-09-08T17:00Z`.
pub const NFL_EVENT_LAYOUT: &str = "%Y-%m-%dT%H:%MZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLayout {
    Rfc3339,
    /// chrono strftime pattern, interpreted as UTC
    Pattern(String),
    /// chrono strftime pattern carrying its own offset (`%z` and friends)
    ZonedPattern(String),
}

const OFFSET_SPECIFIERS: [&str; 5] = ["%z", "%:z", "%::z", "%:::z", "%#z"];

impl DateLayout {
    pub fn pattern(pattern: &str) -> DateLayout {
        if pattern.eq_ignore_ascii_case("rfc3339") {
            DateLayout::Rfc3339
        } else if OFFSET_SPECIFIERS.iter().any(|e| pattern.contains(e)) {
            DateLayout::ZonedPattern(pattern.to_string())
        } else {
            DateLayout::Pattern(pattern.to_string())
        }
    }

    pub fn parse(&self, value: &str) -> Result<DateTime<Utc>, FetchError> {
        let parsed = match self {
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .map(|e| e.with_timezone(&Utc)),
            DateLayout::Pattern(pattern) => NaiveDateTime::parse_from_str(value, pattern)
                .map(|e| e.and_utc()),
            DateLayout::ZonedPattern(pattern) => DateTime::parse_from_str(value, pattern)
                .map(|e| e.with_timezone(&Utc)),
        };
        parsed.map_err(|_| FetchError::DateParse { value: value.to_string(), layout: self.to_string() })
    }
}

impl Display for DateLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateLayout::Rfc3339 => write!(f, "RFC3339"),
            DateLayout::Pattern(p) | DateLayout::ZonedPattern(p) => write!(f, "{p}"),
        }
    }
}

/// How a record treats a field it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// The whole record is rejected.
    Hard,
    /// The field falls back to `unparsed_time()` and the record is kept.
    Soft,
}

/// `0001-01-01T00:00:00Z`, stored when a soft date field could not be parsed.
pub fn unparsed_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|e| e.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn parse_field(value: &str, layout: &DateLayout, policy: FieldPolicy) -> Result<DateTime<Utc>, FetchError> {
    match (layout.parse(value), policy) {
        (Ok(date), _) => Ok(date),
        (Err(e), FieldPolicy::Hard) => Err(e),
        (Err(e), FieldPolicy::Soft) => {
            log::warn!("[DATE] {e}, using {}", unparsed_time());
            Ok(unparsed_time())
        }
    }
}
