use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::utils::error::{AppError, AppResult};

// Accepts a bare date (midnight UTC) or a full RFC 3339 timestamp
pub fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse an optional query string date, reporting the offending parameter.
pub fn parse_query_date(field: &str, raw: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        Some(raw) => parse_date_time(raw)
            .map(Some)
            .ok_or_else(|| AppError::invalid_field(field, "Invalid date format")),
        None => Ok(None),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_time(&raw).ok_or_else(|| serde::de::Error::custom("Invalid date format"))
}

pub mod option {
    use super::parse_date_time;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_date_time(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom("Invalid date format")),
            None => Ok(None),
        }
    }
}
