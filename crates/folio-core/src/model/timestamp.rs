//! Tolerant `created_at` deserialization.
//!
//! The backend writes timestamps in more than one shape: timezone-aware
//! RFC 3339 strings, naive ISO datetimes straight from `utcnow()`, and
//! bare dates in seeded rows. All three deserialize here, with naive
//! values read as UTC. One row in an unexpected shape must not fail an
//! entire fetched list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Deserializes an optional timestamp, accepting RFC 3339 with an
/// offset, a naive ISO datetime, or a bare date (read as midnight UTC).
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp {raw:?}"))),
    }
}

fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Some(aware.with_timezone(&Utc));
    }
    if let Ok(naive) = raw.parse::<NaiveDateTime>() {
        return Some(naive.and_utc());
    }
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}
