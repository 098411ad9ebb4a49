//! Lenient date parsing for record payloads
//!
//! Accepted forms: RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` (taken as
//! UTC) and bare `YYYY-MM-DD` (midnight UTC). An empty string means no date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a date field value.
pub fn parse(raw: &str) -> Result<Option<DateTime<Utc>>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(naive.and_utc()));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| format!("invalid date '{raw}', expected RFC 3339 or YYYY-MM-DD"))
}

/// Serde adapter for `Option<DateTime<Utc>>` create fields.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map_err(de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Serde adapter for `Option<Option<DateTime<Utc>>>` patch fields.
///
/// Absent stays `None` (via `#[serde(default)]`); `null` or `""` become
/// `Some(None)`.
pub mod double_option {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(
        value: &Option<Option<DateTime<Utc>>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(Some(dt)) => dt.serialize(serializer),
            Some(None) | None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse(&raw).map(Some).map_err(de::Error::custom),
            None => Ok(Some(None)),
        }
    }
}
