//! JSON representation of a stored user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user as returned by `GET /api/users` and `GET /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResource {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    #[serde(with = "timestamp")]
    pub creation_date: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub update_date: DateTime<Utc>,
}

/// ISO-8601 timestamps with a numeric offset and second precision,
/// e.g. `2024-05-01T10:00:00+00:00`.
pub mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
