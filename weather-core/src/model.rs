use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp pattern used by the weatherstack API and by serialized results.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Normalize a requested city into the store lookup key.
///
/// The key is case-folded and trimmed; the display name returned to the
/// caller is never normalized.
pub fn lookup_key(city: &str) -> String {
    city.trim().to_lowercase()
}

/// One persisted weather observation.
///
/// For a given `requested_city_name` at most one record is authoritative:
/// the store upserts by key, so the latest write wins. Records are replaced,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Normalized lookup key the caller asked for, e.g. "amsterdam".
    pub requested_city_name: String,
    /// Display name reported by the provider, e.g. "Amsterdam".
    pub city_name: String,
    pub country: String,
    pub temperature: i32,
    /// Instant the record was fetched, from the injected clock. Drives the
    /// freshness check; not the provider's local time.
    pub updated_time: DateTime<Utc>,
}

/// Transient DTO handed back to callers; derived from a record or a fresh
/// upstream payload, no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city_name: String,
    pub country: String,
    pub temperature: i32,
    #[serde(with = "time_format")]
    pub updated_time: DateTime<Utc>,
}

impl From<&WeatherRecord> for WeatherResult {
    fn from(record: &WeatherRecord) -> Self {
        Self {
            city_name: record.city_name.clone(),
            country: record.country.clone(),
            temperature: record.temperature,
            updated_time: record.updated_time,
        }
    }
}

/// Serde helper for the `yyyy-MM-dd HH:mm` wire format.
pub mod time_format {
    use super::{DateTime, NaiveDateTime, TIME_FORMAT, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&dt.format(TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(de)?;
        NaiveDateTime::parse_from_str(&s, TIME_FORMAT)
            .map(|ndt| ndt.and_utc())
            .map_err(de::Error::custom)
    }
}
