//! Timestamp helpers shared by records.
//!
//! Timestamps are stored as RFC 3339 UTC strings with millisecond precision
//! (`2024-05-01T09:30:00.000Z`).

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Truncates a timestamp to the precision it is stored with.
pub fn to_stored_precision(value: DateTime<Utc>) -> DateTime<Utc> {
    value.trunc_subsecs(3)
}

/// Serde adapter for `DateTime<Utc>` fields.
pub mod rfc3339_millis {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|value| value.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Formats a timestamp the way it is stored.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, to_stored_precision};
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn stored_precision_drops_sub_millisecond_digits() {
        let value = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        let stored = to_stored_precision(value);
        assert_eq!(stored.nanosecond(), 123_000_000);
        assert_eq!(format_timestamp(stored), "2024-05-01T09:30:00.123Z");
    }
}
