use chrono::{Local, NaiveDateTime, Timelike};

/// Timestamp format used in the persisted file and for display.
pub const TIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local wall-clock time, truncated to whole seconds so a value
/// survives a save/load round trip unchanged.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local().with_nanosecond(0).unwrap()
}

pub fn format_stamp(stamp: &NaiveDateTime) -> String {
    stamp.format(TIME_FMT).to_string()
}

/// Serde adapter for `created_at`: a bare `YYYY-MM-DD HH:MM:SS` string.
pub mod stamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FMT;

    pub fn serialize<S>(stamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&stamp.format(TIME_FMT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIME_FMT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `completed_at`: the same string format, or null.
pub mod stamp_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FMT;

    pub fn serialize<S>(stamp: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match stamp {
            Some(t) => serializer.serialize_some(&t.format(TIME_FMT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => NaiveDateTime::parse_from_str(&s, TIME_FMT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
