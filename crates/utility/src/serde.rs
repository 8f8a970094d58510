/// Fixed text encoding of timestamps in persisted records.
///
/// Values are always written in UTC with nanosecond precision, so
/// `parse(&format(t)) == t` for every `t`. Only the offset of the original
/// value is lost, which does not affect equality of `DateTime`s.
pub mod record_time {
    use chrono::{DateTime, Local, ParseError, Utc};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f%:z";
    const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%:z";

    pub fn format(date: &DateTime<Local>) -> String {
        date.with_timezone(&Utc).format(FORMAT).to_string()
    }

    pub fn parse(text: &str) -> Result<DateTime<Local>, ParseError> {
        DateTime::parse_from_str(text, PARSE_FORMAT)
            .map(|date| date.with_timezone(&Local))
    }
}

/// Deserializers which substitute defaults instead of failing.
pub mod lenient {
    use std::str::FromStr;

    use serde::{de::IgnoredAny, Deserialize, Deserializer};

    /// Accepts a number or a numeric string. Anything else (null, garbage,
    /// objects) yields `T::default()`. Combine with `#[serde(default)]` to also
    /// cover a missing field.
    pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + FromStr + Default,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Number(T),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::<T>::deserialize(deserializer)? {
            Raw::Number(value) => value,
            Raw::Text(text) => text.trim().parse().unwrap_or_default(),
            Raw::Other(_) => T::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use serde::Deserialize;

    use super::*;

    #[test]
    fn record_time_keeps_nanoseconds() {
        let date = Local.timestamp_opt(1_718_000_000, 123_456_789).unwrap();
        let text = record_time::format(&date);
        assert!(text.ends_with("+00:00"));
        assert_eq!(record_time::parse(&text).unwrap(), date);
    }

    #[test]
    fn record_time_rejects_garbage() {
        assert!(record_time::parse("yesterday").is_err());
    }

    #[derive(Deserialize)]
    struct Distance {
        #[serde(default, deserialize_with = "lenient::number")]
        km: f64,
    }

    #[test]
    fn lenient_numbers_default_to_zero() {
        let parse = |json: &str| serde_json::from_str::<Distance>(json).unwrap().km;
        assert_eq!(parse(r#"{"km": 12.5}"#), 12.5);
        assert_eq!(parse(r#"{"km": "48.2"}"#), 48.2);
        assert_eq!(parse(r#"{"km": "n/a"}"#), 0.0);
        assert_eq!(parse(r#"{"km": null}"#), 0.0);
        assert_eq!(parse(r#"{}"#), 0.0);
    }
}
