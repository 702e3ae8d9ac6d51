//! Date coercion for `pubDate` / `updatedDate`

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_yaml::Value;

use super::error::IssueKind;
use super::schema::type_name;

/// Formats accepted for date-time strings without an offset. Interpreted as UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Formats carrying an explicit offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%:z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
];

/// Coerce a front-matter value into a timestamp.
///
/// Strings are parsed and numbers are epoch milliseconds. A local
/// `!timestamp` tag is unwrapped; serde_yaml already resolves the core
/// `!!timestamp` tag to a plain string. Anything else is a type mismatch.
pub fn coerce_date(value: &Value) -> Result<DateTime<Utc>, IssueKind> {
    match value {
        Value::String(s) => parse_date_str(s).ok_or_else(|| IssueKind::DateParseFailure {
            input: s.clone(),
        }),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64));
            millis
                .and_then(DateTime::from_timestamp_millis)
                .ok_or_else(|| IssueKind::DateParseFailure {
                    input: n.to_string(),
                })
        }
        Value::Tagged(tagged) if tagged.tag == "timestamp" => coerce_date(&tagged.value),
        other => Err(IssueKind::TypeMismatch {
            expected: "date",
            found: type_name(other),
        }),
    }
}

/// Parse a date string in various formats
pub fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}
