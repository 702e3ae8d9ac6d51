//! Date helper functions

use chrono::{DateTime, TimeZone};

/// Format a date as `YYYY-MM-DD`, the form used by sitemaps and listings
pub fn date_ymd<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_date_ymd() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
        assert_eq!(date_ymd(&date), "2024-01-05");
    }
}
