use chrono::{DateTime, Utc};

/// `Mar 30, 2018`
pub fn format_calendar_date(value: &DateTime<Utc>) -> String {
    value.format("%b %-d, %Y").to_string()
}

pub fn epoch_to_utc(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}
