use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

pub fn current_epoch_seconds() -> i64 {
    Utc::now().timestamp()
}

/// Untappd timestamps look like `Fri, 30 Mar 2018 17:47:53 +0000`.
pub fn parse_untappd_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid timestamp '{}': {}", value, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc2822_timestamps() {
        let parsed = parse_untappd_timestamp("Fri, 30 Mar 2018 17:47:53 +0000").expect("parse");
        assert_eq!(parsed.timestamp(), 1522432073);
        assert!(parse_untappd_timestamp("2018-03-30").is_err());
    }
}
