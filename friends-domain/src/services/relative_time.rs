use crate::utils::{epoch_to_utc, format_calendar_date};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Human relative time of `past_epoch` as seen at `now_epoch`, both in
/// seconds. Anything a day or older is rendered as a UTC calendar date.
pub fn relative_time(past_epoch: i64, now_epoch: i64) -> String {
    let delta = now_epoch.saturating_sub(past_epoch).max(0);
    if delta < MINUTE {
        return "a few seconds ago".to_string();
    }
    if delta < HOUR {
        return match delta / MINUTE {
            1 => "a minute ago".to_string(),
            minutes => format!("{} minutes ago", minutes),
        };
    }
    if delta < DAY {
        return match delta / HOUR {
            1 => "an hour ago".to_string(),
            hours => format!("{} hours ago", hours),
        };
    }
    format_calendar_date(&epoch_to_utc(past_epoch))
}
