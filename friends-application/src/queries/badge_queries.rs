use tracing::{debug, error};

use crate::{AppError, AppState};
use friends_domain::{ActivityFormatter, ChatMessage};

pub async fn recent_badges(state: &AppState, now: i64) -> Result<ChatMessage, AppError> {
    let limit = state.config.max_count;
    let checkins = state.untappd.recent_checkins(limit).await.map_err(|err| {
        error!("failed to fetch recent checkins for badges: {}", err);
        AppError::from(err)
    })?;
    if checkins.is_empty() {
        return Err(AppError::UpstreamEmpty("recent activity"));
    }

    let attachments = ActivityFormatter::new(now, limit).format_badge_events(&checkins);
    // Checkins without badges contribute nothing; an all-empty page is not an error
    // for the formatter, but there is nothing worth posting.
    if attachments.is_empty() {
        debug!("no badges across {} recent checkins", checkins.len());
        return Err(AppError::UpstreamEmpty("recent badges"));
    }
    Ok(ChatMessage::new(attachments))
}
