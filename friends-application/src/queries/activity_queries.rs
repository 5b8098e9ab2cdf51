use tracing::error;

use crate::{AppError, AppState};
use friends_domain::{ActivityFormatter, ChatMessage};

pub async fn recent_activity(state: &AppState, now: i64) -> Result<ChatMessage, AppError> {
    let limit = state.config.max_count;
    let checkins = state.untappd.recent_checkins(limit).await.map_err(|err| {
        error!("failed to fetch recent checkins: {}", err);
        AppError::from(err)
    })?;
    if checkins.is_empty() {
        return Err(AppError::UpstreamEmpty("recent activity"));
    }

    let attachments = ActivityFormatter::new(now, limit).format_recent_checkins(&checkins);
    Ok(ChatMessage::new(attachments))
}
