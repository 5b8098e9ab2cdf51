use tracing::error;

use crate::{AppError, AppState};
use friends_domain::{ActivityFormatter, ApiError, ChatMessage};

/// Profile card plus latest checkins. Both lookups run concurrently and
/// nothing is rendered unless both succeed.
pub async fn user_summary(
    state: &AppState,
    username: &str,
    now: i64,
) -> Result<ChatMessage, AppError> {
    let limit = state.config.max_count;
    let (profile, checkins) = tokio::try_join!(
        async {
            state
                .untappd
                .user_info(username)
                .await
                .map_err(|err| map_user_error(err, username))
        },
        async {
            state
                .untappd
                .user_checkins(username, limit)
                .await
                .map_err(|err| map_user_error(err, username))
        },
    )?;

    let attachments = ActivityFormatter::new(now, limit).format_user_summary(&profile, &checkins);
    Ok(ChatMessage::new(attachments))
}

fn map_user_error(err: ApiError, username: &str) -> AppError {
    match err {
        ApiError::NotFound(_) => AppError::UserNotFound(username.to_string()),
        other => {
            error!("failed to fetch user '{}': {}", username, other);
            AppError::from(other)
        }
    }
}
