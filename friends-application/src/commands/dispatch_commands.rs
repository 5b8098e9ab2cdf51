use tracing::{error, info, warn};

use crate::queries::{activity_queries, badge_queries, user_queries};
use crate::{AppError, AppState};
use friends_domain::{ChatCommand, ChatReply};

pub const HELP_TEXT: &str = "untappd - recent activity from your friends\n\
untappd badges - recent badges earned by your friends\n\
untappd user <username> - a user's profile and latest checkins";

/// Runs one chat command. Failures become a single plain-text reply; an
/// attachment message is only produced when the whole command succeeded.
pub async fn dispatch(state: &AppState, text: &str, now: i64) -> ChatReply {
    let command = ChatCommand::parse(text);
    state.metrics.record_command(command.kind());
    info!("dispatching command: kind={}", command.kind());

    let result = match &command {
        ChatCommand::RecentActivity => activity_queries::recent_activity(state, now).await,
        ChatCommand::RecentBadges => badge_queries::recent_badges(state, now).await,
        ChatCommand::UserSummary { username } => {
            user_queries::user_summary(state, username, now).await
        }
        ChatCommand::Help => return ChatReply::Text(HELP_TEXT.to_string()),
        ChatCommand::Unknown(raw) => {
            return ChatReply::Text(format!("Sorry, I don't know how to '{}'.\n{}", raw, HELP_TEXT))
        }
    };

    match result {
        Ok(message) => {
            state.metrics.record_attachments(message.attachments.len());
            ChatReply::Message(message)
        }
        Err(err) => {
            warn!("command failed: kind={}, err={}", command.kind(), err);
            state.metrics.record_command_failure();
            ChatReply::Text(err.reply_text())
        }
    }
}

/// Dispatches and hands the reply to the configured chat transport.
pub async fn dispatch_and_deliver(
    state: &AppState,
    text: &str,
    now: i64,
) -> Result<ChatReply, AppError> {
    let reply = dispatch(state, text, now).await;
    let delivered = state.transport.deliver(&reply).await;
    state.metrics.record_delivery(delivered.is_ok());
    if let Err(err) = delivered {
        error!("chat delivery failed: {}", err);
        return Err(AppError::Internal(err));
    }
    Ok(reply)
}
