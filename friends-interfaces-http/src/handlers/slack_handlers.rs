use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use friends_application::commands::dispatch_commands;
use friends_application::AppState;
use friends_domain::ChatReply;

/// Subset of the Slack slash-command form we use.
#[derive(Debug, Deserialize)]
pub struct SlashCommandForm {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

pub async fn slash_command(
    State(state): State<AppState>,
    Form(form): Form<SlashCommandForm>,
) -> Json<Value> {
    info!(
        "slash command received: command={}, user={}",
        form.command.as_deref().unwrap_or("-"),
        form.user_name.as_deref().unwrap_or("-")
    );
    let now = chrono::Utc::now().timestamp();
    let reply = dispatch_commands::dispatch(&state, &form.text, now).await;
    Json(slash_response(&reply))
}

/// Messages are posted to the channel; failures are only shown to the caller.
pub fn slash_response(reply: &ChatReply) -> Value {
    let mut payload = reply.payload();
    let response_type = if reply.is_message() {
        "in_channel"
    } else {
        "ephemeral"
    };
    if let Some(object) = payload.as_object_mut() {
        object.insert("response_type".to_string(), json!(response_type));
    }
    payload
}
