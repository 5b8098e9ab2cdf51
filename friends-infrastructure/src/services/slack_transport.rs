use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use friends_domain::ports::ChatTransport;
use friends_domain::{ChatReply, RuntimeConfig};

/// Posts replies to a Slack incoming webhook.
pub struct SlackWebhookTransport {
    client: Client,
    webhook_url: String,
}

impl SlackWebhookTransport {
    pub fn new(webhook_url: String, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            webhook_url,
        })
    }
}

#[async_trait]
impl ChatTransport for SlackWebhookTransport {
    async fn deliver(&self, reply: &ChatReply) -> Result<()> {
        self.client
            .post(&self.webhook_url)
            .json(&reply.payload())
            .send()
            .await?
            .error_for_status()?;
        debug!("slack webhook delivered: message={}", reply.is_message());
        Ok(())
    }
}

/// Prints replies for running commands without a webhook: the Slack JSON
/// payload by default, or one line of fallback text per attachment.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutTransport {
    plain_text: bool,
}

impl StdoutTransport {
    pub fn plain_text() -> Self {
        Self { plain_text: true }
    }

    pub fn render(&self, reply: &ChatReply) -> Result<String> {
        if self.plain_text {
            return Ok(reply.to_plain_text());
        }
        Ok(serde_json::to_string_pretty(&reply.payload())?)
    }
}

#[async_trait]
impl ChatTransport for StdoutTransport {
    async fn deliver(&self, reply: &ChatReply) -> Result<()> {
        println!("{}", self.render(reply)?);
        Ok(())
    }
}

pub fn build_transport(config: &RuntimeConfig) -> Result<Arc<dyn ChatTransport>> {
    match &config.slack_webhook_url {
        Some(url) => {
            info!("chat transport: slack webhook");
            Ok(Arc::new(SlackWebhookTransport::new(
                url.clone(),
                config.upstream_timeout_seconds(),
            )?))
        }
        None => {
            info!("chat transport: stdout (no slack_webhook_url configured)");
            Ok(Arc::new(StdoutTransport::default()))
        }
    }
}
