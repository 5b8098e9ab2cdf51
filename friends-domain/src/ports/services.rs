use async_trait::async_trait;

use crate::entities::{ChatReply, CheckinRecord, UserProfile};
use crate::error::ApiError;

#[async_trait]
pub trait UntappdApi: Send + Sync {
    async fn recent_checkins(&self, limit: usize) -> Result<Vec<CheckinRecord>, ApiError>;
    async fn user_info(&self, username: &str) -> Result<UserProfile, ApiError>;
    async fn user_checkins(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, ApiError>;
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn deliver(&self, reply: &ChatReply) -> anyhow::Result<()>;
}
