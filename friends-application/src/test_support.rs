// Hand-written fakes for the domain ports

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::DateTime;

use crate::{AppState, Metrics};
use friends_domain::{
    ApiCredentials, ApiError, Badge, Beer, Brewery, ChatReply, ChatTransport, CheckinRecord,
    Drinker, LifetimeTotals, RuntimeConfig, UntappdApi, UserProfile, Venue,
};

// Fri, 30 Mar 2018 19:10:00 +0000
pub const NOW: i64 = 1522437000;

pub fn checkin(id: u64, badge_count: usize) -> CheckinRecord {
    CheckinRecord {
        id,
        user: Drinker {
            display_name: "heath".to_string(),
            username: "heathseals".to_string(),
        },
        beer: Beer {
            name: "Blonde Ale".to_string(),
            style: "Blonde Ale".to_string(),
            abv: 5.0,
            label: None,
        },
        brewery: Brewery {
            name: "Gara Guzu Brewery".to_string(),
        },
        venue: Some(Venue {
            name: "49 Çukurcuma".to_string(),
            icon: None,
        }),
        created_at: DateTime::from_timestamp(NOW - 3600, 0).unwrap_or_default(),
        badges: (0..badge_count)
            .map(|index| Badge {
                name: format!("Badge {} (Level 1)", index),
                icon: format!("https://untappd.akamaized.net/badges/bdg_{}.jpg", index),
            })
            .collect(),
        media_thumbnail: None,
    }
}

pub fn profile(username: &str) -> UserProfile {
    UserProfile {
        display_name: "Stephen".to_string(),
        username: username.to_string(),
        avatar: "https://gravatar.com/avatar/cd8e64b56de7d6c766d895a7b257322d".to_string(),
        joined: DateTime::from_timestamp(NOW, 0).unwrap_or_default(),
        totals: LifetimeTotals {
            beers: 699,
            checkins: 1056,
            badges: 659,
        },
    }
}

#[derive(Clone, Default)]
pub struct FakeUntappd {
    recent: Vec<CheckinRecord>,
    user: Option<(UserProfile, Vec<CheckinRecord>)>,
    failure: Option<ApiError>,
    limits: Arc<Mutex<Vec<usize>>>,
}

impl FakeUntappd {
    pub fn with_recent(recent: Vec<CheckinRecord>) -> Self {
        Self {
            recent,
            ..Self::default()
        }
    }

    pub fn failing(err: ApiError) -> Self {
        Self {
            failure: Some(err),
            ..Self::default()
        }
    }

    pub fn with_user(mut self, profile: UserProfile, checkins: Vec<CheckinRecord>) -> Self {
        self.user = Some((profile, checkins));
        self
    }

    pub fn limits(&self) -> Vec<usize> {
        self.limits.lock().map(|limits| limits.clone()).unwrap_or_default()
    }

    fn check(&self, limit: Option<usize>) -> Result<(), ApiError> {
        if let (Some(limit), Ok(mut limits)) = (limit, self.limits.lock()) {
            limits.push(limit);
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find_user(&self, username: &str) -> Result<&(UserProfile, Vec<CheckinRecord>), ApiError> {
        self.user
            .as_ref()
            .filter(|(profile, _)| profile.username == username)
            .ok_or_else(|| ApiError::NotFound(format!("user {}", username)))
    }
}

#[async_trait]
impl UntappdApi for FakeUntappd {
    async fn recent_checkins(&self, limit: usize) -> Result<Vec<CheckinRecord>, ApiError> {
        self.check(Some(limit))?;
        Ok(self.recent.clone())
    }

    async fn user_info(&self, username: &str) -> Result<UserProfile, ApiError> {
        self.check(None)?;
        self.find_user(username).map(|(profile, _)| profile.clone())
    }

    async fn user_checkins(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, ApiError> {
        self.check(Some(limit))?;
        self.find_user(username)
            .map(|(_, checkins)| checkins.clone())
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    delivered: Mutex<Vec<ChatReply>>,
    broken: bool,
}

impl RecordingTransport {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn delivered(&self) -> Vec<ChatReply> {
        self.delivered
            .lock()
            .map(|replies| replies.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn deliver(&self, reply: &ChatReply) -> anyhow::Result<()> {
        if self.broken {
            return Err(anyhow!("webhook responded 500"));
        }
        self.delivered
            .lock()
            .map_err(|_| anyhow!("transport lock poisoned"))?
            .push(reply.clone());
        Ok(())
    }
}

pub fn test_state(api: FakeUntappd, max_count: usize) -> (AppState, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let config = RuntimeConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        api_base_url: "https://api.untappd.com/v4".to_string(),
        credentials: ApiCredentials::AccessToken("foobar3".to_string()),
        max_count,
        slack_webhook_url: None,
        slack_signing_secret: None,
        api_token: None,
        request_timeout_seconds: 15,
        max_body_bytes: 65536,
    };
    let state = AppState {
        config,
        untappd: Arc::new(api),
        transport: transport.clone(),
        metrics: Arc::new(Metrics::default()),
    };
    (state, transport)
}
