use std::env;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use crate::config::validation::{validate_base_url, validate_max_count};
use friends_domain::{ApiCredentials, RuntimeConfig};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    pub max_count: usize,
    pub slack_webhook_url: Option<String>,
    pub slack_signing_secret: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_base_url: "https://api.untappd.com/v4".to_string(),
            api_key: None,
            api_secret: None,
            access_token: None,
            max_count: 5,
            slack_webhook_url: None,
            slack_signing_secret: None,
            api_token: None,
            request_timeout_seconds: 15,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path =
            env::var("UNTAPPD_FRIENDS_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        for value in [
            &mut self.api_key,
            &mut self.api_secret,
            &mut self.access_token,
            &mut self.slack_webhook_url,
            &mut self.slack_signing_secret,
            &mut self.api_token,
        ] {
            if value.as_deref().map(str::trim).is_some_and(str::is_empty) {
                *value = None;
            }
        }
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        validate_base_url(&self.api_base_url)?;
        validate_max_count(self.max_count)?;
        self.credentials()?;
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        Ok(())
    }

    /// An access token wins over the client id / secret pair.
    pub fn credentials(&self) -> Result<ApiCredentials> {
        if let Some(token) = &self.access_token {
            return Ok(ApiCredentials::AccessToken(token.clone()));
        }
        match (&self.api_key, &self.api_secret) {
            (Some(client_id), Some(client_secret)) => Ok(ApiCredentials::ClientKeys {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => Err(anyhow!(
                "untappd credentials missing: set access_token or both api_key and api_secret"
            )),
        }
    }

    pub fn to_runtime_config(&self) -> Result<RuntimeConfig> {
        Ok(RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_base_url: self.api_base_url.clone(),
            credentials: self.credentials()?,
            max_count: self.max_count,
            slack_webhook_url: self.slack_webhook_url.clone(),
            slack_signing_secret: self.slack_signing_secret.clone(),
            api_token: self.api_token.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            max_body_bytes: self.max_body_bytes,
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("UNTAPPD_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Ok(value) = env::var("UNTAPPD_API_KEY") {
            self.api_key = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_API_SECRET") {
            self.api_secret = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_API_ACCESS_TOKEN") {
            self.access_token = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_MAX_COUNT") {
            self.max_count = parse_override("UNTAPPD_MAX_COUNT", &value, self.max_count);
        }
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_SLACK_WEBHOOK_URL") {
            self.slack_webhook_url = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_SLACK_SIGNING_SECRET") {
            self.slack_signing_secret = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = parse_override(
                "UNTAPPD_FRIENDS_REQUEST_TIMEOUT_SECONDS",
                &value,
                self.request_timeout_seconds,
            );
        }
        if let Ok(value) = env::var("UNTAPPD_FRIENDS_MAX_BODY_BYTES") {
            self.max_body_bytes =
                parse_override("UNTAPPD_FRIENDS_MAX_BODY_BYTES", &value, self.max_body_bytes);
        }
    }
}

/// Keeps `current` when the variable does not parse.
fn parse_override<T>(name: &str, value: &str, current: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("ignoring {}={:?}: {}; keeping {}", name, value, err, current);
            current
        }
    }
}
