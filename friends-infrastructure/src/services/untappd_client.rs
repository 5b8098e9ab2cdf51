use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::services::untappd_payloads::{decode_checkins, decode_envelope, decode_user};
use friends_domain::ports::UntappdApi;
use friends_domain::{ApiError, CheckinRecord, RuntimeConfig, UserProfile};

const USER_AGENT: &str = concat!("untappd-friends/", env!("CARGO_PKG_VERSION"));

pub struct UntappdClient {
    client: Client,
    base_url: Url,
    credentials: Vec<(&'static str, String)>,
}

impl UntappdClient {
    pub fn new(config: &RuntimeConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_seconds()))
            .user_agent(USER_AGENT)
            .build()?;
        let base_url = Url::parse(&config.api_base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("api_base_url cannot be used as a base: {}", config.api_base_url);
        }
        Ok(Self {
            client,
            base_url,
            credentials: config.credentials.query_pairs(),
        })
    }

    /// Appends percent-encoded path segments to the API base url.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get(&self, url: Url, params: &[(&str, String)]) -> Result<Value, ApiError> {
        debug!("untappd request: path={}", url.path());
        let response = self
            .client
            .get(url)
            .query(params)
            .query(&self.credentials)
            .send()
            .await
            .map_err(|err| ApiError::Unavailable(err.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Unavailable(err.to_string()))?;
        debug!("untappd response: status={}, bytes={}", status, body.len());
        decode_envelope(status.as_u16(), &body)
    }
}

#[async_trait]
impl UntappdApi for UntappdClient {
    async fn recent_checkins(&self, limit: usize) -> Result<Vec<CheckinRecord>, ApiError> {
        let url = self.endpoint(&["checkin", "recent"]);
        let response = self.get(url, &[("limit", limit.to_string())]).await?;
        decode_checkins(response)
    }

    async fn user_info(&self, username: &str) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(&["user", "info", username]);
        let response = self.get(url, &[]).await?;
        decode_user(response, username)
    }

    async fn user_checkins(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<CheckinRecord>, ApiError> {
        let url = self.endpoint(&["user", "checkins", username]);
        let response = self.get(url, &[("limit", limit.to_string())]).await?;
        decode_checkins(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{RawQuery, State};
    use axum::http::{header, HeaderMap, StatusCode, Uri};
    use axum::Router;
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;
    use friends_domain::ApiCredentials;

    #[derive(Clone, Debug, PartialEq)]
    struct Seen {
        path: String,
        query: String,
        user_agent: String,
    }

    type SeenLog = Arc<Mutex<Vec<Seen>>>;

    async fn fake_untappd(
        State(seen): State<SeenLog>,
        uri: Uri,
        RawQuery(query): RawQuery,
        headers: HeaderMap,
    ) -> (StatusCode, String) {
        let path = uri.path().to_string();
        if let Ok(mut log) = seen.lock() {
            log.push(Seen {
                path: path.clone(),
                query: query.unwrap_or_default(),
                user_agent: headers
                    .get(header::USER_AGENT)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        let body = match path.as_str() {
            "/v4/checkin/recent" => json!({
                "meta": {"code": 200},
                "response": {"checkins": {"count": 1, "items": [{
                    "checkin_id": 578981788,
                    "created_at": "Fri, 30 Mar 2018 17:47:53 +0000",
                    "user": {"user_name": "heathseals", "first_name": "heath"},
                    "beer": {"beer_name": "Blonde Ale", "beer_style": "Blonde Ale", "beer_abv": 5},
                    "brewery": {"brewery_name": "Gara Guzu Brewery"},
                    "venue": [],
                    "badges": {"count": 0, "items": []},
                    "media": []
                }]}}
            }),
            "/v4/user/info/nobody" => {
                let body = json!({
                    "meta": {"code": 404, "error_detail": "Invalid user", "error_type": "invalid_param"},
                    "response": []
                });
                return (StatusCode::NOT_FOUND, body.to_string());
            }
            _ => return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded".to_string()),
        };
        (StatusCode::OK, body.to_string())
    }

    async fn serve_fake_untappd() -> (String, SeenLog) {
        let seen = SeenLog::default();
        let app = Router::new()
            .fallback(fake_untappd)
            .with_state(seen.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{}/v4", addr), seen)
    }

    fn seen(log: &SeenLog) -> Vec<Seen> {
        log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    fn config(base: &str) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_base_url: base.to_string(),
            credentials: ApiCredentials::AccessToken("foobar3".to_string()),
            max_count: 2,
            slack_webhook_url: None,
            slack_signing_secret: None,
            api_token: None,
            request_timeout_seconds: 15,
            max_body_bytes: 65536,
        }
    }

    #[test]
    fn endpoints_extend_the_base_path() {
        let client = UntappdClient::new(&config("https://api.untappd.com/v4")).expect("client");
        assert_eq!(
            client.endpoint(&["checkin", "recent"]).as_str(),
            "https://api.untappd.com/v4/checkin/recent"
        );
        assert_eq!(
            client.endpoint(&["user", "info", "stephen yeargin/.."]).as_str(),
            "https://api.untappd.com/v4/user/info/stephen%20yeargin%2F.."
        );
    }

    #[test]
    fn credentials_are_sent_as_query_pairs() {
        let client = UntappdClient::new(&config("https://api.untappd.com/v4/")).expect("client");
        assert_eq!(client.credentials, vec![("access_token", "foobar3".to_string())]);
        assert_eq!(
            client.endpoint(&["user", "checkins", "stephenyeargin"]).as_str(),
            "https://api.untappd.com/v4/user/checkins/stephenyeargin"
        );
    }

    #[tokio::test]
    async fn recent_checkins_sends_limit_and_credentials() {
        let (base, log) = serve_fake_untappd().await;
        let client = UntappdClient::new(&config(&base)).expect("client");

        let records = client.recent_checkins(2).await.expect("recent checkins");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 578981788);
        assert_eq!(records[0].brewery.name, "Gara Guzu Brewery");
        assert!(records[0].venue.is_none());
        assert!(records[0].badges.is_empty());

        assert_eq!(
            seen(&log),
            vec![Seen {
                path: "/v4/checkin/recent".to_string(),
                query: "limit=2&access_token=foobar3".to_string(),
                user_agent: USER_AGENT.to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn client_keys_are_sent_when_there_is_no_token() {
        let (base, log) = serve_fake_untappd().await;
        let mut config = config(&base);
        config.credentials = ApiCredentials::ClientKeys {
            client_id: "foobar1".to_string(),
            client_secret: "foobar2".to_string(),
        };
        let client = UntappdClient::new(&config).expect("client");

        client.recent_checkins(5).await.expect("recent checkins");
        assert_eq!(
            seen(&log)[0].query,
            "limit=5&client_id=foobar1&client_secret=foobar2"
        );
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (base, log) = serve_fake_untappd().await;
        let client = UntappdClient::new(&config(&base)).expect("client");

        let err = client.user_info("nobody").await.expect_err("missing user");
        assert!(matches!(err, ApiError::NotFound(detail) if detail == "Invalid user"));
        assert_eq!(seen(&log)[0].query, "access_token=foobar3");
    }

    #[tokio::test]
    async fn server_errors_are_unavailable() {
        let (base, log) = serve_fake_untappd().await;
        let client = UntappdClient::new(&config(&base)).expect("client");

        let err = client
            .user_checkins("stephenyeargin", 2)
            .await
            .expect_err("server error");
        assert!(matches!(err, ApiError::Unavailable(detail) if detail == "status 500"));
        assert_eq!(seen(&log)[0].path, "/v4/user/checkins/stephenyeargin");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(UntappdClient::new(&config("mailto:beer@example.com")).is_err());
        assert!(UntappdClient::new(&config("not a url")).is_err());
    }
}
