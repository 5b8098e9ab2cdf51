// Runtime configuration shared by every layer

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_base_url: String,
    pub credentials: ApiCredentials,
    pub max_count: usize,
    pub slack_webhook_url: Option<String>,
    pub slack_signing_secret: Option<String>,
    pub api_token: Option<String>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
}

const MIN_UPSTREAM_TIMEOUT_SECONDS: u64 = 3;
// Headroom for signature checks and formatting around the upstream calls.
const HTTP_TIMEOUT_MARGIN_SECONDS: u64 = 5;

impl RuntimeConfig {
    /// Per-request bound on outbound calls to Untappd and Slack.
    pub fn upstream_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds.max(MIN_UPSTREAM_TIMEOUT_SECONDS)
    }

    /// Bound on a whole inbound HTTP request; strictly longer than the
    /// upstream timeout.
    pub fn http_timeout_seconds(&self) -> u64 {
        self.upstream_timeout_seconds()
            .saturating_add(HTTP_TIMEOUT_MARGIN_SECONDS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCredentials {
    AccessToken(String),
    ClientKeys {
        client_id: String,
        client_secret: String,
    },
}

impl ApiCredentials {
    /// Query parameters Untappd expects for this kind of credential.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            ApiCredentials::AccessToken(token) => vec![("access_token", token.clone())],
            ApiCredentials::ClientKeys {
                client_id,
                client_secret,
            } => vec![
                ("client_id", client_id.clone()),
                ("client_secret", client_secret.clone()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(request_timeout_seconds: u64) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_base_url: "https://api.untappd.com/v4".to_string(),
            credentials: ApiCredentials::AccessToken("foobar3".to_string()),
            max_count: 5,
            slack_webhook_url: None,
            slack_signing_secret: None,
            api_token: None,
            request_timeout_seconds,
            max_body_bytes: 65536,
        }
    }

    #[test]
    fn http_timeout_outlasts_upstream_timeout() {
        for seconds in [0, 1, 3, 15, 120, u64::MAX] {
            let config = config(seconds);
            assert!(config.upstream_timeout_seconds() >= 3);
            assert!(
                config.http_timeout_seconds() > config.upstream_timeout_seconds()
                    || config.upstream_timeout_seconds() == u64::MAX
            );
        }
        assert_eq!(config(15).upstream_timeout_seconds(), 15);
        assert_eq!(config(15).http_timeout_seconds(), 20);
    }

    #[test]
    fn client_keys_become_two_query_pairs() {
        let credentials = ApiCredentials::ClientKeys {
            client_id: "foobar1".to_string(),
            client_secret: "foobar2".to_string(),
        };
        assert_eq!(
            credentials.query_pairs(),
            vec![
                ("client_id", "foobar1".to_string()),
                ("client_secret", "foobar2".to_string())
            ]
        );
    }
}
