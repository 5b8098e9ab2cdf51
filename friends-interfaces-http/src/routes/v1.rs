use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use friends_application::AppState;

use crate::handlers::{ops_handlers, slack_handlers};
use crate::middleware::require_slack_signature;

pub fn build_router(state: AppState) -> Router {
    let slack = Router::new()
        .route("/v1/slack/commands", post(slack_handlers::slash_command))
        .route_layer(from_fn_with_state(state.clone(), require_slack_signature));

    Router::new()
        .merge(slack)
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::Value;
    use tokio::net::TcpListener;

    use super::*;
    use crate::middleware::auth::sign_slack_request;
    use friends_application::test_support::{checkin, test_state, FakeUntappd};

    const SECRET: &str = "8f742231b10e8888abcd99yyyzzz85a5";
    const FORM: &str = "command=%2Funtappd&text=badges&user_name=heath";

    async fn serve(state: AppState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, build_router(state)).await;
        });
        format!("http://{}", addr)
    }

    fn signed_state() -> AppState {
        let (mut state, _) = test_state(FakeUntappd::with_recent(vec![checkin(1, 2)]), 5);
        state.config.slack_signing_secret = Some(SECRET.to_string());
        state
    }

    async fn post_command(base: &str, timestamp: i64, signature: &str) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/v1/slack/commands", base))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("X-Slack-Request-Timestamp", timestamp.to_string())
            .header("X-Slack-Signature", signature)
            .body(FORM)
            .send()
            .await
            .expect("request")
    }

    #[tokio::test]
    async fn signed_slash_command_is_dispatched() {
        let base = serve(signed_state()).await;
        let now = chrono::Utc::now().timestamp();
        let signature = sign_slack_request(SECRET, now, FORM.as_bytes()).expect("sign");

        let response = post_command(&base, now, &signature).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["response_type"], "in_channel");
        assert_eq!(body["unfurl_links"], false);
        assert_eq!(body["attachments"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn bad_or_stale_signatures_are_unauthorized() {
        let base = serve(signed_state()).await;
        let now = chrono::Utc::now().timestamp();

        let forged = sign_slack_request("other-secret", now, FORM.as_bytes()).expect("sign");
        let response = post_command(&base, now, &forged).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let stale = sign_slack_request(SECRET, now - 600, FORM.as_bytes()).expect("sign");
        let response = post_command(&base, now - 600, &stale).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = reqwest::Client::new()
            .post(format!("{}/v1/slack/commands", base))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(FORM)
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unsigned_commands_pass_without_a_signing_secret() {
        let (state, _) = test_state(FakeUntappd::with_recent(Vec::new()), 5);
        let base = serve(state).await;

        let response = reqwest::Client::new()
            .post(format!("{}/v1/slack/commands", base))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body("text=")
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["response_type"], "ephemeral");
        assert_eq!(body["text"], "No recent activity from your friends.");
    }

    #[tokio::test]
    async fn metrics_require_the_bearer_token() {
        let (mut state, _) = test_state(FakeUntappd::with_recent(Vec::new()), 5);
        state.config.api_token = Some("s3cret".to_string());
        state.metrics.record_command("recent_badges");
        let base = serve(state).await;
        let url = format!("{}/v1/ops/metrics/prometheus", base);
        let client = reqwest::Client::new();

        let response = client.get(&url).send().await.expect("request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = client
            .get(&url)
            .bearer_auth("wrong")
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = client
            .get(&url)
            .bearer_auth("s3cret")
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.text().await.expect("text body");
        assert!(body.contains("untappd_friends_commands_total{kind=\"recent_badges\"} 1"));

        let response = client
            .get(format!("{}/v1/ops/health/live", base))
            .send()
            .await
            .expect("request");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
