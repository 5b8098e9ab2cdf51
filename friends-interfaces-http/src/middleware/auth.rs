use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use friends_application::AppState;
use friends_domain::RuntimeConfig;

use crate::error::HttpError;

const SIGNATURE_VERSION: &str = "v0";
const MAX_CLOCK_SKEW_SECONDS: u64 = 5 * 60;

type HmacSha256 = Hmac<Sha256>;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    if let Some(api_token) = &config.api_token {
        return extract_bearer(headers)
            .map(|v| v == *api_token)
            .unwrap_or(false);
    }
    true
}

/// Rejects slash-command requests whose Slack signature does not verify.
/// Passes everything through when no signing secret is configured.
pub async fn require_slack_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, HttpError> {
    let Some(secret) = state.config.slack_signing_secret.clone() else {
        return Ok(next.run(request).await);
    };

    let (parts, body) = request.into_parts();
    let limit = usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX);
    let bytes = to_bytes(body, limit)
        .await
        .map_err(|err| HttpError::BadRequest(err.to_string()))?;

    let now = chrono::Utc::now().timestamp();
    if !verify_slack_signature(&secret, &parts.headers, &bytes, now) {
        warn!("rejected slack request with invalid signature");
        return Err(HttpError::Unauthorized);
    }
    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

pub fn verify_slack_signature(secret: &str, headers: &HeaderMap, body: &[u8], now: i64) -> bool {
    let Some(timestamp) = header_str(headers, "X-Slack-Request-Timestamp") else {
        return false;
    };
    let Ok(sent_at) = timestamp.parse::<i64>() else {
        return false;
    };
    match now.checked_sub(sent_at).map(i64::unsigned_abs) {
        Some(skew) if skew <= MAX_CLOCK_SKEW_SECONDS => {}
        _ => return false,
    }
    let Some(signature) = header_str(headers, "X-Slack-Signature")
        .and_then(|value| value.strip_prefix("v0="))
        .and_then(decode_hex)
    else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// `v0=` + hex HMAC-SHA256 of `v0:{timestamp}:{body}`.
#[cfg(test)]
pub(crate) fn sign_slack_request(secret: &str, timestamp: i64, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(format!("{}:{}:", SIGNATURE_VERSION, timestamp).as_bytes());
    mac.update(body);
    let digest = mac.finalize().into_bytes();

    let mut out = String::with_capacity(3 + digest.len() * 2);
    out.push_str(SIGNATURE_VERSION);
    out.push('=');
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    Some(out)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok().map(str::trim)
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    if value.len() % 2 != 0 {
        return None;
    }
    (0..value.len())
        .step_by(2)
        .map(|index| u8::from_str_radix(value.get(index..index + 2)?, 16).ok())
        .collect()
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let prefix = "Bearer ";
    if !value.starts_with(prefix) {
        return None;
    }
    let token = value[prefix.len()..].trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
