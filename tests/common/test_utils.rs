#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use line_bmi_relay::{
    config::{
        ClassifierConfig, Config, LineConfig, LogsConfig, NonImagePolicy, RelayConfig,
        ServerConfig,
    },
    server,
};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`
use wiremock::{MockServer, Request as RecordedRequest};

pub const TEST_TOKEN: &str = "test-channel-token";
pub const REPLY_PATH: &str = "/v2/bot/message/reply";
pub const PREDICT_PATH: &str = "/predict";

/// Config with every outbound endpoint pointed at `base_url`.
pub fn create_test_config(base_url: &str) -> Config {
    Config {
        line: LineConfig {
            channel_access_token: TEST_TOKEN.to_string(),
            api_base: base_url.to_string(),
            data_api_base: base_url.to_string(),
            reply_timeout_ms: 2_000,
        },
        classifier: ClassifierConfig {
            base_url: base_url.to_string(),
            timeout_ms: 2_000,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 10000,
            service_name: "bmi-relay-test".to_string(),
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        relay: RelayConfig {
            non_image_policy: NonImagePolicy::Ignore,
            image_fetch_timeout_ms: 2_000,
        },
    }
}

pub fn create_test_app(config: &Config) -> Router {
    server::router(server::build_state(config).unwrap())
}

pub async fn post_webhook(app: Router, body: impl Into<Body>) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}

/// Webhook body with a single message event.
pub fn message_event(message_type: &str, message_id: &str, reply_token: &str) -> Value {
    serde_json::json!({
        "destination": "Uabc",
        "events": [{
            "type": "message",
            "replyToken": reply_token,
            "message": { "type": message_type, "id": message_id }
        }]
    })
}

pub async fn requests_to(server: &MockServer, path: &str) -> Vec<RecordedRequest> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == path)
        .collect()
}

/// Polls until `count` requests reached `path`; processing runs detached
/// from the webhook response.
pub async fn wait_for_requests(
    server: &MockServer,
    path: &str,
    count: usize,
) -> Vec<RecordedRequest> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let requests = requests_to(server, path).await;
        if requests.len() >= count || tokio::time::Instant::now() >= deadline {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

pub fn reply_text(request: &RecordedRequest) -> String {
    let body: Value = request.body_json().unwrap();
    body["messages"][0]["text"].as_str().unwrap().to_string()
}
