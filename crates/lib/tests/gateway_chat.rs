//! Integration tests for POST /api/chat against a fake OpenAI-compatible provider.
//!
//! The fake provider answers per model id prefix: `down/` → 503, `slow/` → sleeps past the
//! gateway timeout, `garbled/` → no choices, anything else → `reply from <model>`.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use equied::client::{ChatTransport, ClientError, GatewayClient};
use equied::config::{Config, ModelConfig};
use equied::favorites::FavoritesStore;
use equied::gateway;
use equied::llm::{ChatMessage, Role};
use equied::prompt::{STATIC_FALLBACK_CONTENT, STATIC_FALLBACK_SOURCE};
use equied::session::{ChatSession, Outcome};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "test-key";

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    listener.local_addr().expect("local_addr").port()
}

#[derive(Clone, Default)]
struct Upstream {
    seen: Arc<Mutex<Vec<Value>>>,
}

impl Upstream {
    fn bodies(&self) -> Vec<Value> {
        self.seen.lock().unwrap().clone()
    }
}

async fn completions(
    State(up): State<Upstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    up.seen.lock().unwrap().push(body.clone());
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if auth != format!("Bearer {}", API_KEY) {
        return (StatusCode::UNAUTHORIZED, "bad key").into_response();
    }
    let model = body["model"].as_str().unwrap_or("").to_string();
    if model.starts_with("down/") {
        return (StatusCode::SERVICE_UNAVAILABLE, "overloaded").into_response();
    }
    if model.starts_with("slow/") {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    if model.starts_with("garbled/") {
        return Json(json!({ "choices": [] })).into_response();
    }
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": format!("reply from {}", model) } }]
    }))
    .into_response()
}

async fn start_upstream() -> (Upstream, String) {
    let up = Upstream::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(up.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (up, format!("http://127.0.0.1:{}/v1", port))
}

/// Start upstream + gateway with the given model ids (label = id); returns the gateway base URL.
async fn start(models: &[&str]) -> (Upstream, String) {
    start_with_timeout(models, 500).await
}

async fn start_with_timeout(models: &[&str], request_timeout_ms: u64) -> (Upstream, String) {
    let (up, base_url) = start_upstream().await;
    let port = free_port();
    let mut config = Config::default();
    config.gateway.port = port;
    config.provider.base_url = base_url;
    config.provider.api_key = Some(API_KEY.to_string());
    config.provider.request_timeout_ms = request_timeout_ms;
    config.provider.models = models.iter().map(|m| ModelConfig::new(*m, *m)).collect();
    tokio::spawn(async move {
        let _ = gateway::run_gateway(config).await;
    });

    let url = format!("http://127.0.0.1:{}", port);
    let client = reqwest::Client::new();
    for _ in 0..100 {
        if let Ok(r) = client.get(format!("{}/", url)).send().await {
            if r.status().is_success() {
                return (up, url);
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("gateway at {} did not come up", url);
}

async fn post_chat(url: &str, body: Value) -> (StatusCode, Value) {
    let res = reqwest::Client::new()
        .post(format!("{}/api/chat", url))
        .json(&body)
        .send()
        .await
        .expect("post /api/chat");
    let status = StatusCode::from_u16(res.status().as_u16()).unwrap();
    (status, res.json().await.expect("json body"))
}

fn user(content: &str) -> Value {
    json!({ "messages": [{ "role": "user", "content": content }] })
}

#[tokio::test]
async fn primary_answers_with_system_prompt_first() {
    let (up, url) = start(&["a/primary", "b/secondary"]).await;
    let (status, body) = post_chat(&url, user("What is EDS?")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "a/primary");
    assert_eq!(body["content"], "reply from a/primary");

    let sent = up.bodies();
    assert_eq!(sent.len(), 1);
    let messages = sent[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(messages[0]["content"].as_str().unwrap().starts_with("You are EquiED"));
    assert_eq!(messages[1], json!({ "role": "user", "content": "What is EDS?" }));
    assert_eq!(sent[0]["max_tokens"], 800);
}

#[tokio::test]
async fn failed_primary_falls_back_to_secondary() {
    let (up, url) = start(&["down/primary", "b/secondary"]).await;
    let (status, body) = post_chat(&url, user("hi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "b/secondary");
    let sent = up.bodies();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0]["messages"], sent[1]["messages"]);
}

#[tokio::test]
async fn slow_primary_times_out_to_secondary() {
    let (_up, url) = start(&["slow/primary", "b/secondary"]).await;
    let started = std::time::Instant::now();
    let (_, body) = post_chat(&url, user("hi")).await;
    assert_eq!(body["source"], "b/secondary");
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn both_failing_serve_static_fallback() {
    let (_up, url) = start(&["down/primary", "garbled/secondary"]).await;
    let (status, body) = post_chat(&url, user("hi")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], STATIC_FALLBACK_SOURCE);
    assert_eq!(body["content"], STATIC_FALLBACK_CONTENT);
}

#[tokio::test]
async fn malformed_request_is_500() {
    let (up, url) = start(&["a/primary"]).await;
    let (status, body) = post_chat(&url, json!({ "prompt": "hi" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["source"], "error");
    assert_eq!(body["error"], "Failed to process request");
    assert!(!body["content"].as_str().unwrap().is_empty());
    assert!(up.bodies().is_empty());
}

#[tokio::test]
async fn chat_session_never_forwards_local_messages() {
    let (up, url) = start(&["a/primary"]).await;
    let path = std::env::temp_dir()
        .join(format!("equied-it-{}", uuid::Uuid::new_v4()))
        .join("favorites.json");
    let mut session = ChatSession::new(
        GatewayClient::new(url.clone(), Duration::from_secs(30)),
        FavoritesStore::load(path).await,
        vec!["a/primary".to_string()],
        url,
    );

    assert!(matches!(session.submit("/debug").await, Outcome::Local(_)));
    assert!(matches!(session.submit("/model").await, Outcome::Local(_)));
    let out = session.submit("X").await;
    assert!(matches!(out, Outcome::Reply(ref m) if m.source.as_deref() == Some("a/primary")));
    session.submit("Z").await;

    let sent = up.bodies();
    assert_eq!(sent.len(), 2);
    let last: Vec<(String, String)> = sent[1]["messages"]
        .as_array()
        .unwrap()
        .iter()
        .skip(1)
        .map(|m| {
            (
                m["role"].as_str().unwrap().to_string(),
                m["content"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        last,
        vec![
            ("user".to_string(), "X".to_string()),
            ("assistant".to_string(), "reply from a/primary".to_string()),
            ("user".to_string(), "Z".to_string()),
        ]
    );
    for body in &sent {
        let text = body["messages"].to_string();
        assert!(!text.contains("Debug Information"));
        assert!(!text.contains("Current Model Information"));
        assert!(!text.contains("Sawubona! Molo! Hallo! Hello! Dumela!\\n\\nI'm EquiED"));
    }
}

#[tokio::test]
async fn client_timeout_is_shorter_than_a_slow_gateway() {
    let (_up, url) = start_with_timeout(&["slow/primary"], 10_000).await;
    let client = GatewayClient::new(url.clone(), Duration::from_millis(300));
    let err = client
        .send(vec![ChatMessage::new(Role::User, "hi")])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Timeout), "got {:?}", err);

    let path = std::env::temp_dir()
        .join(format!("equied-it-{}", uuid::Uuid::new_v4()))
        .join("favorites.json");
    let mut session = ChatSession::new(
        client,
        FavoritesStore::load(path).await,
        vec!["slow/primary".to_string()],
        url,
    );
    let out = session.submit("U").await;
    let Outcome::Failed { message, error } = out else {
        panic!("expected a failed request");
    };
    assert_eq!(error, ClientError::Timeout.to_string());
    assert!(message.is_error());
    assert!(session.conversation().has_pending_retry());
    assert_eq!(
        session.conversation().messages().last().map(|m| m.id.as_str()),
        Some(message.id.as_str())
    );
}
