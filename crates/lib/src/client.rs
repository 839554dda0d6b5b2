//! HTTP client for the gateway's `POST /api/chat`.
//!
//! The client's own timeout is independent of (and longer than) the gateway's per-model waits.

use crate::gateway::{ChatReply, ChatRequest};
use crate::llm::ChatMessage;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,
    #[error("gateway request failed: {0}")]
    Request(reqwest::Error),
    #[error("failed to fetch response: {0}")]
    Status(String),
    #[error("no content received from gateway")]
    EmptyContent,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Request(e)
        }
    }
}

/// Sends a conversation and returns the reply. Implemented by [`GatewayClient`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<ChatReply, ClientError>;
}

#[derive(Clone)]
pub struct GatewayClient {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Source recorded when a 200 reply does not say which model produced it.
pub const UNKNOWN_SOURCE: &str = "api";

/// Lenient decode of a 200 body; `source` may be absent.
#[derive(Debug, Deserialize)]
struct ReplyBody {
    #[serde(default)]
    content: String,
    #[serde(default)]
    source: Option<String>,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatTransport for GatewayClient {
    async fn send(&self, messages: Vec<ChatMessage>) -> Result<ChatReply, ClientError> {
        let url = format!("{}/api/chat", self.base_url);
        let res = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&ChatRequest { messages })
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let reason = res
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| status.to_string());
            return Err(ClientError::Status(reason));
        }
        let body: ReplyBody = res.json().await?;
        if body.content.trim().is_empty() {
            return Err(ClientError::EmptyContent);
        }
        Ok(ChatReply {
            content: body.content,
            source: body
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Serve `app` on a free local port; returns its base URL.
    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://127.0.0.1:{}", port)
    }

    fn user() -> Vec<ChatMessage> {
        vec![ChatMessage::new(crate::llm::Role::User, "hi")]
    }

    #[tokio::test]
    async fn missing_source_is_recorded_as_api() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({ "content": "hello" })) }),
        );
        let c = GatewayClient::new(serve(app).await, Duration::from_secs(5));
        let reply = c.send(user()).await.unwrap();
        assert_eq!(reply.content, "hello");
        assert_eq!(reply.source, UNKNOWN_SOURCE);
    }

    #[tokio::test]
    async fn blank_content_is_an_error() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async { Json(json!({ "content": "  ", "source": "a" })) }),
        );
        let c = GatewayClient::new(serve(app).await, Duration::from_secs(5));
        assert!(matches!(c.send(user()).await, Err(ClientError::EmptyContent)));
    }

    #[tokio::test]
    async fn slow_gateway_maps_to_timeout() {
        let app = Router::new().route(
            "/api/chat",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                Json::<Value>(json!({ "content": "late", "source": "a" }))
            }),
        );
        let c = GatewayClient::new(serve(app).await, Duration::from_millis(200));
        let started = std::time::Instant::now();
        let err = c.send(user()).await.unwrap_err();
        assert!(matches!(err, ClientError::Timeout), "got {:?}", err);
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn trims_trailing_slash() {
        let c = GatewayClient::new("http://127.0.0.1:15152/", Duration::from_secs(30));
        assert_eq!(c.base_url(), "http://127.0.0.1:15152");
    }

    #[tokio::test]
    async fn unreachable_gateway_is_an_error() {
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let c = GatewayClient::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(2));
        let err = c.send(Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_) | ClientError::Timeout));
    }
}
