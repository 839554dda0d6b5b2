//! LLM abstraction and the OpenRouter chat-completion client.
//!
//! A [`CompletionProvider`] is one model that can answer a conversation; the gateway
//! tries providers in order.

mod openrouter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use openrouter::{OpenRouterClient, OpenRouterModel};

/// Message author. The gateway only accepts `user` and `assistant` from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message as sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider api error: {0}")]
    Api(String),
    #[error("provider response malformed: {0}")]
    Malformed(String),
    #[error("provider returned empty content")]
    EmptyContent,
    #[error("no provider api key configured")]
    MissingApiKey,
}

/// A single model that produces an assistant reply for a full message list (system prompt included).
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Reported to callers as the reply's `source`.
    fn label(&self) -> &str;

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}
