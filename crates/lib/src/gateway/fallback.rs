//! Ordered model chain: system prompt injection, then each provider in turn, then the static reply.

use crate::config::Config;
use crate::gateway::protocol::ChatReply;
use crate::llm::{ChatMessage, CompletionProvider, OpenRouterClient, Role};
use crate::prompt;
use std::sync::Arc;

/// Providers tried in order; the first success wins. Never fails.
#[derive(Clone)]
pub struct FallbackChain {
    system_prompt: String,
    providers: Vec<Arc<dyn CompletionProvider>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn CompletionProvider>>) -> Self {
        Self {
            system_prompt: prompt::system_prompt().to_string(),
            providers,
        }
    }

    /// Build the OpenRouter chain from `provider.models`.
    pub fn from_config(config: &Config, api_key: Option<String>) -> Self {
        let client = OpenRouterClient::new(&config.provider, api_key);
        let providers = config
            .provider
            .models
            .iter()
            .map(|m| Arc::new(client.model(m)) as Arc<dyn CompletionProvider>)
            .collect();
        Self::new(providers)
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    /// Source labels in try order.
    pub fn labels(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.label().to_string()).collect()
    }

    /// Prepend the system instruction exactly once.
    pub fn provider_messages(&self, conversation: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(ChatMessage::new(Role::System, self.system_prompt.clone()));
        messages.extend(conversation.iter().cloned());
        messages
    }

    pub async fn complete(&self, conversation: &[ChatMessage]) -> ChatReply {
        let messages = self.provider_messages(conversation);
        for provider in &self.providers {
            match provider.complete(&messages).await {
                Ok(content) => {
                    log::info!("chat: reply from {}", provider.label());
                    return ChatReply {
                        content,
                        source: provider.label().to_string(),
                    };
                }
                Err(e) => {
                    log::warn!("chat: model {} failed: {}", provider.label(), e);
                }
            }
        }
        log::warn!("chat: all models failed, serving static fallback");
        ChatReply::static_fallback()
    }
}
