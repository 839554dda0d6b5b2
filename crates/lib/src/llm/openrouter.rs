//! OpenRouter client: OpenAI-compatible `/chat/completions`, bearer authenticated.
//!
//! One shot per call. The per-request timeout aborts the underlying request.

use crate::config::{ModelConfig, ProviderConfig};
use crate::llm::{ChatMessage, CompletionProvider, ProviderError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shared HTTP client and request settings for every model on the provider.
#[derive(Clone)]
pub struct OpenRouterClient {
    base_url: String,
    api_key: Option<String>,
    referer: Option<String>,
    title: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenRouterClient {
    pub fn new(provider: &ProviderConfig, api_key: Option<String>) -> Self {
        Self {
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            referer: provider.referer.clone(),
            title: provider.title.clone(),
            temperature: provider.temperature,
            max_tokens: provider.max_tokens,
            timeout: provider.request_timeout(),
            client: reqwest::Client::new(),
        }
    }

    /// Bind this client to one model of the chain.
    pub fn model(&self, model: &ModelConfig) -> OpenRouterModel {
        OpenRouterModel {
            client: self.clone(),
            id: model.id.clone(),
            label: model.label.clone(),
        }
    }

    /// POST /chat/completions, non-streaming. Returns the first choice's content.
    pub async fn chat(&self, model: &str, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        let mut req = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("X-Title", &self.title)
            .timeout(self.timeout)
            .json(&body);
        if let Some(ref referer) = self.referer {
            req = req.header("HTTP-Referer", referer);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Api(format!("{} {}", status, body)));
        }
        let bytes = res.bytes().await?;
        let data: CompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        first_choice_content(data)
    }
}

/// A single model on the provider, usable as one step of the fallback chain.
#[derive(Clone)]
pub struct OpenRouterModel {
    client: OpenRouterClient,
    id: String,
    label: String,
}

impl OpenRouterModel {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterModel {
    fn label(&self) -> &str {
        &self.label
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
        self.client.chat(&self.id, messages).await
    }
}

fn first_choice_content(data: CompletionResponse) -> Result<String, ProviderError> {
    let content = data
        .choices
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .ok_or_else(|| ProviderError::Malformed("response has no choices[0].message".to_string()))?;
    if content.trim().is_empty() {
        return Err(ProviderError::EmptyContent);
    }
    Ok(content)
}

// --- wire types ---

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<CompletionChoice>>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    fn parse(json: &str) -> Result<String, ProviderError> {
        first_choice_content(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn reads_first_choice() {
        let out = parse(r#"{"choices":[{"message":{"role":"assistant","content":"hi"}},{"message":{"content":"no"}}]}"#);
        assert_eq!(out.unwrap(), "hi");
    }

    #[test]
    fn missing_choices_is_malformed() {
        assert!(matches!(parse(r#"{"error":{"code":429}}"#), Err(ProviderError::Malformed(_))));
        assert!(matches!(parse(r#"{"choices":[]}"#), Err(ProviderError::Malformed(_))));
        assert!(matches!(parse(r#"{"choices":[{}]}"#), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn blank_content_is_rejected() {
        assert!(matches!(
            parse(r#"{"choices":[{"message":{"content":"  \n"}}]}"#),
            Err(ProviderError::EmptyContent)
        ));
    }

    #[test]
    fn request_body_shape() {
        let messages = vec![ChatMessage::new(Role::System, "s"), ChatMessage::new(Role::User, "u")];
        let body = CompletionRequest {
            model: "m/x",
            messages: &messages,
            temperature: 0.7,
            max_tokens: 800,
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["model"], "m/x");
        assert_eq!(v["max_tokens"], 800);
        assert_eq!(v["messages"][0]["role"], "system");
        assert_eq!(v["messages"][1]["content"], "u");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let provider = ProviderConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            ..ProviderConfig::default()
        };
        let client = OpenRouterClient::new(&provider, None);
        let model = client.model(&provider.models[0]);
        assert_eq!(model.id(), "google/gemini-2.0-flash-exp:free");
        let err = model.complete(&[]).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingApiKey));
    }
}
