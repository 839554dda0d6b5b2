//! Gateway HTTP wire types for `POST /api/chat`.

use crate::llm::{ChatMessage, Role};
use crate::prompt::{REQUEST_ERROR_CONTENT, STATIC_FALLBACK_CONTENT, STATIC_FALLBACK_SOURCE};
use serde::{Deserialize, Serialize};

/// Inbound body: `{ "messages": [{ "role", "content" }] }`. Extra per-message fields (id, source) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

/// Successful reply: `{ "content", "source" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    pub source: String,
}

impl ChatReply {
    pub fn static_fallback() -> Self {
        Self {
            content: STATIC_FALLBACK_CONTENT.to_string(),
            source: STATIC_FALLBACK_SOURCE.to_string(),
        }
    }
}

/// 500 body for requests that could not be parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatErrorReply {
    pub error: String,
    pub details: String,
    pub content: String,
    pub source: String,
}

impl ChatErrorReply {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            error: "Failed to process request".to_string(),
            details: details.into(),
            content: REQUEST_ERROR_CONTENT.to_string(),
            source: "error".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InboundError {
    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("message {index} has role \"system\"; only user and assistant are accepted")]
    SystemRole { index: usize },
}

/// Parse and validate an inbound body.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, InboundError> {
    let req: ChatRequest = serde_json::from_slice(body)?;
    if let Some(index) = req.messages.iter().position(|m| m.role == Role::System) {
        return Err(InboundError::SystemRole { index });
    }
    Ok(req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_client_side_fields() {
        let req = parse_chat_request(
            br#"{"messages":[{"id":"1","role":"user","content":"X"},{"id":"2","role":"assistant","content":"Y","source":"llama-4-maverick:free"}]}"#,
        )
        .unwrap();
        assert_eq!(
            req.messages,
            vec![
                ChatMessage::new(Role::User, "X"),
                ChatMessage::new(Role::Assistant, "Y")
            ]
        );
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert!(matches!(parse_chat_request(b"not json"), Err(InboundError::Body(_))));
        assert!(matches!(parse_chat_request(b"{}"), Err(InboundError::Body(_))));
        assert!(matches!(
            parse_chat_request(br#"{"messages":[{"role":"tool","content":"x"}]}"#),
            Err(InboundError::Body(_))
        ));
    }

    #[test]
    fn rejects_caller_system_message() {
        let err = parse_chat_request(
            br#"{"messages":[{"role":"user","content":"a"},{"role":"system","content":"b"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, InboundError::SystemRole { index: 1 }));
    }

    #[test]
    fn empty_conversation_is_accepted() {
        assert!(parse_chat_request(br#"{"messages":[]}"#).unwrap().messages.is_empty());
    }

    #[test]
    fn error_reply_shape() {
        let v = serde_json::to_value(ChatErrorReply::new("boom")).unwrap();
        assert_eq!(v["source"], "error");
        assert_eq!(v["details"], "boom");
        assert_eq!(v["error"], "Failed to process request");
        assert_eq!(v["content"], REQUEST_ERROR_CONTENT);
    }
}
