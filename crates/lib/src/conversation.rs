//! Client-side conversation state.
//!
//! Holds the ordered message history shown to the user, the pending retry after a
//! failed request, and the last model that answered. Locally synthesized messages
//! (command output, welcome, client errors) stay in the history but are never sent
//! to the gateway.

use crate::gateway::ChatReply;
use crate::llm::{ChatMessage, Role};
use crate::prompt::{CLIENT_ERROR_CONTENT, WELCOME_CONTENT};
use serde::{Deserialize, Serialize};

/// Source tag for messages produced on the client (commands, welcome).
pub const LOCAL_SOURCE: &str = "local";

/// Source tag for the apology appended when a request failed.
pub const ERROR_SOURCE: &str = "error";

/// Opaque unique message identifier.
pub type MessageId = String;

fn new_id() -> MessageId {
    uuid::Uuid::new_v4().to_string()
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Which model or path produced it; None for user messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::User,
            content: content.into(),
            source: None,
        }
    }

    pub fn assistant(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role: Role::Assistant,
            content: content.into(),
            source: Some(source.into()),
        }
    }

    pub fn local(content: impl Into<String>) -> Self {
        Self::assistant(content, LOCAL_SOURCE)
    }

    pub fn error() -> Self {
        Self::assistant(CLIENT_ERROR_CONTENT, ERROR_SOURCE)
    }

    pub fn is_local(&self) -> bool {
        self.source.as_deref() == Some(LOCAL_SOURCE)
    }

    pub fn is_error(&self) -> bool {
        self.source.as_deref() == Some(ERROR_SOURCE)
    }

    /// True when the message may be replayed to the model.
    pub fn is_outbound(&self) -> bool {
        !self.is_local() && !self.is_error()
    }

    fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::new(self.role, self.content.clone())
    }
}

fn welcome() -> Message {
    let mut welcome = Message::local(WELCOME_CONTENT);
    welcome.id = "welcome".to_string();
    welcome
}

/// Failed request awaiting retry: the user message that triggered it and the error placeholder.
#[derive(Debug, Clone)]
struct PendingRetry {
    user_id: MessageId,
    error_id: MessageId,
}

/// Ordered conversation plus retry and model-info state.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    pending_retry: Option<PendingRetry>,
    last_source: Option<String>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// New conversation starting with the local welcome message.
    pub fn new() -> Self {
        Self {
            messages: vec![welcome()],
            pending_retry: None,
            last_source: None,
        }
    }

    /// Conversation with no messages at all.
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            pending_retry: None,
            last_source: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// Source of the most recent gateway reply ("last response from").
    pub fn last_source(&self) -> Option<&str> {
        self.last_source.as_deref()
    }

    /// Most recent assistant message that came from the gateway.
    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant && m.is_outbound())
    }

    pub fn has_pending_retry(&self) -> bool {
        self.pending_retry.is_some()
    }

    /// The error placeholder a retry would replace.
    pub fn pending_error(&self) -> Option<&Message> {
        let pending = self.pending_retry.as_ref()?;
        self.get(&pending.error_id)
    }

    /// Drop all messages and retry state, then show the welcome again. Model info is kept.
    pub fn clear(&mut self) {
        self.messages = vec![welcome()];
        self.pending_retry = None;
    }

    /// Append command output. Returns a clone of the stored message.
    pub fn push_local(&mut self, content: impl Into<String>) -> Message {
        let msg = Message::local(content);
        self.messages.push(msg.clone());
        msg
    }

    /// Append the user's message and return the payload for the gateway:
    /// every replayable message so far, ending with this one. Clears any pending retry.
    pub fn push_user(&mut self, content: impl Into<String>) -> (MessageId, Vec<ChatMessage>) {
        self.pending_retry = None;
        let msg = Message::user(content);
        let id = msg.id.clone();
        self.messages.push(msg);
        (id, self.outbound())
    }

    /// Replayable history in order (local and error entries removed).
    pub fn outbound(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|m| m.is_outbound())
            .map(Message::to_chat_message)
            .collect()
    }

    /// Append the gateway's reply.
    pub fn push_reply(&mut self, reply: ChatReply) -> Message {
        let msg = Message::assistant(reply.content, reply.source.clone());
        self.last_source = Some(reply.source);
        self.messages.push(msg.clone());
        msg
    }

    /// Append the error placeholder for a failed request from `user_id` and arm retry.
    pub fn push_error(&mut self, user_id: &str) -> Message {
        let msg = Message::error();
        self.pending_retry = Some(PendingRetry {
            user_id: user_id.to_string(),
            error_id: msg.id.clone(),
        });
        self.messages.push(msg.clone());
        msg
    }

    /// Payload that re-submits the failed user text: replayable history before it, then it.
    /// None when there is nothing to retry.
    pub fn retry_payload(&self) -> Option<Vec<ChatMessage>> {
        let pending = self.pending_retry.as_ref()?;
        let pos = self.messages.iter().position(|m| m.id == pending.user_id)?;
        let mut out: Vec<ChatMessage> = self.messages[..pos]
            .iter()
            .filter(|m| m.is_outbound())
            .map(Message::to_chat_message)
            .collect();
        out.push(self.messages[pos].to_chat_message());
        Some(out)
    }

    /// Replace the error placeholder with the reply, in place. Returns the new message,
    /// or None if no retry was pending.
    pub fn resolve_retry(&mut self, reply: ChatReply) -> Option<Message> {
        let pending = self.pending_retry.take()?;
        let slot = self.messages.iter().position(|m| m.id == pending.error_id)?;
        let msg = Message::assistant(reply.content, reply.source.clone());
        self.last_source = Some(reply.source);
        self.messages[slot] = msg.clone();
        Some(msg)
    }
}
