//! Chat session: one user's conversation driven line by line.
//!
//! Routes each input either to a local command or to the gateway, records the
//! outcome in the [`Conversation`], and owns favorites.

use crate::calculator;
use crate::client::ChatTransport;
use crate::commands::{self, Command, StatusInfo};
use crate::conversation::{Conversation, Message};
use crate::favorites::{Favorite, FavoritesStore};
use crate::llm::ChatMessage;
use crate::share;

/// Result of handling one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank input.
    Ignored,
    /// A local (never replayed) message was appended.
    Local(Message),
    /// The conversation was reset to the welcome message.
    Cleared,
    Favorites(Vec<Favorite>),
    /// The gateway answered; the reply was appended (or replaced the error on retry).
    Reply(Message),
    /// The request failed; `message` is the error placeholder, retry is armed.
    Failed { message: Message, error: String },
    Favorited { id: String, favorited: bool },
    Share(String),
    /// Informational text that is not part of the conversation.
    Notice(String),
}

pub struct ChatSession<T> {
    conversation: Conversation,
    transport: T,
    favorites: FavoritesStore,
    models: Vec<String>,
    gateway_url: String,
}

impl<T: ChatTransport> ChatSession<T> {
    /// `models` are the configured source labels in chain order (shown by `/model`).
    pub fn new(
        transport: T,
        favorites: FavoritesStore,
        models: Vec<String>,
        gateway_url: impl Into<String>,
    ) -> Self {
        Self {
            conversation: Conversation::new(),
            transport,
            favorites,
            models,
            gateway_url: gateway_url.into(),
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn favorites(&self) -> &[Favorite] {
        self.favorites.list()
    }

    pub async fn submit(&mut self, input: &str) -> Outcome {
        let text = input.trim();
        if text.is_empty() {
            return Outcome::Ignored;
        }
        match Command::parse(text) {
            Some(cmd) => self.run_command(cmd).await,
            None => self.send_user(text).await,
        }
    }

    /// Re-submit the user message whose request failed.
    pub async fn retry(&mut self) -> Outcome {
        let Some(payload) = self.conversation.retry_payload() else {
            return Outcome::Notice("Nothing to retry.".to_string());
        };
        match self.transport.send(payload).await {
            Ok(reply) => match self.conversation.resolve_retry(reply) {
                Some(msg) => Outcome::Reply(msg),
                None => Outcome::Notice("Nothing to retry.".to_string()),
            },
            Err(e) => {
                log::warn!("chat: retry failed: {}", e);
                match self.conversation.pending_error() {
                    Some(m) => Outcome::Failed {
                        message: m.clone(),
                        error: e.to_string(),
                    },
                    None => Outcome::Notice(e.to_string()),
                }
            }
        }
    }

    async fn send_user(&mut self, text: &str) -> Outcome {
        let (user_id, payload) = self.conversation.push_user(text);
        self.dispatch(&user_id, payload).await
    }

    async fn dispatch(&mut self, user_id: &str, payload: Vec<ChatMessage>) -> Outcome {
        match self.transport.send(payload).await {
            Ok(reply) => Outcome::Reply(self.conversation.push_reply(reply)),
            Err(e) => {
                log::warn!("chat: request failed: {}", e);
                Outcome::Failed {
                    message: self.conversation.push_error(user_id),
                    error: e.to_string(),
                }
            }
        }
    }

    fn status(&self) -> StatusInfo<'_> {
        StatusInfo {
            message_count: self.conversation.len(),
            last_source: self.conversation.last_source(),
            models: &self.models,
            gateway_url: &self.gateway_url,
        }
    }

    async fn run_command(&mut self, cmd: Command) -> Outcome {
        match cmd {
            Command::Calculator(args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                let text = match calculator::estimate_from_args(&args) {
                    Ok(e) => e.to_markdown(),
                    Err(e) => format!("**Calculator**\n\n{}", e),
                };
                Outcome::Local(self.conversation.push_local(text))
            }
            Command::Debug => {
                let text = commands::debug_text(&self.status());
                Outcome::Local(self.conversation.push_local(text))
            }
            Command::Model => {
                let text = commands::model_text(&self.status());
                Outcome::Local(self.conversation.push_local(text))
            }
            Command::Help => Outcome::Local(self.conversation.push_local(commands::help_text())),
            Command::Concerns => {
                Outcome::Local(self.conversation.push_local(commands::concerns_text()))
            }
            Command::Favorites => Outcome::Favorites(self.favorites.list().to_vec()),
            Command::Clear => {
                self.conversation.clear();
                Outcome::Cleared
            }
            Command::Retry => self.retry().await,
            Command::FavoriteLast => {
                let Some(last) = self.conversation.last_reply().cloned() else {
                    return Outcome::Notice("No reply to save yet.".to_string());
                };
                match self.favorites.toggle(&last.id, &last.content).await {
                    Ok(favorited) => Outcome::Favorited {
                        id: last.id,
                        favorited,
                    },
                    Err(e) => {
                        log::warn!("favorites: save failed: {}", e);
                        Outcome::Notice(format!("Could not update favorites: {}", e))
                    }
                }
            }
            Command::ShareLast => match self.conversation.last_reply() {
                Some(m) => Outcome::Share(share::tweet_url(&m.content)),
                None => Outcome::Notice("No reply to share yet.".to_string()),
            },
            Command::Fact(fact) => self.send_user(fact.prompt()).await,
            Command::Card(fact) => match fact.card() {
                Some(text) => Outcome::Local(self.conversation.push_local(text)),
                None => Outcome::Notice(format!("No card for {}.", fact.name())),
            },
        }
    }
}
