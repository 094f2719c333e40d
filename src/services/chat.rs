//! Demo chat transcript — transient, per-session, in-memory only.
//!
//! Messages exist for the lifetime of one demo connection and are
//! discarded when it ends. The log is bounded so a long-lived session
//! cannot grow without limit.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of messages retained per session.
pub const CHAT_LOG_CAP: usize = 200;

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat message in the demo conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl ChatMessage {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        Self { id: Uuid::new_v4(), role, content: content.into(), timestamp }
    }
}

/// Bounded per-session transcript.
#[derive(Clone, Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    /// Append a message, evicting the oldest when the cap is reached.
    pub fn push(&mut self, role: Role, content: impl Into<String>) -> ChatMessage {
        if self.messages.len() >= CHAT_LOG_CAP {
            self.messages.remove(0);
        }
        let message = ChatMessage::new(role, content);
        self.messages.push(message.clone());
        message
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Discard the transcript. Used by the demo reset flow.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
