//! Chat history and the bounded context window

use super::entities::ChatMessage;
use serde::{Deserialize, Serialize};

/// Number of trailing messages replayed as context for a follow-up question
pub const DEFAULT_HISTORY_WINDOW: usize = 10;

/// Return the last `size` messages (all of them if there are fewer).
///
/// Older messages are dropped silently; overflowing the window is not an error.
pub fn window(messages: &[ChatMessage], size: usize) -> &[ChatMessage] {
    let start = messages.len().saturating_sub(size);
    &messages[start..]
}

/// Flatten messages into `Role: content` lines joined by newlines.
pub fn flatten(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(ChatMessage::as_transcript_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Ordered, append-only transcript of one analysis' follow-up chat.
///
/// Timestamps never go backwards: a message stamped earlier than the last
/// one is re-stamped with the last timestamp on append.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mut message: ChatMessage) {
        if let Some(last) = self.messages.last()
            && message.timestamp < last.timestamp
        {
            message.timestamp = last.timestamp;
        }
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// The last `size` messages
    pub fn window(&self, size: usize) -> &[ChatMessage] {
        window(&self.messages, size)
    }

    /// Flattened transcript of the last `size` messages
    pub fn transcript(&self, size: usize) -> String {
        flatten(self.window(size))
    }
}
