//! In-memory chat log

use super::{ChatSink, HostError};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: String,
    pub html: String,
}

/// Collects published reports in order
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChatSink for ChatLog {
    fn publish(&self, speaker_id: &str, html: &str) -> Result<(), HostError> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| HostError::Unavailable("chat log"))?;
        messages.push(ChatMessage {
            speaker: speaker_id.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}
