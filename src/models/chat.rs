use std::time::Instant;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Locale;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Visitor,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Sender,
    pub content: String,
    pub sent_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    pub locale: Locale,
    pub messages: Vec<ChatMessage>,
    pub last_active: Instant,
}

impl ChatSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: Vec::new(),
            last_active: Instant::now(),
        }
    }
}

/// A message appended to some session, as broadcast to live subscribers.
#[derive(Debug, Clone, Serialize)]
pub struct ChatEvent {
    pub session_id: Uuid,
    pub message: ChatMessage,
}
