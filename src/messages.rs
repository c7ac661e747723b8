//! Chat transcript parsing
//!
//! Accepts the message list a chat UI posts: either a bare JSON array of
//! `{ role, content }` objects or an object wrapping it in `messages`.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker role ("user", "assistant", "system")
    pub role: String,
    /// Message text, absent for non-text messages
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Transcript {
    List(Vec<ChatMessage>),
    Wrapped { messages: Vec<ChatMessage> },
}

/// Parse a JSON transcript into messages.
pub fn parse_transcript(json: &str) -> Result<Vec<ChatMessage>> {
    let transcript: Transcript = serde_json::from_str(json)?;
    Ok(match transcript {
        Transcript::List(messages) => messages,
        Transcript::Wrapped { messages } => messages,
    })
}

/// Message contents in order, skipping missing or empty ones.
pub fn message_texts(messages: &[ChatMessage]) -> impl Iterator<Item = &str> {
    messages
        .iter()
        .filter_map(|m| m.content.as_deref())
        .filter(|c| !c.is_empty())
}
