//! Wire types for the OpenAI-compatible `/chat/completions` endpoint.
//!
//! Only the fields Promptdeck reads or writes are modelled; serde ignores
//! the rest of the response body.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// The request body. Single-shot: one user message, no history.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
pub struct Choice {
    pub message: ResponseMessage,
}

/// Assistant message in a response. `content` is nullable in the API
/// (e.g. refusals or tool-only turns).
#[derive(Deserialize, Debug)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Error envelope most OpenAI-compatible servers return on 4xx/5xx.
#[derive(Deserialize, Debug)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}
