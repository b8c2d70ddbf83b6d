//! Aethel API data models
//!
//! Wire payloads for the backend endpoints. Only the request side is typed:
//! the bridge consumes responses as raw status plus body text and never
//! parses a response schema.

use serde::{Deserialize, Serialize};

/// Token cap sent with the startup handshake
pub const HANDSHAKE_MAX_TOKENS: u32 = 64;

/// A chat message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author
    pub role: String,

    /// The content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The messages to send
    pub messages: Vec<ChatMessage>,

    /// Maximum number of tokens the backend may generate
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Build the single-message startup handshake request
    pub fn handshake(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
            max_tokens: HANDSHAKE_MAX_TOKENS,
        }
    }
}

/// Request body for `POST /aethel/generate-unreal-code`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCodeRequest {
    /// The code generation prompt
    pub prompt: String,
}

/// Request body for `POST /aethel/generate-shader`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateShaderRequest {
    /// The shader generation prompt
    pub prompt: String,
}
