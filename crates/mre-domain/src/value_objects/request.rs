//! Request/Response Payload Value Objects

use crate::value_objects::usage::TokenUsage;
use serde::{Deserialize, Serialize};

/// Role in a conversation message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System message (instructions)
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
}

impl MessageRole {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: MessageRole,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Inbound chat/completion payload, as handed over by the API layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Conversation messages, oldest first
    pub messages: Vec<ChatMessage>,
    /// Caller-declared input size, used for context-length filtering
    pub declared_input_tokens: u32,
    /// Optional cap on generated tokens
    pub max_output_tokens: Option<u32>,
    /// Optional sampling temperature
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Create a request with a declared input size
    pub fn new(messages: Vec<ChatMessage>, declared_input_tokens: u32) -> Self {
        Self {
            messages,
            declared_input_tokens,
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Cap the generated token count
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }
}

/// Terminal successful outcome returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Provider that served the request
    pub provider: String,
    /// Model that served the request
    pub model: String,
    /// Token counts reported by the provider
    pub usage: TokenUsage,
    /// End-to-end latency of the winning attempt in milliseconds
    pub latency_ms: u64,
    /// Upstream attempts made before this response, for diagnosability
    pub attempts: u32,
}
