use serde::{Deserialize, Serialize};

/// Unified LLM request - provider-agnostic
#[derive(Debug, Clone)]
pub struct LLMRequest {
    /// Model identifier (e.g., "gemini-1.5-flash"); empty selects the provider default
    pub model: String,

    /// System prompt (positioned appropriately per provider)
    pub system: Option<String>,

    /// Conversation messages, oldest first
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,

    /// Temperature (0.0-2.0)
    pub temperature: Option<f32>,

    /// Nucleus sampling threshold
    pub top_p: Option<f32>,

    /// Top-k sampling
    pub top_k: Option<u32>,
}

impl Default for LLMRequest {
    fn default() -> Self {
        Self {
            model: String::new(),
            system: None,
            messages: Vec::new(),
            max_tokens: Some(8192),
            temperature: None,
            top_p: None,
            top_k: None,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Complete (non-streaming) LLM response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub id: String,
    pub model: String,
    pub text: String,
    pub stop_reason: StopReason,
    pub usage: Usage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Natural end of response
    EndTurn,
    /// Max tokens reached
    MaxTokens,
    /// Content filtered
    ContentFilter,
}

#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// LLM-specific errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {message}")]
    AuthError { message: String },

    #[error("Rate limited: retry after {retry_after_secs}s")]
    RateLimit { retry_after_secs: u32 },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Provider error: {status} - {message}")]
    ProviderError { status: u16, message: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },
}
