mod gemini;
mod provider;
mod types;

pub use gemini::GeminiProvider;
pub use provider::Provider;
pub use types::{LLMError, LLMRequest, LLMResponse, Message, Role, StopReason, Usage};
