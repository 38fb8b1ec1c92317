use async_trait::async_trait;

use super::types::{LLMError, LLMRequest, LLMResponse};

/// Unified LLM provider interface
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name (e.g., "google")
    fn name(&self) -> &str;

    /// Default model for this provider
    fn default_model(&self) -> &str;

    /// Send a non-streaming request
    async fn complete(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;
}
