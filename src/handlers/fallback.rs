use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::llm::{LLMRequest, Message, Provider};

use super::{Handler, HandlerError, HandlerRequest, Reply};

/// Conversational fallback for utterances no fixed rule recognizes.
///
/// Sends the utterance plus the accumulated dialogue to the LLM and, on
/// success, appends the turn pair to the shared context. Any transport or
/// model failure surfaces as `HandlerError::Upstream`.
pub struct FallbackHandler {
    provider: Arc<dyn Provider>,
    model: String,
    max_reply_words: u32,
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl FallbackHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        max_reply_words: u32,
        temperature: f32,
        top_p: f32,
        top_k: u32,
        max_output_tokens: u32,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            max_reply_words,
            temperature,
            top_p,
            top_k,
            max_output_tokens,
        }
    }

    fn prompt(&self, utterance: &str) -> String {
        format!("Limit to {} words\n{}", self.max_reply_words, utterance)
    }
}

#[async_trait]
impl Handler for FallbackHandler {
    async fn execute(&self, request: &HandlerRequest) -> Result<Reply, HandlerError> {
        let prompt = self.prompt(&request.utterance);

        // Snapshot the history; the lock is not held across the network call
        let mut messages: Vec<Message> = {
            let ctx = request.context.lock().await;
            ctx.turns().to_vec()
        };
        messages.push(Message::user(prompt));

        let llm_request = LLMRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(self.max_output_tokens),
            temperature: Some(self.temperature),
            top_p: Some(self.top_p),
            top_k: Some(self.top_k),
            ..Default::default()
        };

        let response = self
            .provider
            .complete(llm_request)
            .await
            .map_err(|e| HandlerError::Upstream(e.to_string()))?;

        debug!(
            model = %response.model,
            output_tokens = response.usage.output_tokens,
            "fallback completion"
        );

        // The context records the raw utterance, not the word-limit wrapper
        let mut ctx = request.context.lock().await;
        ctx.append_exchange(request.utterance.clone(), response.text.clone());

        Ok(Reply::new(response.text))
    }
}
