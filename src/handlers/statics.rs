use async_trait::async_trait;

use super::{Handler, HandlerError, HandlerRequest, Reply};

/// Fixed-text handler for intents that always answer the same way
/// (greeting, the stop-the-process notice).
pub struct StaticReplyHandler {
    text: &'static str,
}

impl StaticReplyHandler {
    pub fn new(text: &'static str) -> Self {
        Self { text }
    }
}

#[async_trait]
impl Handler for StaticReplyHandler {
    async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
        Ok(Reply::new(self.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConversationContext;

    #[tokio::test]
    async fn test_static_reply_ignores_input() {
        let handler = StaticReplyHandler::new("Hi, how can I help you?");
        let request = HandlerRequest::new(
            "hello there",
            None,
            ConversationContext::new().shared(),
        );
        let reply = handler.execute(&request).await.unwrap();
        assert_eq!(reply.text(), "Hi, how can I help you?");
    }
}
