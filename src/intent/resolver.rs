//! Matching, dispatch and error containment.
//!
//! `resolve` always terminates with exactly one `ActionResult`, performs at
//! most one handler invocation per call, and never lets a handler fault
//! escape to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::handlers::{Handler, HandlerError, HandlerRequest};
use crate::session::SharedContext;

use super::table::{Intent, PatternTable};

/// The single outcome of a resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// A user-facing text answer (including clarification questions and
    /// answered-negatively cases like "city not found")
    Reply(String),
    /// The chosen handler could not produce an answer
    Failed(Failure),
}

/// Surfaced failure kinds. `NoMatch` never appears here - it routes to the
/// fallback internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// A bound handler errored; surfaced as a generic apology
    Processing,
    /// A network or model transport failure; surfaced as a "try again" message
    UpstreamUnavailable,
}

impl Failure {
    /// Plain-text message shown to the user. Raw errors never surface.
    pub fn user_message(&self) -> &'static str {
        match self {
            Failure::Processing => "An unexpected error occurred while processing your request.",
            Failure::UpstreamUnavailable => {
                "I'm having trouble reaching that service right now. Please try again in a moment."
            }
        }
    }
}

pub struct Resolver {
    table: PatternTable,
    handlers: HashMap<Intent, Arc<dyn Handler>>,
    fallback: Arc<dyn Handler>,
}

impl Resolver {
    pub fn new(table: PatternTable, fallback: Arc<dyn Handler>) -> Self {
        Self {
            table,
            handlers: HashMap::new(),
            fallback,
        }
    }

    pub fn register(&mut self, intent: Intent, handler: Arc<dyn Handler>) {
        self.handlers.insert(intent, handler);
    }

    /// Resolve one already-normalized utterance to exactly one outcome.
    pub async fn resolve(&self, utterance: &str, context: &SharedContext) -> ActionResult {
        match self.table.match_utterance(utterance) {
            Some(rule_match) => {
                debug!(intent = ?rule_match.intent, "pattern rule matched");

                let Some(handler) = self.handlers.get(&rule_match.intent) else {
                    warn!(intent = ?rule_match.intent, "no handler registered for intent");
                    return ActionResult::Failed(Failure::Processing);
                };

                let request =
                    HandlerRequest::new(utterance, rule_match.capture, context.clone());

                match handler.execute(&request).await {
                    Ok(reply) => ActionResult::Reply(reply.0),
                    Err(HandlerError::Upstream(e)) => {
                        warn!(intent = ?rule_match.intent, error = %e, "upstream failure");
                        ActionResult::Failed(Failure::UpstreamUnavailable)
                    }
                    Err(e) => {
                        warn!(intent = ?rule_match.intent, error = %e, "handler failure contained");
                        ActionResult::Failed(Failure::Processing)
                    }
                }
            }
            None => {
                debug!("no rule matched, routing to fallback");
                let request = HandlerRequest::new(utterance, None, context.clone());
                match self.fallback.execute(&request).await {
                    Ok(reply) => ActionResult::Reply(reply.0),
                    Err(e) => {
                        warn!(error = %e, "fallback unavailable");
                        ActionResult::Failed(Failure::UpstreamUnavailable)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::Reply;
    use crate::session::ConversationContext;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHandler {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl CountingHandler {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Handler for CountingHandler {
        async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Reply::new(self.reply))
        }
    }

    struct FailingHandler {
        error: fn() -> HandlerError,
    }

    #[async_trait]
    impl Handler for FailingHandler {
        async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
            Err((self.error)())
        }
    }

    fn io_error() -> HandlerError {
        HandlerError::Io(std::io::Error::other("process table unreadable"))
    }

    fn upstream_error() -> HandlerError {
        HandlerError::Upstream("connection refused".to_string())
    }

    fn context() -> SharedContext {
        ConversationContext::seeded().shared()
    }

    #[tokio::test]
    async fn test_matched_rule_dispatches_to_bound_handler() {
        let greeting = CountingHandler::new("Hi, how can I help you?");
        let fallback = CountingHandler::new("fallback");

        let mut resolver = Resolver::new(PatternTable::default_catalogue(), fallback.clone());
        resolver.register(Intent::Greeting, greeting.clone());

        let result = resolver.resolve("hello there", &context()).await;
        assert_eq!(
            result,
            ActionResult::Reply("Hi, how can I help you?".to_string())
        );
        assert_eq!(greeting.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_handler_fault_is_contained_as_processing_failure() {
        let fallback = CountingHandler::new("fallback");
        let mut resolver = Resolver::new(PatternTable::default_catalogue(), fallback.clone());
        resolver.register(
            Intent::CloseApp(crate::intent::AppTarget::Calculator),
            Arc::new(FailingHandler { error: io_error }),
        );

        let result = resolver.resolve("close calculator", &context()).await;
        assert_eq!(result, ActionResult::Failed(Failure::Processing));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_upstream_fault_surfaces_as_upstream_unavailable() {
        let fallback = CountingHandler::new("fallback");
        let mut resolver = Resolver::new(PatternTable::default_catalogue(), fallback);
        resolver.register(
            Intent::Weather,
            Arc::new(FailingHandler {
                error: upstream_error,
            }),
        );

        let result = resolver.resolve("current weather in paris", &context()).await;
        assert_eq!(result, ActionResult::Failed(Failure::UpstreamUnavailable));
    }

    #[tokio::test]
    async fn test_unmatched_utterance_invokes_fallback_exactly_once() {
        let fallback = CountingHandler::new("model says hi");
        let resolver = Resolver::new(PatternTable::default_catalogue(), fallback.clone());

        let result = resolver.resolve("tell me a joke", &context()).await;
        assert_eq!(result, ActionResult::Reply("model says hi".to_string()));
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_transport_failure_is_upstream_unavailable() {
        let resolver = Resolver::new(
            PatternTable::default_catalogue(),
            Arc::new(FailingHandler {
                error: upstream_error,
            }),
        );

        let result = resolver.resolve("tell me a joke", &context()).await;
        assert_eq!(result, ActionResult::Failed(Failure::UpstreamUnavailable));
    }

    #[tokio::test]
    async fn test_missing_handler_registration_fails_closed() {
        let fallback = CountingHandler::new("fallback");
        let resolver = Resolver::new(PatternTable::default_catalogue(), fallback.clone());

        // "hello" matches but nothing is registered for Greeting
        let result = resolver.resolve("hello", &context()).await;
        assert_eq!(result, ActionResult::Failed(Failure::Processing));
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent_for_fixed_replies() {
        let greeting = CountingHandler::new("Hi, how can I help you?");
        let mut resolver = Resolver::new(
            PatternTable::default_catalogue(),
            CountingHandler::new("fallback"),
        );
        resolver.register(Intent::Greeting, greeting);

        let first = resolver.resolve("hello", &context()).await;
        let second = resolver.resolve("hello", &context()).await;
        assert_eq!(first, second);
    }
}
