//! Action handlers bound to intents.
//!
//! Every handler is polymorphic over `execute(request) -> Reply | error`.
//! Errors never reach the caller directly; the resolver contains them and
//! converts them into a failure outcome.

mod apps;
mod fallback;
mod search;
mod statics;
mod time;
mod weather;

pub use apps::{CloseAppHandler, OpenAppHandler};
pub use fallback::FallbackHandler;
pub use search::SearchHandler;
pub use statics::StaticReplyHandler;
pub use time::TimeHandler;
pub use weather::WeatherHandler;

use async_trait::async_trait;
use thiserror::Error;

use crate::session::SharedContext;

/// A successful, user-facing text answer. Clarification questions ("please
/// specify a city") are replies, not failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply(pub String);

impl Reply {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

/// Handler-level failures, contained at the resolver boundary.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Network/model transport failure talking to an upstream service
    #[error("upstream unavailable: {0}")]
    Upstream(String),

    /// Upstream answered but the payload could not be interpreted
    #[error("malformed upstream payload: {0}")]
    Malformed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Input to a handler invocation. The capture is whatever the matched rule
/// extracted (e.g. a city name), passed through opaquely.
pub struct HandlerRequest {
    pub utterance: String,
    pub capture: Option<String>,
    pub context: SharedContext,
}

impl HandlerRequest {
    pub fn new(utterance: impl Into<String>, capture: Option<String>, context: SharedContext) -> Self {
        Self {
            utterance: utterance.into(),
            capture,
            context,
        }
    }
}

/// Unit of work for a matched intent.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn execute(&self, request: &HandlerRequest) -> Result<Reply, HandlerError>;
}
