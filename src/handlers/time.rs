use async_trait::async_trait;
use chrono::Local;

use super::{Handler, HandlerError, HandlerRequest, Reply};

/// Answers with the current local time. Never fails.
pub struct TimeHandler;

#[async_trait]
impl Handler for TimeHandler {
    async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
        let now = Local::now().format("%H:%M:%S");
        Ok(Reply::new(format!("The current time is {now}")))
    }
}
