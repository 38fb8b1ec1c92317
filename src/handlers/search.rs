use std::sync::Arc;

use async_trait::async_trait;

use crate::os::LauncherService;

use super::{Handler, HandlerError, HandlerRequest, Reply};

const TRIGGER: &str = "search";
const CLARIFICATION: &str = "What would you like me to search for?";
const SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Derives a query by stripping the trigger keyword, opens a search results
/// page in the default browser, and echoes the query back.
pub struct SearchHandler {
    launcher: Arc<dyn LauncherService>,
}

impl SearchHandler {
    pub fn new(launcher: Arc<dyn LauncherService>) -> Self {
        Self { launcher }
    }
}

fn derive_query(utterance: &str) -> String {
    utterance.replace(TRIGGER, "").trim().to_string()
}

#[async_trait]
impl Handler for SearchHandler {
    async fn execute(&self, request: &HandlerRequest) -> Result<Reply, HandlerError> {
        let query = derive_query(&request.utterance);

        if query.is_empty() {
            // No browser side effect on an empty query
            return Ok(Reply::new(CLARIFICATION));
        }

        let url = format!("{}{}", SEARCH_URL, urlencoding::encode(&query));
        self.launcher.open_url(&url)?;

        Ok(Reply::new(format!("Here are the search results for {query}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConversationContext;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Mutex;

    struct RecordingLauncher {
        opened: Mutex<Vec<String>>,
    }

    impl RecordingLauncher {
        fn new() -> Self {
            Self {
                opened: Mutex::new(Vec::new()),
            }
        }
    }

    impl LauncherService for RecordingLauncher {
        fn launch(&self, _command: &[String]) -> io::Result<()> {
            Ok(())
        }

        fn open_url(&self, url: &str) -> io::Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    fn request(utterance: &str) -> HandlerRequest {
        HandlerRequest::new(utterance, None, ConversationContext::new().shared())
    }

    #[tokio::test]
    async fn test_search_echoes_query_and_opens_browser() {
        let launcher = Arc::new(RecordingLauncher::new());
        let handler = SearchHandler::new(launcher.clone());

        let reply = handler.execute(&request("search cats")).await.unwrap();
        assert_eq!(reply.text(), "Here are the search results for cats");

        let opened = launcher.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0], "https://www.google.com/search?q=cats");
    }

    #[tokio::test]
    async fn test_multi_word_query_is_percent_encoded() {
        let launcher = Arc::new(RecordingLauncher::new());
        let handler = SearchHandler::new(launcher.clone());

        handler
            .execute(&request("search rust borrow checker"))
            .await
            .unwrap();

        let opened = launcher.opened.lock().unwrap();
        assert_eq!(
            opened[0],
            "https://www.google.com/search?q=rust%20borrow%20checker"
        );
    }

    #[tokio::test]
    async fn test_empty_query_asks_for_clarification_without_side_effect() {
        let launcher = Arc::new(RecordingLauncher::new());
        let handler = SearchHandler::new(launcher.clone());

        let reply = handler.execute(&request("search")).await.unwrap();
        assert_eq!(reply.text(), CLARIFICATION);
        assert!(launcher.opened.lock().unwrap().is_empty());
    }

    #[test]
    fn test_derive_query_strips_trigger() {
        assert_eq!(derive_query("search cats"), "cats");
        assert_eq!(derive_query("search "), "");
        assert_eq!(derive_query("search"), "");
    }
}
