use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::os::{LauncherService, ProcessController};

use super::{Handler, HandlerError, HandlerRequest, Reply};

/// Launches an application, fire-and-forget: the reply claims success
/// whether or not the spawn actually worked (no verification).
pub struct OpenAppHandler {
    label: String,
    command: Vec<String>,
    launcher: Arc<dyn LauncherService>,
}

impl OpenAppHandler {
    pub fn new(
        label: impl Into<String>,
        command: Vec<String>,
        launcher: Arc<dyn LauncherService>,
    ) -> Self {
        Self {
            label: label.into(),
            command,
            launcher,
        }
    }
}

#[async_trait]
impl Handler for OpenAppHandler {
    async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
        if let Err(e) = self.launcher.launch(&self.command) {
            warn!(app = %self.label, error = %e, "launch failed");
        }
        Ok(Reply::new(format!("Opening {}.", self.label)))
    }
}

/// Terminates the first live process whose name contains the needle,
/// case-insensitively. "Not running" is a reply, not a failure.
pub struct CloseAppHandler {
    label: String,
    needle: String,
    controller: Arc<dyn ProcessController>,
}

impl CloseAppHandler {
    pub fn new(
        label: impl Into<String>,
        needle: impl Into<String>,
        controller: Arc<dyn ProcessController>,
    ) -> Self {
        let needle = needle.into();
        Self {
            label: label.into(),
            needle: needle.to_lowercase(),
            controller,
        }
    }
}

#[async_trait]
impl Handler for CloseAppHandler {
    async fn execute(&self, _request: &HandlerRequest) -> Result<Reply, HandlerError> {
        let processes = self.controller.list()?;

        let target = processes
            .iter()
            .find(|p| p.name.to_lowercase().contains(&self.needle));

        match target {
            Some(proc) => {
                self.controller.terminate(proc.pid)?;
                Ok(Reply::new(format!("{} closed.", self.label)))
            }
            None => Ok(Reply::new(format!("{} is not running.", self.label))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::os::ProcessEntry;
    use crate::session::ConversationContext;
    use pretty_assertions::assert_eq;
    use std::io;
    use std::sync::Mutex;

    struct FakeLauncher {
        launched: Mutex<Vec<Vec<String>>>,
        fail: bool,
    }

    impl FakeLauncher {
        fn new(fail: bool) -> Self {
            Self {
                launched: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    impl LauncherService for FakeLauncher {
        fn launch(&self, command: &[String]) -> io::Result<()> {
            self.launched.lock().unwrap().push(command.to_vec());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such program"))
            } else {
                Ok(())
            }
        }

        fn open_url(&self, _url: &str) -> io::Result<()> {
            Ok(())
        }
    }

    struct FakeProcesses {
        entries: Vec<ProcessEntry>,
        killed: Mutex<Vec<i32>>,
    }

    impl FakeProcesses {
        fn new(entries: Vec<ProcessEntry>) -> Self {
            Self {
                entries,
                killed: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProcessController for FakeProcesses {
        fn list(&self) -> io::Result<Vec<ProcessEntry>> {
            Ok(self.entries.clone())
        }

        fn terminate(&self, pid: i32) -> io::Result<()> {
            self.killed.lock().unwrap().push(pid);
            Ok(())
        }
    }

    fn request() -> HandlerRequest {
        HandlerRequest::new("close calculator", None, ConversationContext::new().shared())
    }

    #[tokio::test]
    async fn test_open_replies_success_even_when_spawn_fails() {
        let launcher = Arc::new(FakeLauncher::new(true));
        let handler = OpenAppHandler::new(
            "Notepad",
            vec!["notepad".to_string()],
            launcher.clone(),
        );

        let reply = handler.execute(&request()).await.unwrap();
        assert_eq!(reply.text(), "Opening Notepad.");
        assert_eq!(launcher.launched.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_close_kills_first_case_insensitive_match() {
        let controller = Arc::new(FakeProcesses::new(vec![
            ProcessEntry { pid: 10, name: "bash".to_string() },
            ProcessEntry { pid: 42, name: "GNOME-Calculator".to_string() },
            ProcessEntry { pid: 43, name: "calculator-helper".to_string() },
        ]));
        let handler = CloseAppHandler::new("Calculator", "calculator", controller.clone());

        let reply = handler.execute(&request()).await.unwrap();
        assert_eq!(reply.text(), "Calculator closed.");
        assert_eq!(*controller.killed.lock().unwrap(), vec![42]);
    }

    #[tokio::test]
    async fn test_close_reports_not_running_when_nothing_matches() {
        let controller = Arc::new(FakeProcesses::new(vec![ProcessEntry {
            pid: 10,
            name: "bash".to_string(),
        }]));
        let handler = CloseAppHandler::new("Calculator", "calculator", controller.clone());

        let reply = handler.execute(&request()).await.unwrap();
        assert_eq!(reply.text(), "Calculator is not running.");
        assert!(controller.killed.lock().unwrap().is_empty());
    }
}
