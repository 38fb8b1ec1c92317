//! Fire-and-forget program launch and browser open.
//!
//! Launch command lines are injected configuration; nothing here hardcodes a
//! platform-specific program name.

use std::io;
use std::process::{Command, Stdio};

/// Capability interface for spawning external programs.
pub trait LauncherService: Send + Sync {
    /// Spawn a program and return without waiting on it.
    fn launch(&self, command: &[String]) -> io::Result<()>;

    /// Open a URL in the default browser, fire-and-forget.
    fn open_url(&self, url: &str) -> io::Result<()>;
}

/// Production launcher that shells out via `std::process::Command`.
pub struct SystemLauncher {
    /// Command used to hand a URL to the default browser (e.g. `xdg-open`).
    url_opener: Vec<String>,
}

impl SystemLauncher {
    pub fn new(url_opener: Vec<String>) -> Self {
        Self { url_opener }
    }

    fn spawn_detached(argv: &[String]) -> io::Result<()> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty launch command"))?;

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

impl LauncherService for SystemLauncher {
    fn launch(&self, command: &[String]) -> io::Result<()> {
        Self::spawn_detached(command)
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        let mut argv = self.url_opener.clone();
        argv.push(url.to_string());
        Self::spawn_detached(&argv)
    }
}
