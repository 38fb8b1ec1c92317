mod launcher;
mod process;

pub use launcher::{LauncherService, SystemLauncher};
pub use process::{ProcessController, ProcessEntry, ProcfsController};
