//! Process enumeration and termination behind a capability trait, so the
//! dispatch logic stays testable without touching live processes.

use std::io;

/// A live process, as much of it as the close handlers need.
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    pub pid: i32,
    pub name: String,
}

/// Capability interface over the OS process table.
pub trait ProcessController: Send + Sync {
    /// Enumerate live processes with their names.
    fn list(&self) -> io::Result<Vec<ProcessEntry>>;

    /// Terminate a process by pid (SIGTERM semantics).
    fn terminate(&self, pid: i32) -> io::Result<()>;
}

/// Production controller backed by /proc.
pub struct ProcfsController;

impl ProcessController for ProcfsController {
    fn list(&self) -> io::Result<Vec<ProcessEntry>> {
        let all_procs = procfs::process::all_processes()
            .map_err(|e| io::Error::other(e.to_string()))?;

        let mut entries = Vec::new();
        for process in all_procs.flatten() {
            // Processes that exit mid-scan are skipped, not errors
            if let Ok(stat) = process.stat() {
                entries.push(ProcessEntry {
                    pid: process.pid,
                    name: stat.comm,
                });
            }
        }
        Ok(entries)
    }

    fn terminate(&self, pid: i32) -> io::Result<()> {
        use libc::{kill, SIGTERM};

        let result = unsafe { kill(pid, SIGTERM) };
        if result == 0 {
            Ok(())
        } else {
            Err(io::Error::last_os_error())
        }
    }
}
