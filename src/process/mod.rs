//! Launching discovered applications as detached processes.
//!
//! A launched application must outlive the finder. On Unix the child gets its
//! own session via `setsid()`; on Windows it goes through `cmd /C start`,
//! which also handles file associations and quoting.

use crate::error::ProcessError;
use crate::models::Application;
use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// `DETACHED_PROCESS | CREATE_NO_WINDOW`
#[cfg(windows)]
const DETACHED_FLAGS: u32 = 0x0000_0008 | 0x0800_0000;

/// Builder for a process that survives its parent.
///
/// All stdio is redirected to null.
pub struct DetachedProcess {
    command: Command,
}

impl DetachedProcess {
    /// Create a new detached process builder for the given program.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            command: Command::new(program),
        }
    }

    /// Run `target` through the Windows shell's `start` verb.
    ///
    /// The empty first argument is the window title `start` expects before
    /// a quoted path.
    pub fn shell_start<S: AsRef<OsStr>>(target: S) -> Self {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]).arg(target);
        Self { command }
    }

    /// Add an argument to the process.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.command.arg(arg);
        self
    }

    /// Spawn the detached process.
    pub fn spawn(mut self) -> Result<(), ProcessError> {
        self.command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        self.detach();

        self.command.spawn().map_err(ProcessError::SpawnFailed)?;
        Ok(())
    }

    #[cfg(unix)]
    fn detach(&mut self) {
        use std::os::unix::process::CommandExt;

        // SAFETY: setsid() is async-signal-safe. It moves the child into a new
        // session so it is not killed with the parent's process group.
        unsafe {
            self.command.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }
    }

    #[cfg(windows)]
    fn detach(&mut self) {
        use std::os::windows::process::CommandExt;

        self.command.creation_flags(DETACHED_FLAGS);
    }

    #[cfg(not(any(unix, windows)))]
    fn detach(&mut self) {}
}

/// Launch a discovered application.
pub fn launch(app: &Application) -> Result<(), ProcessError> {
    let exec = app.exec.trim();
    if exec.is_empty() {
        return Err(ProcessError::EmptyCommand);
    }

    tracing::info!(name = %app.name, %exec, "Launching application");

    if cfg!(windows) {
        DetachedProcess::shell_start(exec).spawn()
    } else {
        DetachedProcess::new(exec).spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_empty_exec() {
        let result = launch(&Application::new("Nothing", ""));
        assert!(matches!(result, Err(ProcessError::EmptyCommand)));
    }

    #[test]
    fn test_launch_whitespace_only() {
        let result = launch(&Application::new("Blank", "   "));
        assert!(matches!(result, Err(ProcessError::EmptyCommand)));
    }

    #[test]
    fn test_shell_start_arguments() {
        let process = DetachedProcess::shell_start(r"C:\Program Files\App\app.exe");
        let args: Vec<_> = process.command.get_args().collect();
        assert_eq!(process.command.get_program(), "cmd");
        assert_eq!(args, ["/C", "start", "", r"C:\Program Files\App\app.exe"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_missing_program() {
        let result = DetachedProcess::new("/nonexistent/appfinder-test-binary").spawn();
        assert!(matches!(result, Err(ProcessError::SpawnFailed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_spawn_detached() {
        assert!(DetachedProcess::new("true").arg("ignored").spawn().is_ok());
    }
}
