//! Real command execution implementation.

use crate::error::{Error, Result};
use crate::traits::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::Duration;

/// ETXTBSY error code (errno 26 on Linux).
/// Raised when executing a file that some process still holds open for writing.
const ETXTBSY: i32 = 26;

/// Spawn a command, retrying while the executable is busy (ETXTBSY).
///
/// A script written moments ago can still be open in a sibling process
/// forked in the meantime; the condition clears as soon as that fd closes.
fn spawn_with_etxtbsy_retry<F>(mut spawn_fn: F) -> std::io::Result<Child>
where
    F: FnMut() -> std::io::Result<Child>,
{
    loop {
        match spawn_fn() {
            Ok(child) => return Ok(child),
            Err(e) if e.raw_os_error() == Some(ETXTBSY) => {
                std::thread::sleep(Duration::from_millis(1));
            }
            Err(e) => return Err(e),
        }
    }
}

/// Real command runner that executes programs as blocking subprocesses.
///
/// There is no timeout: a tool that never exits keeps the hook waiting.
#[derive(Debug, Default, Clone)]
pub struct RealCommandRunner {
    working_dir: Option<PathBuf>,
}

impl RealCommandRunner {
    /// Create a runner that executes in the current directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { working_dir: None }
    }

    /// Create a runner that executes every command inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { working_dir: Some(dir.into()) }
    }

    /// The directory commands run in, if not the current one.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }
}

impl CommandRunner for RealCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let spawn_error = |source| Error::Spawn { command: display_command(program, args), source };
        let child = spawn_with_etxtbsy_retry(|| command.spawn()).map_err(spawn_error)?;
        let output = child.wait_with_output()?;

        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        Ok(CommandOutput { exit_code, stdout, stderr })
    }
}

/// Render a program and its arguments the way a user would type them.
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program).chain(args.iter().copied()).collect::<Vec<_>>().join(" ")
}
