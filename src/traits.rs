//! Core traits for testability and abstraction.

use crate::error::Result;

/// Output from a command execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// The exit code of the command.
    pub exit_code: i32,
    /// The stdout output.
    pub stdout: String,
    /// The stderr output.
    pub stderr: String,
}

impl CommandOutput {
    /// Create an output with the given exit code and stdout.
    #[must_use]
    pub fn new(exit_code: i32, stdout: impl Into<String>) -> Self {
        Self { exit_code, stdout: stdout.into(), stderr: String::new() }
    }

    /// Check if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined stdout and stderr.
    #[must_use]
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Trait for running external programs.
///
/// Git queries and the detected lint/test tools all go through this trait
/// so the hooks can be exercised without touching a real repository.
pub trait CommandRunner {
    /// Run `program` with `args` to completion and capture its output.
    ///
    /// A non-zero exit is not an error; it is reported in
    /// [`CommandOutput::exit_code`].
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned (for example when
    /// it is not installed).
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}
