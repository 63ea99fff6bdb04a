//! Command-line interface for verify-hooks.
//!
//! Hook subcommands are invoked by the agent runtime and print exactly one
//! JSON decision on stdout. Utility subcommands are for humans and print
//! to stderr.

mod run;


pub use run::{run, run_in, CliOutput};

use clap::{Parser, Subcommand};

/// Lifecycle hooks that check tests ran, tests pass, and `main` stays clean.
#[derive(Parser, Debug)]
#[command(name = "verify-hooks")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Hook Commands ===
    /// Session-stop hook: block finishing until tests have run and pass.
    ///
    /// The transcript comes from `--transcript` / `CLAUDE_TRANSCRIPT`, or
    /// from the file named by `transcript_path` in the JSON payload on stdin.
    #[command(name = "completion-check")]
    CompletionCheck {
        /// Full session transcript text.
        #[arg(long, env = "CLAUDE_TRANSCRIPT", hide_env_values = true)]
        transcript: Option<String>,
    },

    /// Post-edit hook: remind which test command covers the edited file.
    ///
    /// The path comes from `--file` / `CLAUDE_FILE_PATH`, or from
    /// `tool_input.file_path` in the JSON payload on stdin.
    #[command(name = "post-edit")]
    PostEdit {
        /// Path of the file that was just edited.
        #[arg(long = "file", env = "CLAUDE_FILE_PATH")]
        file_path: Option<String>,
    },

    /// Pre-commit hook: enforce branch policy, then run lint and tests.
    #[command(name = "pre-commit")]
    PreCommit,

    // === Utility Commands ===
    /// Show the linter and test runner the pre-commit hook would use.
    Detect,

    /// Ensure the config file exists (create with defaults if not).
    #[command(name = "ensure-config")]
    EnsureConfig,

    /// Show version information.
    Version,
}

impl Command {
    /// Returns true if this command should read the host's JSON payload.
    ///
    /// Only hooks whose input was not supplied (or supplied empty) by flag
    /// or environment do.
    #[must_use]
    pub fn needs_stdin(&self) -> bool {
        match self {
            Self::CompletionCheck { transcript: value } | Self::PostEdit { file_path: value } => {
                value.as_deref().map_or(true, str::is_empty)
            }
            Self::PreCommit | Self::Detect | Self::EnsureConfig | Self::Version => false,
        }
    }

    /// Returns the hook type name for logging, or None for non-hook commands.
    #[must_use]
    pub const fn hook_type(&self) -> Option<&'static str> {
        match self {
            Self::CompletionCheck { .. } => Some("completion-check"),
            Self::PostEdit { .. } => Some("post-edit"),
            Self::PreCommit => Some("pre-commit"),
            Self::Detect | Self::EnsureConfig | Self::Version => None,
        }
    }
}
