//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::Command;
use crate::command::RealCommandRunner;
use crate::config::{self, ProjectConfig};
use crate::hook_logging;
use crate::hooks::{
    parse_hook_input, run_completion_check, run_post_edit, run_pre_commit_hook, HookInput,
    HookOutput, PreCommitConfig,
};
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    fn info(messages: Vec<String>) -> Self {
        Self { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: messages }
    }

    fn failure(message: String) -> Self {
        Self { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
    }
}

/// Run a CLI command in the current directory with the given stdin input.
pub fn run(command: Command, stdin: &str) -> CliOutput {
    run_in(command, stdin, Path::new("."))
}

/// Run a CLI command with `base_dir` as the project root.
pub fn run_in(command: Command, stdin: &str, base_dir: &Path) -> CliOutput {
    match command {
        Command::CompletionCheck { transcript } => {
            run_completion_check_cmd(transcript, stdin, base_dir)
        }
        Command::PostEdit { file_path } => run_post_edit_cmd(file_path, stdin, base_dir),
        Command::PreCommit => run_pre_commit_cmd(base_dir),
        Command::Detect => run_detect(base_dir),
        Command::EnsureConfig => run_ensure_config(base_dir),
        Command::Version => run_version(),
    }
}

// === Hook Commands ===

/// Per-invocation context shared by the hook commands.
struct HookRun<'a> {
    hook_type: &'static str,
    base_dir: &'a Path,
    config: ProjectConfig,
    stderr: Vec<String>,
}

impl<'a> HookRun<'a> {
    fn start(hook_type: &'static str, base_dir: &'a Path) -> Self {
        let (config, warning) = ProjectConfig::load_or_default(base_dir);
        Self { hook_type, base_dir, config, stderr: warning.into_iter().collect() }
    }

    /// Parse the stdin payload, falling back to an empty one.
    fn payload(&mut self, stdin: &str) -> HookInput {
        parse_hook_input(stdin).unwrap_or_else(|e| {
            self.stderr.push(format!("Warning: ignoring hook input: {e}"));
            HookInput::default()
        })
    }

    /// Log the decision and print it as the hook's only stdout line.
    fn finish(mut self, input: &serde_json::Value, output: &HookOutput) -> CliOutput {
        hook_logging::log_hook_event(&self.config, self.base_dir, self.hook_type, input, output);
        match output.to_json() {
            Ok(json) => {
                CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: self.stderr }
            }
            Err(e) => {
                self.stderr.push(format!("Error serializing {} decision: {e}", self.hook_type));
                CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: self.stderr }
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn run_completion_check_cmd(
    transcript: Option<String>,
    stdin: &str,
    base_dir: &Path,
) -> CliOutput {
    let mut hook = HookRun::start("completion-check", base_dir);

    let (transcript, source) = match non_empty(transcript) {
        Some(text) => (Some(text), "argument"),
        None => (hook.payload(stdin).read_transcript(), "transcript_path"),
    };

    let output = run_completion_check(transcript.as_deref());
    let input = serde_json::json!({
        "source": source,
        "transcript_chars": transcript.as_ref().map(|t| t.chars().count()),
    });
    hook.finish(&input, &output)
}

fn run_post_edit_cmd(file_path: Option<String>, stdin: &str, base_dir: &Path) -> CliOutput {
    let mut hook = HookRun::start("post-edit", base_dir);

    let file_path = match non_empty(file_path) {
        Some(path) => Some(path),
        None => hook.payload(stdin).file_path().map(str::to_string),
    };

    let output = run_post_edit(file_path.as_deref());
    hook.finish(&serde_json::json!({ "file_path": file_path }), &output)
}

fn run_pre_commit_cmd(base_dir: &Path) -> CliOutput {
    let hook = HookRun::start("pre-commit", base_dir);
    let runner = RealCommandRunner::in_dir(base_dir);

    let output = run_pre_commit_hook(&PreCommitConfig::from(&hook.config), &runner, base_dir);
    let input = serde_json::json!({ "base_dir": base_dir.display().to_string() });
    hook.finish(&input, &output)
}

// === Utility Commands ===

fn run_detect(base_dir: &Path) -> CliOutput {
    let (project_config, warning) = ProjectConfig::load_or_default(base_dir);
    let config = PreCommitConfig::from(&project_config);

    let describe = |command: Option<crate::detect::CheckCommand>| {
        command.map_or_else(|| "(none)".to_string(), |c| c.to_string())
    };

    let mut messages: Vec<String> = warning.into_iter().collect();
    messages.push(format!("linter: {}", describe(config.linter(base_dir))));
    messages.push(format!("test runner: {}", describe(config.test_runner(base_dir))));
    messages.push(format!("protected branch: {}", config.protected_branch));
    CliOutput::info(messages)
}

fn run_ensure_config(base_dir: &Path) -> CliOutput {
    match config::ensure_config_in(base_dir) {
        Ok((config, created)) => {
            let verb = if created { "Created" } else { "Found" };
            let mut messages = vec![format!("{verb} config at {}", config::CONFIG_FILE_PATH)];
            messages.push(format!("  protected_branch: {}", config.protected_branch));
            messages.push(format!("  output_tail_chars: {}", config.output_tail_chars));
            messages.push(format!("  debug_logging: {}", config.debug_logging));
            if let Some(cmd) = &config.test_command {
                messages.push(format!("  test_command: {}", cmd.join(" ")));
            }
            if let Some(cmd) = &config.lint_command {
                messages.push(format!("  lint_command: {}", cmd.join(" ")));
            }
            CliOutput::info(messages)
        }
        Err(e) => CliOutput::failure(format!("Error ensuring config: {e}")),
    }
}

fn run_version() -> CliOutput {
    CliOutput::info(vec![format!("verify-hooks v{}", crate::VERSION)])
}
