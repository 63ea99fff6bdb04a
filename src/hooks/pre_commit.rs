//! Pre-commit gate: branch policy, then lint and tests.
//!
//! The gate answers in the `decision` shape. Order of evaluation:
//! 1. Staged changes on the protected branch are blocked outright.
//! 2. Without a detectable test runner the commit is allowed with advice,
//!    and the linter is not run.
//! 3. Otherwise the linter (if any) and the test runner run, and any failure
//!    blocks the commit with the tail of the failing output.

use super::HookOutput;
use crate::config::{ProjectConfig, DEFAULT_OUTPUT_TAIL_CHARS, DEFAULT_PROTECTED_BRANCH};
use crate::detect::{self, CheckCommand};
use crate::git::CommitState;
use crate::traits::CommandRunner;
use std::path::Path;

/// Advice given when no test runner could be found.
pub const NO_TEST_RUNNER_MESSAGE: &str = "No test runner detected. Consider adding tests.";

/// Configuration for the pre-commit gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreCommitConfig {
    /// Branch on which staged commits are blocked.
    pub protected_branch: String,
    /// Characters of combined output kept per failing check.
    pub output_tail_chars: usize,
    /// Test command that replaces detection.
    pub test_command: Option<CheckCommand>,
    /// Lint command that replaces detection.
    pub lint_command: Option<CheckCommand>,
}

impl Default for PreCommitConfig {
    fn default() -> Self {
        Self {
            protected_branch: DEFAULT_PROTECTED_BRANCH.to_string(),
            output_tail_chars: DEFAULT_OUTPUT_TAIL_CHARS,
            test_command: None,
            lint_command: None,
        }
    }
}

impl From<&ProjectConfig> for PreCommitConfig {
    fn from(config: &ProjectConfig) -> Self {
        Self {
            protected_branch: config.protected_branch.clone(),
            output_tail_chars: config.output_tail_chars,
            test_command: config.test_command.as_deref().and_then(CheckCommand::from_argv),
            lint_command: config.lint_command.as_deref().and_then(CheckCommand::from_argv),
        }
    }
}

impl PreCommitConfig {
    /// The test runner to use: the configured one, else whatever is detected.
    pub fn test_runner(&self, base_dir: &Path) -> Option<CheckCommand> {
        self.test_command.clone().or_else(|| detect::detect_test_runner(base_dir))
    }

    /// The linter to use: the configured one, else whatever is detected.
    pub fn linter(&self, base_dir: &Path) -> Option<CheckCommand> {
        self.lint_command.clone().or_else(|| detect::detect_linter(base_dir))
    }
}

/// Outcome of one lint or test run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Display name, e.g. `Tests (cargo)`.
    pub name: String,
    /// Whether the check exited successfully.
    pub passed: bool,
    /// Tail of the combined stdout/stderr.
    pub output: String,
}

/// Run the pre-commit gate for the project rooted at `base_dir`.
///
/// `runner` must execute commands with `base_dir` as working directory.
pub fn run_pre_commit_hook(
    config: &PreCommitConfig,
    runner: &dyn CommandRunner,
    base_dir: &Path,
) -> HookOutput {
    let state = CommitState::query(runner);
    if state.commits_to(&config.protected_branch) {
        return HookOutput::block(protected_branch_reason(&config.protected_branch));
    }

    let Some(test_runner) = config.test_runner(base_dir) else {
        return HookOutput::allow_with_message(NO_TEST_RUNNER_MESSAGE);
    };
    let linter = config.linter(base_dir);

    let results = run_checks(runner, linter.as_ref(), &test_runner, config.output_tail_chars);
    summarize(&results)
}

/// Run the linter (if any) and then the test runner.
///
/// A tool that cannot be started counts as a failed check; its spawn error
/// becomes the check output.
pub fn run_checks(
    runner: &dyn CommandRunner,
    linter: Option<&CheckCommand>,
    test_runner: &CheckCommand,
    tail: usize,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(2);
    if let Some(linter) = linter {
        results.push(run_check(runner, format!("Lint ({})", linter.program), linter, tail));
    }
    results.push(run_check(runner, format!("Tests ({})", test_runner.program), test_runner, tail));
    results
}

fn run_check(
    runner: &dyn CommandRunner,
    name: String,
    command: &CheckCommand,
    tail: usize,
) -> CheckResult {
    match runner.run(&command.program, &command.arg_refs()) {
        Ok(output) => CheckResult {
            name,
            passed: output.success(),
            output: tail_chars(&output.combined_output(), tail).to_string(),
        },
        Err(e) => CheckResult {
            name,
            passed: false,
            output: tail_chars(&e.to_string(), tail).to_string(),
        },
    }
}

/// Turn check results into the gate's decision.
pub fn summarize(results: &[CheckResult]) -> HookOutput {
    let failures: Vec<String> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| format!("{}:\n{}", r.name, r.output))
        .collect();

    if failures.is_empty() {
        HookOutput::allow()
    } else {
        HookOutput::block(format!("Pre-commit checks failed:\n\n{}", failures.join("\n---\n")))
    }
}

fn protected_branch_reason(branch: &str) -> String {
    format!(
        "Cannot commit directly to {branch}.\n\
         Create a feature branch: git checkout -b feature/<name>\n\
         Then open a PR to merge into {branch}."
    )
}

/// The last `limit` characters of `text`.
pub fn tail_chars(text: &str, limit: usize) -> &str {
    let count = text.chars().count();
    if count <= limit {
        return text;
    }
    let start = text.char_indices().nth(count - limit).map_or(text.len(), |(i, _)| i);
    &text[start..]
}
