//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]
#![allow(clippy::needless_pass_by_ref_mut)] // &mut self for ergonomics with RefCell

use crate::error::Result;
use crate::traits::{CommandOutput, CommandRunner};
use std::cell::RefCell;

/// What a [`MockCommandRunner`] hands back for one expected call.
#[derive(Debug, Clone)]
enum MockResponse {
    Output(CommandOutput),
    SpawnError(String),
}

/// A mock command runner for testing.
///
/// Records expected commands and their outputs in order, then verifies
/// they were all called.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    expectations: RefCell<Vec<(String, Vec<String>, MockResponse)>>,
    call_index: RefCell<usize>,
}

impl MockCommandRunner {
    /// Create a new mock command runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an expected command and its output.
    pub fn expect(&mut self, program: &str, args: &[&str], output: CommandOutput) {
        self.push(program, args, MockResponse::Output(output));
    }

    /// Add an expected command that fails to spawn, as if not installed.
    pub fn expect_spawn_error(&mut self, program: &str, args: &[&str], message: &str) {
        self.push(program, args, MockResponse::SpawnError(message.to_string()));
    }

    /// Expect the two git queries the pre-commit gate makes.
    pub fn expect_git_state(&mut self, branch: &str, staged: &[&str]) {
        self.expect(
            "git",
            &["branch", "--show-current"],
            CommandOutput::new(0, format!("{branch}\n")),
        );
        let listing: String = staged.iter().map(|f| format!("{f}\n")).collect();
        self.expect("git", &["diff", "--cached", "--name-only"], CommandOutput::new(0, listing));
    }

    fn push(&mut self, program: &str, args: &[&str], response: MockResponse) {
        self.expectations.borrow_mut().push((
            program.to_string(),
            args.iter().map(|s| (*s).to_string()).collect(),
            response,
        ));
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        *self.call_index.borrow()
    }

    /// Verify all expected commands were called.
    ///
    /// # Panics
    ///
    /// Panics if not all expected commands were called.
    pub fn verify(&self) {
        let index = *self.call_index.borrow();
        let expected = self.expectations.borrow().len();
        assert_eq!(
            index, expected,
            "Expected {expected} command calls, but only {index} were made"
        );
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut index = self.call_index.borrow_mut();
        let expectations = self.expectations.borrow();

        assert!(
            *index < expectations.len(),
            "Unexpected command call: {program} {args:?} (no more expectations)"
        );

        let (exp_program, exp_args, response) = &expectations[*index];
        let args_vec: Vec<String> = args.iter().map(|s| (*s).to_string()).collect();

        assert!(
            program == exp_program && &args_vec == exp_args,
            "Command mismatch at index {}:\n  Expected: {} {:?}\n  Got: {} {:?}",
            *index,
            exp_program,
            exp_args,
            program,
            args
        );

        *index += 1;
        match response {
            MockResponse::Output(output) => Ok(output.clone()),
            MockResponse::SpawnError(message) => Err(crate::error::Error::Spawn {
                command: crate::command::display_command(program, args),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, message.clone()),
            }),
        }
    }
}

/// A command runner that always fails to spawn, for testing error paths.
#[derive(Debug, Default)]
pub struct FailingCommandRunner {
    error_message: String,
}

impl FailingCommandRunner {
    /// Create a new failing command runner with the specified error message.
    #[must_use]
    pub fn new(error_message: impl Into<String>) -> Self {
        Self { error_message: error_message.into() }
    }
}

impl CommandRunner for FailingCommandRunner {
    fn run(&self, _program: &str, _args: &[&str]) -> Result<CommandOutput> {
        Err(std::io::Error::other(self.error_message.clone()).into())
    }
}
