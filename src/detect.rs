//! Linter and test-runner detection from marker files.
//!
//! Each probe looks at one ecosystem's manifest and config files and returns
//! the command to run, or `None`. A probe never fails: unreadable or
//! malformed files are treated as if they carried no signal, and detection
//! moves on to the next ecosystem.

use std::fmt;
use std::path::Path;

/// A program plus arguments, as detected or configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCommand {
    /// The executable to run.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl CheckCommand {
    /// Build a command from a fixed argv.
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self { program: program.to_string(), args: args.iter().map(|a| (*a).to_string()).collect() }
    }

    /// Build a command from a configured argv list. `None` if the list is empty.
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self { program: program.clone(), args: args.to_vec() })
    }

    /// Arguments as string slices, ready for a `CommandRunner`.
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for CheckCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Detect the test runner for the project rooted at `base_dir`.
///
/// Ecosystems are tried in a fixed order (Node, Python, Rust, Go) and the
/// first one that yields a command wins.
pub fn detect_test_runner(base_dir: &Path) -> Option<CheckCommand> {
    node_test_runner(base_dir)
        .or_else(|| python_test_runner(base_dir))
        .or_else(|| rust_test_runner(base_dir))
        .or_else(|| go_test_runner(base_dir))
}

/// Detect the linter for the project rooted at `base_dir`.
pub fn detect_linter(base_dir: &Path) -> Option<CheckCommand> {
    node_linter(base_dir)
        .or_else(|| python_linter(base_dir))
        .or_else(|| rust_linter(base_dir))
        .or_else(|| go_linter(base_dir))
}

fn exists(base_dir: &Path, name: &str) -> bool {
    base_dir.join(name).exists()
}

fn any_exists(base_dir: &Path, names: &[&str]) -> bool {
    names.iter().any(|name| exists(base_dir, name))
}

/// Whether `pyproject.toml` exists and its text mentions `needle`.
fn pyproject_mentions(base_dir: &Path, needle: &str) -> bool {
    std::fs::read_to_string(base_dir.join("pyproject.toml"))
        .is_ok_and(|content| content.contains(needle))
}

/// Whether `package.json` parses and declares a `scripts.test` entry.
fn package_json_has_test_script(base_dir: &Path) -> Option<bool> {
    let content = std::fs::read_to_string(base_dir.join("package.json")).ok()?;
    let package: serde_json::Value = serde_json::from_str(&content).ok()?;
    Some(package.get("scripts").and_then(|scripts| scripts.get("test")).is_some())
}

fn node_test_runner(base_dir: &Path) -> Option<CheckCommand> {
    if !exists(base_dir, "package.json") {
        return None;
    }
    if package_json_has_test_script(base_dir) == Some(true) {
        return Some(CheckCommand::new("npm", &["test"]));
    }
    if any_exists(base_dir, &["vitest.config.ts", "vitest.config.js"]) {
        return Some(CheckCommand::new("npx", &["vitest", "run"]));
    }
    if any_exists(base_dir, &["jest.config.js", "jest.config.ts"]) {
        return Some(CheckCommand::new("npx", &["jest"]));
    }
    None
}

fn python_test_runner(base_dir: &Path) -> Option<CheckCommand> {
    if !any_exists(base_dir, &["requirements.txt", "pyproject.toml"]) {
        return None;
    }
    let uses_pytest = any_exists(base_dir, &["pytest.ini", "conftest.py"])
        || pyproject_mentions(base_dir, "pytest");
    if uses_pytest {
        return Some(CheckCommand::new("pytest", &["-v", "--tb=short", "-q"]));
    }
    Some(CheckCommand::new("python", &["-m", "unittest", "discover"]))
}

fn rust_test_runner(base_dir: &Path) -> Option<CheckCommand> {
    exists(base_dir, "Cargo.toml").then(|| CheckCommand::new("cargo", &["test"]))
}

fn go_test_runner(base_dir: &Path) -> Option<CheckCommand> {
    exists(base_dir, "go.mod").then(|| CheckCommand::new("go", &["test", "./..."]))
}

fn node_linter(base_dir: &Path) -> Option<CheckCommand> {
    any_exists(base_dir, &[".eslintrc.js", ".eslintrc.json", "eslint.config.js"])
        .then(|| CheckCommand::new("npx", &["eslint", "."]))
}

fn python_linter(base_dir: &Path) -> Option<CheckCommand> {
    if pyproject_mentions(base_dir, "ruff") {
        return Some(CheckCommand::new("ruff", &["check", "."]));
    }
    any_exists(base_dir, &[".flake8", "setup.cfg"]).then(|| CheckCommand::new("flake8", &[]))
}

fn rust_linter(base_dir: &Path) -> Option<CheckCommand> {
    exists(base_dir, "Cargo.toml").then(|| CheckCommand::new("cargo", &["clippy"]))
}

fn go_linter(base_dir: &Path) -> Option<CheckCommand> {
    exists(base_dir, "go.mod").then(|| CheckCommand::new("go", &["vet", "./..."]))
}
