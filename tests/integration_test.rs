//! Integration tests for `verify_hooks`.

use verify_hooks::hooks::{
    run_completion_check, run_post_edit, run_pre_commit_hook, HookOutput, PreCommitConfig,
    FAILING_TESTS_REASON, NO_TESTS_REASON, NO_TEST_RUNNER_MESSAGE,
};
use verify_hooks::testing::MockCommandRunner;
use verify_hooks::{CommandOutput, CommandRunner, RealCommandRunner, VERSION};

use tempfile::TempDir;

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[test]
fn test_real_command_runner() {
    let runner = RealCommandRunner::new();
    let output = runner.run("echo", &["hello"]).unwrap();
    assert!(output.success());
    assert!(output.stdout.contains("hello"));
}

#[test]
fn test_completion_check_decisions() {
    assert_eq!(run_completion_check(Some("$ cargo test\ntest result: ok")), HookOutput::proceed());
    assert_eq!(run_completion_check(Some("edited three files")), HookOutput::halt(NO_TESTS_REASON));
    assert_eq!(
        run_completion_check(Some("$ npx jest\nTests: 2 failed")),
        HookOutput::halt(FAILING_TESTS_REASON)
    );
}

#[test]
fn test_post_edit_reminders() {
    let json = run_post_edit(Some("web/src/App.tsx")).to_json().unwrap();
    assert_eq!(json, r#"{"continue":true,"message":"Remember to verify changes: npm test"}"#);

    assert_eq!(run_post_edit(Some("tests/test_app.py")), HookOutput::proceed());
    assert_eq!(run_post_edit(Some("README.md")), HookOutput::proceed());
    assert_eq!(run_post_edit(None), HookOutput::proceed());
}

#[test]
fn test_pre_commit_full_pass_on_rust_project() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Cargo.toml"), "[package]\nname = \"demo\"\n").unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git_state("feature/parser", &["src/lib.rs"]);
    runner.expect("cargo", &["clippy"], CommandOutput::new(0, ""));
    runner.expect("cargo", &["test"], CommandOutput::new(0, "test result: ok"));

    let output = run_pre_commit_hook(&PreCommitConfig::default(), &runner, dir.path());

    assert_eq!(output.to_json().unwrap(), r#"{"decision":"allow"}"#);
    runner.verify();
}

#[test]
fn test_pre_commit_protected_branch_runs_nothing() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("go.mod"), "module demo\n").unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git_state("main", &["main.go"]);

    let output = run_pre_commit_hook(&PreCommitConfig::default(), &runner, dir.path());

    assert!(output.is_blocking());
    assert!(output.reason().unwrap().contains("git checkout -b feature/<name>"));
    runner.verify();
}

#[test]
fn test_pre_commit_without_tests_allows_with_advice() {
    let dir = TempDir::new().unwrap();

    let mut runner = MockCommandRunner::new();
    runner.expect_git_state("dev", &["notes.txt"]);

    let output = run_pre_commit_hook(&PreCommitConfig::default(), &runner, dir.path());

    assert_eq!(output, HookOutput::allow_with_message(NO_TEST_RUNNER_MESSAGE));
    runner.verify();
}
