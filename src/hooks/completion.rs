//! Session-stop hook: refuse to finish until tests have run and pass.
//!
//! The check is plain substring matching over the lowercased transcript.
//! Any test-runner invocation counts as "tests ran", and any success marker
//! after the last failure marker counts as "failures resolved".

use super::HookOutput;

/// Substrings that show some test runner was invoked.
const TEST_RUNNER_MARKERS: &[&str] =
    &["pytest", "npm test", "npx vitest", "npx jest", "cargo test", "go test", "unittest"];

/// Substrings that suggest a test run went wrong.
const FAILURE_MARKERS: &[&str] = &["failed", "error"];

/// Substrings that suggest a later test run went right.
const SUCCESS_MARKERS: &[&str] = &["passed", "0 failed", "ok"];

/// Reminder given when there is no transcript to inspect.
pub const MISSING_TRANSCRIPT_REMINDER: &str = "Reminder: Ensure you ran tests before finishing.";

/// Stop reason when no test runner shows up in the transcript.
pub const NO_TESTS_REASON: &str =
    "Tests haven't been run this session. Run your project's test suite before finishing.";

/// Stop reason when the last failure is never followed by a success.
pub const FAILING_TESTS_REASON: &str =
    "Tests appear to be failing. Fix failing tests before finishing.";

/// Decide whether the session may stop, given its transcript.
///
/// An absent or empty transcript is a no-signal case and lets the session
/// stop with a reminder.
pub fn run_completion_check(transcript: Option<&str>) -> HookOutput {
    let Some(transcript) = transcript.filter(|t| !t.is_empty()) else {
        return HookOutput::proceed_with_message(MISSING_TRANSCRIPT_REMINDER);
    };

    let lower = transcript.to_lowercase();

    if !TEST_RUNNER_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return HookOutput::halt(NO_TESTS_REASON);
    }

    if let Some(last_failure) = last_occurrence(&lower, FAILURE_MARKERS) {
        let remaining = &lower[last_failure..];
        if !SUCCESS_MARKERS.iter().any(|marker| remaining.contains(marker)) {
            return HookOutput::halt(FAILING_TESTS_REASON);
        }
    }

    HookOutput::proceed()
}

/// Byte offset of the latest start of any of `needles` in `haystack`.
fn last_occurrence(haystack: &str, needles: &[&str]) -> Option<usize> {
    needles.iter().filter_map(|needle| haystack.rfind(needle)).max()
}
