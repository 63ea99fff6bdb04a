//! Post-edit hook: remind the agent which test command covers an edited file.
//!
//! Advisory only. Every path answers `continue=true`.

use super::HookOutput;
use std::path::Path;

/// Conventional test command per lowercase file extension.
const TEST_COMMANDS: &[(&str, &str)] = &[
    ("py", "pytest"),
    ("js", "npm test"),
    ("ts", "npm test"),
    ("tsx", "npm test"),
    ("jsx", "npm test"),
    ("rs", "cargo test"),
    ("go", "go test ./..."),
];

/// The test command to suggest after editing `file_path`.
///
/// Test and spec files themselves get no reminder.
pub fn test_reminder(file_path: &str) -> Option<&'static str> {
    let lower = file_path.to_lowercase();
    if lower.contains("test") || lower.contains("spec") {
        return None;
    }

    let ext = Path::new(&lower).extension()?.to_str()?;
    TEST_COMMANDS.iter().find(|(known, _)| *known == ext).map(|(_, command)| *command)
}

/// Build the post-edit advisory for an edited file.
pub fn run_post_edit(file_path: Option<&str>) -> HookOutput {
    match file_path.and_then(test_reminder) {
        Some(command) => {
            HookOutput::proceed_with_message(format!("Remember to verify changes: {command}"))
        }
        None => HookOutput::proceed(),
    }
}
