//! Debug hook event logging.
//!
//! When `debug_logging` is enabled in the project config, every hook
//! invocation is appended as a JSONL line to `hook-events.jsonl` in the
//! project's data directory (see [`crate::paths`]). Each line records the
//! hook type, a timestamp, the input the hook saw and the decision it made.

use crate::config::ProjectConfig;
use crate::hooks::HookOutput;
use crate::paths;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Log file name within the data directory.
pub const HOOK_EVENTS_FILE: &str = "hook-events.jsonl";

/// Log a hook event if the config enables debug logging.
///
/// Errors are silently ignored; logging never changes a hook's answer.
pub fn log_hook_event(
    config: &ProjectConfig,
    project_dir: &Path,
    hook_type: &str,
    input: &serde_json::Value,
    output: &HookOutput,
) {
    if !config.debug_logging {
        return;
    }
    let Some(data_dir) = paths::project_data_dir(project_dir) else {
        return;
    };
    write_hook_event(&data_dir, hook_type, input, output);
}

/// Append one event to the log in `data_dir`.
pub fn write_hook_event(
    data_dir: &Path,
    hook_type: &str,
    input: &serde_json::Value,
    output: &HookOutput,
) {
    if std::fs::create_dir_all(data_dir).is_err() {
        return;
    }

    let entry = serde_json::json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "hook_type": hook_type,
        "input": input,
        "output": output,
    });

    let Ok(mut file) =
        OpenOptions::new().create(true).append(true).open(data_dir.join(HOOK_EVENTS_FILE))
    else {
        return;
    };

    let _ = writeln!(file, "{entry}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_log_lines(dir: &Path) -> Vec<serde_json::Value> {
        let log_path = dir.join(HOOK_EVENTS_FILE);
        if !log_path.exists() {
            return vec![];
        }
        let content = std::fs::read_to_string(&log_path).unwrap();
        content
            .lines()
            .filter(|l| !l.is_empty())
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_write_hook_event() {
        let dir = TempDir::new().unwrap();
        let input = serde_json::json!({"file_path": "src/app.py"});

        write_hook_event(
            dir.path(),
            "post-edit",
            &input,
            &HookOutput::proceed_with_message("Remember to verify changes: pytest"),
        );

        let lines = read_log_lines(dir.path());
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["hook_type"], "post-edit");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[0]["input"]["file_path"], "src/app.py");
        assert_eq!(lines[0]["output"]["continue"], true);
    }

    #[test]
    fn test_events_append() {
        let dir = TempDir::new().unwrap();
        let input = serde_json::Value::Null;

        write_hook_event(dir.path(), "pre-commit", &input, &HookOutput::allow());
        write_hook_event(dir.path(), "pre-commit", &input, &HookOutput::block("on main"));

        let lines = read_log_lines(dir.path());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["output"]["decision"], "block");
    }

    #[test]
    fn test_creates_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("projects").join("demo-0000");

        let input = serde_json::Value::Null;
        write_hook_event(&nested, "completion-check", &input, &HookOutput::proceed());

        assert_eq!(read_log_lines(&nested).len(), 1);
    }

    #[test]
    fn test_disabled_logging_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfig::default();

        let input = serde_json::Value::Null;
        log_hook_event(&config, dir.path(), "completion-check", &input, &HookOutput::proceed());

        if let Some(data_dir) = paths::project_data_dir(dir.path()) {
            assert!(!data_dir.join(HOOK_EVENTS_FILE).exists());
        }
    }
}
