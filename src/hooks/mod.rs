//! Hook implementations for the agent lifecycle events.

mod completion;
mod post_edit;
mod pre_commit;

pub use completion::{
    run_completion_check, FAILING_TESTS_REASON, MISSING_TRANSCRIPT_REMINDER, NO_TESTS_REASON,
};
pub use post_edit::{run_post_edit, test_reminder};
pub use pre_commit::{
    run_checks, run_pre_commit_hook, CheckResult, PreCommitConfig, NO_TEST_RUNNER_MESSAGE,
};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Verdict carried by a decision-style output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Let the host proceed.
    Allow,
    /// Stop the host action.
    Block,
}

/// The single JSON object a hook prints on stdout.
///
/// The host understands two shapes, one keyed on `continue` and one keyed
/// on `decision`. Each hook always answers in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HookOutput {
    /// `{"continue": bool, "message"?: string, "stopReason"?: string}`
    Continue {
        /// Whether the host may carry on.
        #[serde(rename = "continue")]
        proceed: bool,
        /// Advisory text shown to the agent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Why the host must not carry on.
        #[serde(rename = "stopReason", default, skip_serializing_if = "Option::is_none")]
        stop_reason: Option<String>,
    },
    /// `{"decision": "allow"|"block", "reason"?: string, "message"?: string}`
    Decision {
        /// Allow or block.
        decision: Verdict,
        /// Why the action was blocked.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        /// Advisory text shown alongside an allow.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl HookOutput {
    /// `continue=true` with nothing to say.
    pub const fn proceed() -> Self {
        Self::Continue { proceed: true, message: None, stop_reason: None }
    }

    /// `continue=true` with an advisory message.
    pub fn proceed_with_message(message: impl Into<String>) -> Self {
        Self::Continue { proceed: true, message: Some(message.into()), stop_reason: None }
    }

    /// `continue=false` with a stop reason.
    pub fn halt(stop_reason: impl Into<String>) -> Self {
        Self::Continue { proceed: false, message: None, stop_reason: Some(stop_reason.into()) }
    }

    /// `decision=allow`.
    pub const fn allow() -> Self {
        Self::Decision { decision: Verdict::Allow, reason: None, message: None }
    }

    /// `decision=allow` with an advisory message.
    pub fn allow_with_message(message: impl Into<String>) -> Self {
        Self::Decision { decision: Verdict::Allow, reason: None, message: Some(message.into()) }
    }

    /// `decision=block` with a reason.
    pub fn block(reason: impl Into<String>) -> Self {
        Self::Decision { decision: Verdict::Block, reason: Some(reason.into()), message: None }
    }

    /// Check if this output stops the host action.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        match self {
            Self::Continue { proceed, .. } => !*proceed,
            Self::Decision { decision, .. } => matches!(decision, Verdict::Block),
        }
    }

    /// The advisory message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Continue { message, .. } | Self::Decision { message, .. } => message.as_deref(),
        }
    }

    /// The stop reason or block reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Continue { stop_reason, .. } => stop_reason.as_deref(),
            Self::Decision { reason, .. } => reason.as_deref(),
        }
    }

    /// Serialize to the single-line JSON the host reads.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// JSON payload the host may pipe to a hook on stdin.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct HookInput {
    /// Path to the transcript file.
    #[serde(default)]
    pub transcript_path: Option<String>,
    /// The tool input (for post-edit hooks).
    #[serde(default)]
    pub tool_input: Option<ToolInput>,
}

/// Tool input for file-editing tools.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ToolInput {
    /// The file path being written/edited.
    #[serde(default)]
    pub file_path: Option<String>,
}

impl HookInput {
    /// The edited file path, if the payload carries one.
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.as_ref().and_then(|t| t.file_path.as_deref())
    }

    /// Read the transcript file the payload points at.
    ///
    /// Returns `None` when there is no path or the file cannot be read.
    pub fn read_transcript(&self) -> Option<String> {
        let path = self.transcript_path.as_deref()?;
        std::fs::read_to_string(path).ok()
    }
}

/// Parse hook input from stdin.
///
/// # Errors
///
/// Returns an error if the input cannot be parsed as JSON.
pub fn parse_hook_input(input: &str) -> Result<HookInput> {
    if input.trim().is_empty() {
        return Ok(HookInput::default());
    }
    let parsed: HookInput = serde_json::from_str(input)?;
    Ok(parsed)
}
